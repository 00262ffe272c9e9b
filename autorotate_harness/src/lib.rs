//! Deterministic test and replay harness for the autorotate crate.
//!
//! Provides a scripted accelerometer source, trace builders that turn
//! (orientation, tilt) pairs back into gravity vectors, and a recording
//! observer, so listener behavior can be exercised without hardware.

pub mod motions;
pub mod recording;
pub mod scripted;

pub use recording::RecordingObserver;
pub use scripted::ScriptedAccelerometer;
