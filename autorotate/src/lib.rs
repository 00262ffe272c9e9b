//! Accelerometer-driven screen rotation detection.
//!
//! Classifies a stream of gravity samples into the four discrete screen
//! rotations. Each sample is reduced to an orientation angle around the
//! screen normal and a tilt out of the screen plane; tilt gates whether
//! a decision is made at all, and an ordered rule table with
//! tilt-widened hysteresis bands maps the angle to a rotation given the
//! previously committed one. A device resting on a sector boundary
//! therefore never flaps, and a fast landscape-to-landscape flip never
//! bounces through portrait.
//!
//! [`OrientationListener`] ties the pieces together: it subscribes to
//! an injected [`AccelerometerSource`], classifies on the delivery
//! thread, suppresses upside-down rotation unless the
//! [`RotationSettings`] allow it, and invokes a [`RotationObserver`]
//! exactly once per committed change.

pub mod classifier;
pub mod listener;
pub mod rotation;
pub mod rules;
pub mod sample;
pub mod sensor;
pub mod settings;

pub use classifier::SectorClassifier;
pub use listener::{OrientationListener, RotationObserver};
pub use rotation::Rotation;
pub use sample::AccelSample;
pub use sensor::{
    AccelerometerSource, SampleRate, SampleSink, SensorError, SensorResult, Subscription,
};
pub use settings::{FixedRotationSettings, RotationSettings, SharedRotationSettings};
