//! Capability traits decoupling the listener from real accelerometer
//! hardware.
//!
//! Platform integrations implement [`AccelerometerSource`] and push
//! samples into the [`SampleSink`] handed to them; the harness crate
//! provides a scripted implementation for tests and replay.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sample::AccelSample;

/// Requested sample delivery cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleRate {
    /// Screen-rotation grade, one sample every 200 ms.
    #[default]
    Normal,
    /// UI grade, roughly 15 Hz.
    Ui,
    /// Game grade, 50 Hz.
    Game,
    /// As fast as the hardware delivers.
    Fastest,
}

impl SampleRate {
    /// Nominal interval between samples at this rate.
    pub fn interval(&self) -> Duration {
        match self {
            SampleRate::Normal => Duration::from_millis(200),
            SampleRate::Ui => Duration::from_micros(66_667),
            SampleRate::Game => Duration::from_millis(20),
            SampleRate::Fastest => Duration::ZERO,
        }
    }
}

/// Errors from acquiring or subscribing to the accelerometer.
#[derive(Debug, Error)]
pub enum SensorError {
    /// No accelerometer exists on this device.
    #[error("no accelerometer available")]
    Unavailable,
    /// The source failed to start delivering samples.
    #[error("accelerometer subscription failed: {0}")]
    Subscribe(String),
}

/// Result type for sensor operations.
pub type SensorResult<T> = Result<T, SensorError>;

/// Receiver for accelerometer samples.
///
/// Sources call [`deliver`] from whatever thread drives the hardware,
/// so implementations must be safe to call concurrently with reads
/// from other threads.
///
/// [`deliver`]: SampleSink::deliver
pub trait SampleSink: Send + Sync {
    fn deliver(&self, sample: AccelSample);
}

/// Handle to an active sample subscription.
///
/// After [`cancel`] returns the source makes no further `deliver`
/// calls for this subscription. Dropping a live subscription must stop
/// delivery as well.
///
/// [`cancel`]: Subscription::cancel
pub trait Subscription: Send {
    fn cancel(&mut self);
}

/// A source of accelerometer samples.
pub trait AccelerometerSource: Send + Sync {
    /// Whether an accelerometer exists at all.
    fn is_available(&self) -> bool;

    /// Start delivering samples to `sink` at the requested rate.
    fn subscribe(
        &self,
        rate: SampleRate,
        sink: Arc<dyn SampleSink>,
    ) -> SensorResult<Box<dyn Subscription>>;
}
