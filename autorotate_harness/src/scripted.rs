//! A hand-driven accelerometer source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use autorotate::sample::AccelSample;
use autorotate::sensor::{
    AccelerometerSource, SampleRate, SampleSink, SensorError, SensorResult, Subscription,
};

struct ActiveSink {
    sink: Arc<dyn SampleSink>,
    cancelled: Arc<AtomicBool>,
}

/// An [`AccelerometerSource`] whose samples are pushed by the test
/// itself.
///
/// Supports one subscription at a time. Cancelling the subscription
/// (explicitly or by drop) makes [`deliver`] stop forwarding, matching
/// the trait contract; [`sink_handle`] deliberately bypasses that so
/// tests can model a sloppy source delivering after cancellation.
///
/// [`deliver`]: ScriptedAccelerometer::deliver
/// [`sink_handle`]: ScriptedAccelerometer::sink_handle
pub struct ScriptedAccelerometer {
    available: bool,
    fail_subscribe: bool,
    active: Mutex<Option<ActiveSink>>,
}

impl ScriptedAccelerometer {
    /// A working source with an accelerometer present.
    pub fn new() -> Self {
        ScriptedAccelerometer {
            available: true,
            fail_subscribe: false,
            active: Mutex::new(None),
        }
    }

    /// A source reporting the given accelerometer availability.
    pub fn with_availability(available: bool) -> Self {
        ScriptedAccelerometer {
            available,
            ..Self::new()
        }
    }

    /// A source whose `subscribe` always fails.
    pub fn with_failing_subscribe() -> Self {
        ScriptedAccelerometer {
            fail_subscribe: true,
            ..Self::new()
        }
    }

    /// Whether a live, uncancelled subscription exists.
    pub fn is_subscribed(&self) -> bool {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|active| !active.cancelled.load(Ordering::Acquire))
    }

    /// Push one sample to the live sink. Returns whether the sample was
    /// forwarded; cancelled or absent subscriptions swallow it.
    pub fn deliver(&self, sample: AccelSample) -> bool {
        let sink = {
            let active = self.active.lock().unwrap();
            match active.as_ref() {
                Some(active) if !active.cancelled.load(Ordering::Acquire) => active.sink.clone(),
                _ => {
                    log::debug!("sample dropped, no live subscription");
                    return false;
                }
            }
        };
        sink.deliver(sample);
        true
    }

    /// Push a whole trace, returning how many samples were forwarded.
    pub fn deliver_all(&self, samples: impl IntoIterator<Item = AccelSample>) -> usize {
        samples
            .into_iter()
            .filter(|sample| self.deliver(*sample))
            .count()
    }

    /// A clone of the current sink, ignoring cancellation.
    pub fn sink_handle(&self) -> Option<Arc<dyn SampleSink>> {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map(|active| active.sink.clone())
    }
}

impl Default for ScriptedAccelerometer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelerometerSource for ScriptedAccelerometer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn subscribe(
        &self,
        _rate: SampleRate,
        sink: Arc<dyn SampleSink>,
    ) -> SensorResult<Box<dyn Subscription>> {
        if !self.available {
            return Err(SensorError::Unavailable);
        }
        if self.fail_subscribe {
            return Err(SensorError::Subscribe("scripted failure".into()));
        }
        let cancelled = Arc::new(AtomicBool::new(false));
        *self.active.lock().unwrap() = Some(ActiveSink {
            sink,
            cancelled: cancelled.clone(),
        });
        Ok(Box::new(ScriptedSubscription { cancelled }))
    }
}

struct ScriptedSubscription {
    cancelled: Arc<AtomicBool>,
}

impl Subscription for ScriptedSubscription {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Drop for ScriptedSubscription {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
