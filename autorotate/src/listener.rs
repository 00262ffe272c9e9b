//! The orientation listener: subscribes to an accelerometer, runs the
//! classifier on every sample, and notifies an observer on rotation
//! changes.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use crate::classifier::SectorClassifier;
use crate::rotation::Rotation;
use crate::sample::AccelSample;
use crate::sensor::{AccelerometerSource, SampleRate, SampleSink, SensorResult, Subscription};
use crate::settings::RotationSettings;

/// Callback for committed rotation changes.
///
/// Invoked on the sample delivery thread, outside the classifier lock,
/// so implementations may call back into the listener's snapshot
/// accessors freely.
pub trait RotationObserver: Send + Sync {
    fn on_rotation_changed(&self, rotation: Rotation);
}

impl<F> RotationObserver for F
where
    F: Fn(Rotation) + Send + Sync,
{
    fn on_rotation_changed(&self, rotation: Rotation) {
        self(rotation)
    }
}

/// Snapshot value for the unknown rotation. Valid rotations encode as
/// their quarter-turn count, 0 through 3.
const SNAPSHOT_UNKNOWN: u8 = 4;

fn encode_snapshot(rotation: Option<Rotation>) -> u8 {
    rotation.map_or(SNAPSHOT_UNKNOWN, |r| (r.degrees() / 90) as u8)
}

fn decode_snapshot(bits: u8) -> Option<Rotation> {
    Rotation::from_degrees(u16::from(bits) * 90)
}

/// Shared state between the listener handle and the delivery thread.
///
/// The classifier sits behind a mutex taken only on the delivery path;
/// readers see the committed rotation through the atomic snapshot. The
/// accepting gate lets `disable` shut the pipeline down even while the
/// source still holds a sink handle.
struct ListenerCore {
    classifier: Mutex<SectorClassifier>,
    settings: Arc<dyn RotationSettings>,
    observer: Arc<dyn RotationObserver>,
    snapshot: AtomicU8,
    accepting: AtomicBool,
}

impl ListenerCore {
    fn new(settings: Arc<dyn RotationSettings>, observer: Arc<dyn RotationObserver>) -> Self {
        ListenerCore {
            classifier: Mutex::new(SectorClassifier::new()),
            settings,
            observer,
            snapshot: AtomicU8::new(SNAPSHOT_UNKNOWN),
            accepting: AtomicBool::new(false),
        }
    }

    fn snapshot(&self) -> Option<Rotation> {
        decode_snapshot(self.snapshot.load(Ordering::Relaxed))
    }

    fn reset(&self) {
        self.classifier.lock().unwrap().reset();
        self.snapshot.store(SNAPSHOT_UNKNOWN, Ordering::Relaxed);
    }
}

impl SampleSink for ListenerCore {
    fn deliver(&self, sample: AccelSample) {
        if !self.accepting.load(Ordering::Acquire) {
            return;
        }
        let rotation = {
            let mut classifier = self.classifier.lock().unwrap();
            let Some(proposal) = classifier.evaluate(sample) else {
                return;
            };
            if classifier.rotation() == Some(proposal) {
                return;
            }
            if proposal == Rotation::Deg180 && !self.settings.allow_180_rotation() {
                log::debug!("suppressing {} rotation by preference", proposal);
                return;
            }
            classifier.commit(proposal);
            self.snapshot
                .store(encode_snapshot(Some(proposal)), Ordering::Relaxed);
            proposal
        };
        log::info!("rotation changed to {}", rotation);
        self.observer.on_rotation_changed(rotation);
    }
}

/// Turns an accelerometer stream into discrete rotation-change events.
///
/// Construction wires up the capabilities; nothing happens until
/// [`enable`]. Samples are classified on the source's delivery thread
/// and the observer fires once per committed change, never for repeats
/// of the current rotation. The inverted rotation is committed only
/// while the settings allow it.
///
/// [`enable`]: OrientationListener::enable
pub struct OrientationListener {
    source: Arc<dyn AccelerometerSource>,
    core: Arc<ListenerCore>,
    rate: SampleRate,
    available: bool,
    subscription: Option<Box<dyn Subscription>>,
}

impl OrientationListener {
    /// Listener at the default [`SampleRate::Normal`] cadence.
    pub fn new(
        source: Arc<dyn AccelerometerSource>,
        settings: Arc<dyn RotationSettings>,
        observer: Arc<dyn RotationObserver>,
    ) -> Self {
        Self::with_rate(source, settings, observer, SampleRate::default())
    }

    /// Listener with an explicit sample rate. Accelerometer availability
    /// is captured here, at construction.
    pub fn with_rate(
        source: Arc<dyn AccelerometerSource>,
        settings: Arc<dyn RotationSettings>,
        observer: Arc<dyn RotationObserver>,
        rate: SampleRate,
    ) -> Self {
        let available = source.is_available();
        OrientationListener {
            source,
            core: Arc::new(ListenerCore::new(settings, observer)),
            rate,
            available,
            subscription: None,
        }
    }

    /// Whether rotation detection can work at all on this device.
    pub fn can_detect_orientation(&self) -> bool {
        self.available
    }

    /// Whether the listener currently holds a live subscription.
    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Start listening. Without an accelerometer this logs a warning and
    /// succeeds as a no-op; calling it while enabled is a no-op too. A
    /// subscription failure leaves the listener disabled.
    pub fn enable(&mut self) -> SensorResult<()> {
        if !self.available {
            log::warn!("cannot enable rotation listener, no accelerometer available");
            return Ok(());
        }
        if self.subscription.is_some() {
            log::debug!("rotation listener already enabled");
            return Ok(());
        }
        let sink: Arc<dyn SampleSink> = self.core.clone();
        let subscription = self.source.subscribe(self.rate, sink)?;
        self.core.reset();
        self.core.accepting.store(true, Ordering::Release);
        self.subscription = Some(subscription);
        log::info!("rotation listener enabled at {:?} rate", self.rate);
        Ok(())
    }

    /// Stop listening and forget the committed rotation. Idempotent.
    ///
    /// The accepting gate closes before the subscription is cancelled,
    /// so samples a sloppy source delivers during or after cancellation
    /// are ignored.
    pub fn disable(&mut self) {
        self.core.accepting.store(false, Ordering::Release);
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
            log::info!("rotation listener disabled");
        }
        self.core.reset();
    }

    /// The committed rotation, or `None` while unknown or disabled.
    ///
    /// A relaxed cross-thread snapshot; callable from any thread,
    /// including inside the observer callback.
    pub fn current_rotation(&self) -> Option<Rotation> {
        self.core.snapshot()
    }

    /// The committed rotation, with a fallback for the unknown case.
    pub fn current_rotation_or(&self, fallback: Rotation) -> Rotation {
        self.core.snapshot().unwrap_or(fallback)
    }
}

impl Drop for OrientationListener {
    fn drop(&mut self) {
        self.disable();
    }
}
