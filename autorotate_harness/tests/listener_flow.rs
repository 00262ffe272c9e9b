//! End-to-end listener behavior driven through a scripted source.
//!
//! Covers the lifecycle and callback contract: callbacks fire once per
//! committed change, hysteresis splits the switch-over angle by sweep
//! direction, the upside-down preference gates at decision time, and a
//! disabled listener ignores whatever a sloppy source still delivers.

use std::sync::Arc;

use autorotate::listener::OrientationListener;
use autorotate::rotation::Rotation;
use autorotate::sensor::SensorError;
use autorotate::settings::{FixedRotationSettings, SharedRotationSettings};
use autorotate_harness::{motions, RecordingObserver, ScriptedAccelerometer};

/// Listener wired to a scripted source and a recording observer.
fn setup(allow_180: bool) -> (Arc<ScriptedAccelerometer>, RecordingObserver, OrientationListener) {
    let source = Arc::new(ScriptedAccelerometer::new());
    let observer = RecordingObserver::new();
    let listener = OrientationListener::new(
        source.clone(),
        Arc::new(FixedRotationSettings(allow_180)),
        Arc::new(observer.clone()),
    );
    (source, observer, listener)
}

#[test]
fn test_no_callback_before_first_in_gate_sample() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    assert!(observer.events().is_empty());
    assert_eq!(listener.current_rotation(), None);

    // Out-of-gate samples keep the listener undecided.
    for _ in 0..5 {
        source.deliver(motions::flat_on_table());
    }
    assert!(observer.events().is_empty());
    assert_eq!(listener.current_rotation(), None);

    // The first usable sample commits and fires.
    source.deliver(motions::sample_at(0.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg0]);
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg0));
    assert_eq!(listener.current_rotation_or(Rotation::Deg90), Rotation::Deg0);
}

#[test]
fn test_sweep_across_a_boundary_and_back_switches_at_different_angles() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();

    // Held at 15° of tilt, the portrait-landscape boundary's enter and
    // leave thresholds sit at 290.8 and 326.5 degrees.
    let tilt = 15.0;
    source.deliver(motions::sample_at(0.0, tilt));
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg0));
    observer.clear();

    // Rotate toward landscape one degree at a time.
    let mut switch_angle = None;
    for orientation in (270..=359).rev() {
        source.deliver(motions::sample_at(orientation as f32, tilt));
        if switch_angle.is_none() && listener.current_rotation() == Some(Rotation::Deg90) {
            switch_angle = Some(orientation);
        }
    }
    assert_eq!(switch_angle, Some(290));
    assert_eq!(observer.events(), vec![Rotation::Deg90]);

    // And back again; the return switch happens well past where the
    // first one did.
    observer.clear();
    let mut switch_angle = None;
    for orientation in 291..=359 {
        source.deliver(motions::sample_at(orientation as f32, tilt));
        if switch_angle.is_none() && listener.current_rotation() == Some(Rotation::Deg0) {
            switch_angle = Some(orientation);
        }
    }
    assert_eq!(switch_angle, Some(327));
    assert_eq!(observer.events(), vec![Rotation::Deg0]);
}

#[test]
fn test_inverted_rotation_gated_by_live_preference() {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = Arc::new(ScriptedAccelerometer::new());
    let settings = Arc::new(SharedRotationSettings::new(false));
    let observer = RecordingObserver::new();
    let mut listener = OrientationListener::new(
        source.clone(),
        settings.clone(),
        Arc::new(observer.clone()),
    );
    listener.enable().unwrap();
    source.deliver(motions::sample_at(0.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg0]);

    // Approach upside down from both sides; every proposal is 180 and
    // every one is suppressed, leaving the committed state alone.
    for orientation in [150.0, 170.0, 180.0, 185.0, 195.0, 204.0] {
        source.deliver(motions::sample_at(orientation, 20.0));
    }
    assert_eq!(observer.events(), vec![Rotation::Deg0]);
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg0));

    // Flipping the preference takes effect on the very next sample.
    settings.set_allow_180_rotation(true);
    source.deliver(motions::sample_at(180.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg0, Rotation::Deg180]);
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg180));
}

#[test]
fn test_fast_landscape_flip_never_reports_portrait() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    source.deliver(motions::sample_at(270.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg90]);

    // A flip fast enough that the next samples land in the opposite
    // landscape's sector, short of and then past the continuation
    // threshold.
    source.deliver(motions::sample_at(50.0, 20.0));
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg90));
    source.deliver(motions::sample_at(100.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg90, Rotation::Deg270]);
}

#[test]
fn test_subscribe_failure_propagates_and_stays_disabled() {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = Arc::new(ScriptedAccelerometer::with_failing_subscribe());
    let observer = RecordingObserver::new();
    let mut listener = OrientationListener::new(
        source.clone(),
        Arc::new(FixedRotationSettings(true)),
        Arc::new(observer.clone()),
    );

    assert!(listener.can_detect_orientation());
    assert!(matches!(
        listener.enable(),
        Err(SensorError::Subscribe(_))
    ));
    assert!(!listener.is_enabled());
    assert_eq!(listener.current_rotation(), None);
    assert!(observer.events().is_empty());
}

#[test]
fn test_missing_accelerometer_enables_as_inert_no_op() {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = Arc::new(ScriptedAccelerometer::with_availability(false));
    let observer = RecordingObserver::new();
    let mut listener = OrientationListener::new(
        source.clone(),
        Arc::new(FixedRotationSettings(true)),
        Arc::new(observer.clone()),
    );

    assert!(!listener.can_detect_orientation());
    assert!(listener.enable().is_ok());
    assert!(!listener.is_enabled());
    assert!(!source.is_subscribed());
    assert_eq!(listener.current_rotation(), None);
}

#[test]
fn test_late_samples_after_disable_are_ignored() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    source.deliver(motions::sample_at(0.0, 20.0));
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg0));

    // A sloppy source might hold onto its sink past cancellation.
    let stale_sink = source.sink_handle().expect("sink while enabled");
    listener.disable();
    assert!(!listener.is_enabled());
    assert!(!source.is_subscribed());
    assert_eq!(listener.current_rotation(), None);

    observer.clear();
    stale_sink.deliver(motions::sample_at(270.0, 20.0));
    assert!(observer.events().is_empty());
    assert_eq!(listener.current_rotation(), None);
}

#[test]
fn test_repeated_samples_notify_at_most_once() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    assert_eq!(source.deliver_all(motions::hold(90.0, 20.0, 50)), 50);
    assert_eq!(observer.events(), vec![Rotation::Deg270]);
}

#[test]
fn test_reenabling_forgets_the_previous_rotation() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    source.deliver(motions::sample_at(270.0, 20.0));
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg90));

    listener.disable();
    assert_eq!(listener.current_rotation(), None);

    observer.clear();
    listener.enable().unwrap();
    assert!(listener.is_enabled());
    assert_eq!(listener.current_rotation(), None);

    // The same pose commits and fires again after the reset.
    source.deliver(motions::sample_at(270.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg90]);
}

#[test]
fn test_enable_is_idempotent() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    source.deliver(motions::sample_at(0.0, 20.0));

    listener.enable().unwrap();
    assert!(listener.is_enabled());
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg0));
    source.deliver(motions::sample_at(0.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg0]);
}

#[test]
fn test_out_of_gate_tilt_on_either_side_never_decides() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();

    source.deliver(motions::flat_on_table());
    source.deliver(motions::sample_at(0.0, 80.0));
    source.deliver(motions::sample_at(0.0, -45.0));
    assert!(observer.events().is_empty());
    assert_eq!(listener.current_rotation(), None);
}

#[test]
fn test_gated_interlude_preserves_the_committed_rotation() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();
    source.deliver(motions::sample_at(270.0, 20.0));
    assert_eq!(observer.events(), vec![Rotation::Deg90]);

    // Laid flat for a while; the committed rotation must survive the
    // run of gated samples.
    assert_eq!(source.deliver_all(vec![motions::flat_on_table(); 20]), 20);
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg90));
    assert_eq!(observer.events(), vec![Rotation::Deg90]);

    // Picked back up inside the sticky dead band: only the preserved
    // history keeps this at Deg90, and the unchanged value must not
    // fire the callback again.
    source.deliver(motions::sample_at(310.0, 20.0));
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg90));
    assert_eq!(observer.events(), vec![Rotation::Deg90]);
}

#[test]
fn test_snapshot_reads_while_another_thread_delivers() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (source, observer, mut listener) = setup(true);
    listener.enable().unwrap();

    let delivery_source = source.clone();
    let delivery = std::thread::spawn(move || {
        delivery_source.deliver_all(motions::sweep(0.0, 90.0, 91, 20.0))
    });

    // Poll the snapshot while the sweep runs; mid-flight reads must
    // only ever see a rotation the sweep actually committed.
    while !delivery.is_finished() {
        if let Some(rotation) = listener.current_rotation() {
            assert!(matches!(rotation, Rotation::Deg0 | Rotation::Deg270));
        }
    }

    assert_eq!(delivery.join().unwrap(), 91);
    assert_eq!(listener.current_rotation(), Some(Rotation::Deg270));
    assert_eq!(observer.events(), vec![Rotation::Deg0, Rotation::Deg270]);
}
