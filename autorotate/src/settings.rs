//! The user preference gating upside-down rotation.

use std::sync::atomic::{AtomicBool, Ordering};

/// Read side of the rotation preferences.
///
/// Polled at every decision rather than cached, so a preference flip
/// takes effect on the next sample without re-subscribing.
pub trait RotationSettings: Send + Sync {
    /// Whether the listener may commit `Deg180`.
    fn allow_180_rotation(&self) -> bool;
}

/// A preference fixed at construction time.
#[derive(Debug, Clone, Copy)]
pub struct FixedRotationSettings(pub bool);

impl RotationSettings for FixedRotationSettings {
    fn allow_180_rotation(&self) -> bool {
        self.0
    }
}

/// A preference a policy owner can flip at runtime.
///
/// Share it as an `Arc` between the flipping side and the listener;
/// reads and writes are relaxed atomics since a stale read for one
/// sample period is harmless.
#[derive(Debug, Default)]
pub struct SharedRotationSettings {
    allow_180: AtomicBool,
}

impl SharedRotationSettings {
    pub fn new(allow_180: bool) -> Self {
        SharedRotationSettings {
            allow_180: AtomicBool::new(allow_180),
        }
    }

    pub fn set_allow_180_rotation(&self, allow: bool) {
        self.allow_180.store(allow, Ordering::Relaxed);
    }
}

impl RotationSettings for SharedRotationSettings {
    fn allow_180_rotation(&self) -> bool {
        self.allow_180.load(Ordering::Relaxed)
    }
}
