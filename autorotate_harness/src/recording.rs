//! An observer that records rotation changes for assertions.

use std::sync::{Arc, Mutex};

use autorotate::listener::RotationObserver;
use autorotate::rotation::Rotation;

/// Collects every rotation-change callback in order.
///
/// Clones share the same event log, so a test can hand one clone to a
/// listener and keep another for assertions.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<Rotation>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rotations observed so far, oldest first.
    pub fn events(&self) -> Vec<Rotation> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl RotationObserver for RecordingObserver {
    fn on_rotation_changed(&self, rotation: Rotation) {
        self.events.lock().unwrap().push(rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_event_log() {
        let observer = RecordingObserver::new();
        let clone = observer.clone();
        observer.on_rotation_changed(Rotation::Deg90);
        clone.on_rotation_changed(Rotation::Deg0);
        assert_eq!(observer.events(), vec![Rotation::Deg90, Rotation::Deg0]);
        observer.clear();
        assert!(clone.events().is_empty());
    }
}
