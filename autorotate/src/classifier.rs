//! Stateful classification of accelerometer samples into rotations.

use crate::rotation::Rotation;
use crate::rules::{resolve, tilt_in_gate, TILT_PIVOT};
use crate::sample::AccelSample;

/// Classifies a stream of accelerometer samples into screen rotations.
///
/// The classifier holds the last committed rotation and nothing else;
/// it does no filtering or time integration. [`evaluate`] is a pure
/// function of one sample and that state, so callers decide which
/// proposals actually become commitments.
///
/// [`evaluate`]: SectorClassifier::evaluate
#[derive(Debug)]
pub struct SectorClassifier {
    rotation: Option<Rotation>,
}

impl SectorClassifier {
    /// New classifier with no committed rotation.
    pub fn new() -> Self {
        SectorClassifier { rotation: None }
    }

    /// The last committed rotation, if any.
    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }

    /// Propose a rotation for one sample, or `None` when the sample
    /// supports no decision.
    ///
    /// Degenerate samples and samples tilted outside the decision gate
    /// (see [`tilt_in_gate`]) yield `None`; the committed state is left
    /// untouched either way.
    pub fn evaluate(&self, sample: AccelSample) -> Option<Rotation> {
        let tilt = sample.tilt_angle()?;
        if !tilt_in_gate(tilt) {
            return None;
        }
        let orientation = sample.orientation_angle()? as f32;
        Some(resolve(orientation, tilt - TILT_PIVOT, self.rotation))
    }

    /// Commit a rotation, returning whether it differs from the previous
    /// commitment.
    pub fn commit(&mut self, rotation: Rotation) -> bool {
        let changed = self.rotation != Some(rotation);
        if changed {
            log::debug!(
                "rotation commit: {:?} -> {}",
                self.rotation,
                rotation
            );
        }
        self.rotation = Some(rotation);
        changed
    }

    /// Forget the committed rotation, returning to the unknown state.
    pub fn reset(&mut self) {
        self.rotation = None;
    }
}

impl Default for SectorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
