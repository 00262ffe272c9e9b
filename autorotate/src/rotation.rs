//! Discrete screen rotation values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four rotations a display can compensate a device turn with.
///
/// `Deg0` is the device's natural (portrait) orientation. The value counts
/// the counter-clockwise rotation applied to displayed content, which
/// cancels an equal clockwise physical rotation of the device: a device
/// turned a quarter turn clockwise shows its content at `Deg270`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Natural orientation.
    Deg0,
    /// Device resting on its left edge (quarter turn counter-clockwise).
    Deg90,
    /// Device upside down.
    Deg180,
    /// Device resting on its right edge (quarter turn clockwise).
    Deg270,
}

impl Rotation {
    /// Content rotation in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Inverse of [`Rotation::degrees`]; `None` for anything but an exact
    /// quarter turn.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// True for the two portrait rotations (0° and 180°).
    pub fn is_portrait(&self) -> bool {
        matches!(self, Rotation::Deg0 | Rotation::Deg180)
    }

    /// True for the two landscape rotations (90° and 270°).
    pub fn is_landscape(&self) -> bool {
        !self.is_portrait()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_round_trip() {
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            assert_eq!(Rotation::from_degrees(rotation.degrees()), Some(rotation));
        }
    }

    #[test]
    fn test_from_degrees_rejects_off_grid_values() {
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(360), None);
        assert_eq!(Rotation::from_degrees(91), None);
    }

    #[test]
    fn test_portrait_landscape_split() {
        assert!(Rotation::Deg0.is_portrait());
        assert!(Rotation::Deg180.is_portrait());
        assert!(Rotation::Deg90.is_landscape());
        assert!(Rotation::Deg270.is_landscape());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rotation::Deg0.to_string(), "0°");
        assert_eq!(Rotation::Deg270.to_string(), "270°");
    }
}
