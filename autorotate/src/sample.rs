//! Accelerometer sample model and angle derivation.
//!
//! Converts raw three-axis acceleration into the two angles the rotation
//! rules consume: the orientation of gravity within the screen plane and
//! the tilt of the screen out of that plane.

use serde::{Deserialize, Serialize};

/// Conversion factor from radians to degrees.
///
/// The rotation thresholds were tuned against this exact constant; keep it
/// as written rather than substituting a higher-precision value.
pub const DEGREES_PER_RADIAN: f32 = 57.29577957855;

/// Nominal gravitational acceleration in m/s².
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Magnitude floor in m/s² below which a sample's direction is meaningless.
///
/// Free fall or a glitched reading produces a near-zero vector whose angles
/// are numeric noise; such samples are discarded before any angle math.
pub const MIN_VALID_MAGNITUDE: f32 = 0.1;

/// One accelerometer reading in m/s², device coordinates.
///
/// +X points out the right edge of the screen, +Y out the top edge, +Z out
/// of the screen toward the viewer. A device held upright reads close to
/// `(0, +9.8, 0)`; flat on a table it reads `(0, 0, +9.8)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelSample {
    /// Acceleration along the device X axis in m/s²
    pub x: f32,
    /// Acceleration along the device Y axis in m/s²
    pub y: f32,
    /// Acceleration along the device Z axis in m/s²
    pub z: f32,
}

impl AccelSample {
    /// Create a sample from raw axis readings.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the acceleration vector.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True when the sample carries no usable direction: a non-finite axis
    /// or a magnitude below [`MIN_VALID_MAGNITUDE`].
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite())
            || self.magnitude() < MIN_VALID_MAGNITUDE
    }

    /// Tilt of the screen out of the gravity plane, in degrees.
    ///
    /// 0 means gravity lies in the screen plane (device held vertically),
    /// +90 means flat on a table screen up, -90 flat screen down. Returns
    /// `None` for degenerate samples. The asin argument is clamped to
    /// [-1, 1] so accumulated float error cannot produce NaN.
    pub fn tilt_angle(&self) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        let ratio = (self.z / self.magnitude()).clamp(-1.0, 1.0);
        Some(ratio.asin() * DEGREES_PER_RADIAN)
    }

    /// Clockwise angle of the device relative to its natural upright
    /// orientation, in whole degrees `[0, 359]`.
    ///
    /// Computed as `90 - round(atan2(y, -x))` in degrees, then wrapped into
    /// range. Rounding is `f32::round` (half away from zero); the rule
    /// thresholds sit far from any half-degree boundary, so the choice only
    /// matters for reproducibility. Returns `None` for degenerate samples.
    pub fn orientation_angle(&self) -> Option<i32> {
        if self.is_degenerate() {
            return None;
        }
        let angle = self.y.atan2(-self.x) * DEGREES_PER_RADIAN;
        Some(normalize_360(90 - angle.round() as i32))
    }
}

/// Wrap an angle into `[0, 360)` by repeated 360° shifts.
fn normalize_360(mut degrees: i32) -> i32 {
    while degrees >= 360 {
        degrees -= 360;
    }
    while degrees < 0 {
        degrees += 360;
    }
    degrees
}
