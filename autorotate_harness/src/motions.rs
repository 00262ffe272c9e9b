//! Trace builders: synthetic gravity vectors from target angles.
//!
//! Inverse of the sample module's angle extraction at exactly 1 g, so a
//! trace built here reads back the orientation and tilt it was built
//! from (orientation to the nearest whole degree).

use autorotate::sample::{AccelSample, STANDARD_GRAVITY};

/// Gravity vector for a device at the given orientation and tilt, both
/// in degrees.
///
/// Angles are periodic, so orientations outside [0, 360) are fine and
/// wrap where expected; tilt is meaningful over [-90, 90].
pub fn sample_at(orientation: f32, tilt: f32) -> AccelSample {
    let phi = (90.0 - orientation).to_radians();
    let tilt_rad = tilt.to_radians();
    let horizontal = STANDARD_GRAVITY * tilt_rad.cos();
    AccelSample::new(
        -horizontal * phi.cos(),
        horizontal * phi.sin(),
        STANDARD_GRAVITY * tilt_rad.sin(),
    )
}

/// `n` identical samples at one pose.
pub fn hold(orientation: f32, tilt: f32, n: usize) -> Vec<AccelSample> {
    vec![sample_at(orientation, tilt); n]
}

/// Linear sweep from one orientation to another at constant tilt,
/// `steps` samples with both endpoints included.
///
/// Endpoints need not stay inside [0, 360): a sweep from 350 to 370
/// passes through the wrap upward, and one from 10 to -10 downward.
pub fn sweep(from: f32, to: f32, steps: usize, tilt: f32) -> Vec<AccelSample> {
    match steps {
        0 => Vec::new(),
        1 => vec![sample_at(from, tilt)],
        _ => {
            let last = (steps - 1) as f32;
            (0..steps)
                .map(|i| sample_at(from + (to - from) * i as f32 / last, tilt))
                .collect()
        }
    }
}

/// A device lying flat on its back, screen up. Fully tilted, so the
/// classifier makes no decision from it.
pub fn flat_on_table() -> AccelSample {
    AccelSample::new(0.0, 0.0, STANDARD_GRAVITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_at_reads_back_its_own_angles() {
        for orientation in (0..360).step_by(15) {
            for tilt in [-5.0_f32, 0.0, 20.0, 45.0, 60.0] {
                let sample = sample_at(orientation as f32, tilt);
                assert_relative_eq!(sample.magnitude(), STANDARD_GRAVITY, epsilon = 1e-4);
                assert_eq!(
                    sample.orientation_angle(),
                    Some(orientation),
                    "orientation {orientation} at tilt {tilt}"
                );
                assert_relative_eq!(sample.tilt_angle().unwrap(), tilt, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_orientation_wraps_outside_the_circle() {
        assert_eq!(sample_at(360.0, 20.0).orientation_angle(), Some(0));
        assert_eq!(sample_at(365.0, 20.0).orientation_angle(), Some(5));
        assert_eq!(sample_at(-10.0, 20.0).orientation_angle(), Some(350));
    }

    #[test]
    fn test_hold_repeats_one_pose() {
        let trace = hold(90.0, 20.0, 5);
        assert_eq!(trace.len(), 5);
        assert!(trace.iter().all(|sample| *sample == trace[0]));
    }

    #[test]
    fn test_sweep_includes_both_endpoints() {
        let trace = sweep(0.0, 90.0, 10, 20.0);
        assert_eq!(trace.len(), 10);
        assert_eq!(trace[0].orientation_angle(), Some(0));
        assert_eq!(trace[9].orientation_angle(), Some(90));

        assert!(sweep(0.0, 90.0, 0, 20.0).is_empty());
        assert_eq!(sweep(0.0, 90.0, 1, 20.0).len(), 1);
    }

    #[test]
    fn test_sweep_crosses_the_wrap() {
        let trace = sweep(350.0, 370.0, 21, 20.0);
        let angles: Vec<_> = trace
            .iter()
            .map(|sample| sample.orientation_angle().unwrap())
            .collect();
        assert_eq!(angles.first(), Some(&350));
        assert_eq!(angles[10], 0);
        assert_eq!(angles.last(), Some(&10));
    }

    #[test]
    fn test_flat_on_table_is_fully_tilted() {
        let sample = flat_on_table();
        assert_relative_eq!(sample.tilt_angle().unwrap(), 90.0, epsilon = 1e-3);
    }
}
