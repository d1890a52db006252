//! # Scale Constraints
//!
//! Minimum/maximum scale limits and the uniform clamp applied to every
//! candidate scale while a corner handle is dragged.
//!
//! Each pass corrects the whole vector by the ratio of the single worst
//! offending axis. For uniform limits and a uniformly scaled target this lands
//! exactly on the limit. For non-uniform limits the minimum pass can push an
//! axis back over its maximum.

use cgmath::Vector3;

use crate::error::{Result, RigError};

/// Component-wise scale bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    pub minimum: Vector3<f32>,
    pub maximum: Vector3<f32>,
}

impl ScaleLimits {
    /// Limits expressed as multiples of `initial`
    pub fn relative(initial: Vector3<f32>, minimum: f32, maximum: f32) -> Result<Self> {
        validate(minimum, maximum)?;
        Ok(Self {
            minimum: initial * minimum,
            maximum: initial * maximum,
        })
    }

    /// The same absolute limits on every axis
    pub fn absolute(minimum: f32, maximum: f32) -> Result<Self> {
        validate(minimum, maximum)?;
        Ok(Self {
            minimum: Vector3::new(minimum, minimum, minimum),
            maximum: Vector3::new(maximum, maximum, maximum),
        })
    }

    pub fn clamp(&self, candidate: Vector3<f32>) -> Vector3<f32> {
        clamp_scale(candidate, self.minimum, self.maximum)
    }

    /// Whether `scale` lies within the limits on every axis, with tolerance `epsilon`
    pub fn contains(&self, scale: Vector3<f32>, epsilon: f32) -> bool {
        (0..3).all(|i| scale[i] >= self.minimum[i] - epsilon && scale[i] <= self.maximum[i] + epsilon)
    }
}

fn validate(minimum: f32, maximum: f32) -> Result<()> {
    if !minimum.is_finite() || !maximum.is_finite() || minimum < 0.0 || minimum > maximum {
        return Err(RigError::InvalidScaleLimits {
            min: minimum,
            max: maximum,
        });
    }
    Ok(())
}

/// Clamp `candidate` into `[minimum, maximum]` by uniform corrections.
///
/// If any axis exceeds its maximum, the vector is divided by the largest
/// `scale / maximum` ratio. The result then goes through the minimum pass: if
/// any axis is below its minimum, it is divided by the smallest
/// `scale / minimum` ratio among axes with a positive minimum. Axes that are
/// still below their minimum after both passes (collapsed or inverted ones)
/// are raised to it.
pub fn clamp_scale(candidate: Vector3<f32>, minimum: Vector3<f32>, maximum: Vector3<f32>) -> Vector3<f32> {
    let mut scale = candidate;

    if (0..3).any(|i| scale[i] > maximum[i]) {
        let mut ratio = 0.0f32;
        for i in 0..3 {
            if maximum[i] > 0.0 {
                ratio = ratio.max(scale[i] / maximum[i]);
            }
        }
        if ratio > 0.0 {
            scale /= ratio;
        }
    }

    if (0..3).any(|i| scale[i] < minimum[i]) {
        let mut ratio = 1.0f32;
        for i in 0..3 {
            if minimum[i] > 0.0 {
                ratio = ratio.min(scale[i] / minimum[i]);
            }
        }
        if ratio > 0.0 {
            scale /= ratio;
        }
    }

    for i in 0..3 {
        if scale[i] < minimum[i] {
            scale[i] = minimum[i];
        }
    }
    scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const TEST_EPSILON: f32 = 1e-6;

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < TEST_EPSILON, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_relative_limits_from_unit_scale() {
        let limits = ScaleLimits::relative(Vector3::new(1.0, 1.0, 1.0), 0.2, 2.0).unwrap();

        assert_eq!(limits.minimum, Vector3::new(0.2, 0.2, 0.2));
        assert_eq!(limits.maximum, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_clamp_over_maximum_is_exact() {
        let limits = ScaleLimits::relative(Vector3::new(1.0, 1.0, 1.0), 0.2, 2.0).unwrap();
        assert_eq!(limits.clamp(Vector3::new(3.0, 3.0, 3.0)), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_clamp_under_minimum() {
        let limits = ScaleLimits::absolute(0.5, 4.0).unwrap();
        assert_vec_eq(limits.clamp(Vector3::new(0.25, 0.25, 0.25)), Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_within_limits_untouched() {
        let limits = ScaleLimits::absolute(0.5, 4.0).unwrap();
        let scale = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(limits.clamp(scale), scale);
    }

    #[test]
    fn test_clamp_keeps_proportions() {
        let limits = ScaleLimits::relative(Vector3::new(1.0, 2.0, 4.0), 0.5, 2.0).unwrap();
        let clamped = limits.clamp(Vector3::new(3.0, 6.0, 12.0));

        assert_vec_eq(clamped, Vector3::new(2.0, 4.0, 8.0));
        assert!(limits.contains(clamped, TEST_EPSILON));
    }

    #[test]
    fn test_minimum_pass_runs_after_maximum_pass() {
        // Non-uniform limits: the maximum correction pushes y and z under
        // their minimum, the minimum correction then pushes x back over its
        // maximum. Both passes use only the worst axis.
        let minimum = Vector3::new(1.0, 1.0, 1.0);
        let maximum = Vector3::new(2.0, 10.0, 10.0);

        let clamped = clamp_scale(Vector3::new(4.0, 1.5, 1.5), minimum, maximum);

        assert_vec_eq(clamped, Vector3::new(8.0 / 3.0, 1.0, 1.0));
        assert!(clamped.x > maximum.x);
    }

    #[test]
    fn test_zero_minimum_axes_are_ignored() {
        let minimum = Vector3::new(0.0, 0.5, 0.0);
        let maximum = Vector3::new(10.0, 10.0, 10.0);

        let clamped = clamp_scale(Vector3::new(0.1, 0.25, 0.1), minimum, maximum);
        assert_vec_eq(clamped, Vector3::new(0.2, 0.5, 0.2));
    }

    #[test]
    fn test_inverted_and_collapsed_candidates() {
        let limits = ScaleLimits::absolute(0.2, 2.0).unwrap();

        // Dragging past the pivot flips the sign; the clamp lands on the minimum
        assert_vec_eq(limits.clamp(Vector3::new(-0.5, -0.5, -0.5)), Vector3::new(0.2, 0.2, 0.2));
        assert_vec_eq(limits.clamp(Vector3::new(0.0, 0.0, 0.0)), Vector3::new(0.2, 0.2, 0.2));
        assert_vec_eq(limits.clamp(Vector3::new(-0.5, 0.5, 0.5)), Vector3::new(0.2, 0.5, 0.5));
    }

    #[test]
    fn test_zero_minimum_never_goes_negative() {
        let limits = ScaleLimits::absolute(0.0, 2.0).unwrap();

        let clamped = limits.clamp(Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(clamped, Vector3::new(0.0, 0.0, 0.0));
        assert!(limits.contains(clamped, 0.0));
    }

    #[test]
    fn test_invalid_limits_rejected() {
        assert!(ScaleLimits::absolute(2.0, 1.0).is_err());
        assert!(ScaleLimits::absolute(-1.0, 1.0).is_err());
        assert!(ScaleLimits::relative(Vector3::new(1.0, 1.0, 1.0), 0.1, f32::NAN).is_err());
        assert!(ScaleLimits::absolute(1.0, 1.0).is_ok());
    }
}
