//! Heading and planar helpers.
//!
//! Conventions (right-handed, +Y up):
//! - yaw `0` faces +Z
//! - positive yaw turns toward the avatar's right
//! - `forward(yaw) = (-sin yaw, 0, cos yaw)`, `right = forward x up`

use nalgebra::{UnitQuaternion, Vector3};
use std::f32::consts::TAU;

use crate::constants::PLANAR_AXIS_EPS;

/// Wrap a yaw angle into `[0, 2π)`.
#[inline]
pub fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = yaw.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit forward vector for `yaw`.
#[inline]
pub fn heading_forward(yaw: f32) -> Vector3<f32> {
    Vector3::new(-yaw.sin(), 0.0, yaw.cos())
}

/// Unit right vector for `yaw`.
#[inline]
pub fn heading_right(yaw: f32) -> Vector3<f32> {
    heading_forward(yaw).cross(&Vector3::y())
}

/// Yaw-only rotation mapping +Z onto `heading_forward(yaw)`.
#[inline]
pub fn heading_rotation(yaw: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -yaw)
}

/// Project `axis` onto the horizontal plane and normalize it.
///
/// Returns `None` when the axis is non-finite or (nearly) vertical.
pub fn flatten_axis(axis: Vector3<f32>) -> Option<Vector3<f32>> {
    if !(axis.x.is_finite() && axis.y.is_finite() && axis.z.is_finite()) {
        return None;
    }
    Vector3::new(axis.x, 0.0, axis.z).try_normalize(PLANAR_AXIS_EPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).norm() < 1.0e-5, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn yaw_zero_faces_positive_z() {
        assert_vec_eq(heading_forward(0.0), Vector3::new(0.0, 0.0, 1.0));
        assert_vec_eq(heading_right(0.0), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn quarter_turn_right_faces_old_right() {
        assert_vec_eq(heading_forward(FRAC_PI_2), heading_right(0.0));
    }

    #[test]
    fn rotation_agrees_with_forward() {
        for yaw in [0.0, 0.3, 1.7, 4.0] {
            let rotated = heading_rotation(yaw) * Vector3::z();
            assert_vec_eq(rotated, heading_forward(yaw));
        }
    }

    #[test]
    fn wrap_yaw_stays_in_range() {
        assert!((wrap_yaw(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1.0e-5);
        assert!((wrap_yaw(TAU + 1.0) - 1.0).abs() < 1.0e-5);
        let tiny = wrap_yaw(-1.0e-9);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn flatten_axis_drops_pitch() {
        let tilted = Vector3::new(0.0, -0.8, 0.6);
        assert_vec_eq(flatten_axis(tilted).unwrap(), Vector3::z());
        assert_eq!(flatten_axis(Vector3::new(0.0, -1.0, 0.0)), None);
        assert_eq!(flatten_axis(Vector3::new(f32::NAN, 0.0, 1.0)), None);
    }
}
