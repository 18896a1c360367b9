//! Glam <-> nalgebra conversions at the engine boundary.

use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector2, Vector3};

#[inline]
pub fn to_na(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na2(v: Vec2) -> Vector2<f32> {
    Vector2::new(v.x, v.y)
}

#[inline]
pub fn to_bevy(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn quat_to_bevy(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// Avatar render rotation for `yaw`, so that `Transform::forward()` points along the heading.
#[inline]
pub fn avatar_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(std::f32::consts::PI - yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion::heading_forward;

    #[test]
    fn avatar_forward_matches_heading() {
        for yaw in [0.0_f32, 0.7, 1.9, 4.0] {
            let tf = Transform::from_rotation(avatar_rotation(yaw));
            let expected = to_bevy(&heading_forward(yaw));
            assert!(tf.forward().as_vec3().abs_diff_eq(expected, 1.0e-5));
        }
    }

    #[test]
    fn quaternion_conversion_preserves_rotation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.5);
        let v = quat_to_bevy(&q) * Vec3::Z;
        assert!(v.abs_diff_eq(to_bevy(&(q * Vector3::z())), 1.0e-5));
    }
}
