//! Per-tick input snapshot.
//!
//! The controller never subscribes to an input system. Whatever owns the devices produces an
//! [`InputSnapshot`] (directly, or through an [`InputSource`]) and the controller reads it once
//! per tick.

use nalgebra::Vector2;

/// Everything the motion controller reads from input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Planar move axis. `x` = strafe right, `y` = forward.
    pub move_axis: Vector2<f32>,
    /// Look delta for this frame. Only `x` (yaw) is consumed.
    pub look_delta: Vector2<f32>,
    /// Jump went down since the last snapshot (edge).
    pub jump_pressed: bool,
    /// Jump is currently held (level).
    pub jump_held: bool,
}

/// Something that can be polled for the current input snapshot.
///
/// Implemented by the client's action-state adapter, and by scripted sources in tests.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn poll(&mut self) -> InputSnapshot {
        *self
    }
}

/// Zero an axis that contains NaN or infinity.
#[inline]
pub fn sanitize_axis(axis: Vector2<f32>) -> (Vector2<f32>, bool) {
    if axis.x.is_finite() && axis.y.is_finite() {
        (axis, false)
    } else {
        (Vector2::zeros(), true)
    }
}

/// Zero a non-finite move axis and normalize one longer than 1.
#[inline]
pub fn sanitize_move_axis(axis: Vector2<f32>) -> (Vector2<f32>, bool) {
    let (axis, dirty) = sanitize_axis(axis);
    let len_sq = axis.norm_squared();
    if len_sq > 1.0 {
        (axis / len_sq.sqrt(), true)
    } else {
        (axis, dirty)
    }
}
