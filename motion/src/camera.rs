//! Camera basis used for camera-relative movement.
//!
//! The controller doesn't know what a camera is. It asks a [`CameraRig`] for a forward/right
//! pair once per tick and flattens both onto the ground plane. An axis pointing straight up or
//! down is rebuilt from the other one, so the pair stays orthogonal. When the rig has nothing to
//! offer (no camera yet, or both axes vertical) the avatar's own heading is used instead.

use nalgebra::{Vector2, Vector3};

use crate::utils::{flatten_axis, heading_forward, heading_right};

/// A forward/right pair in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
}

impl CameraBasis {
    pub fn new(forward: Vector3<f32>, right: Vector3<f32>) -> Self {
        Self { forward, right }
    }

    /// The basis of an avatar facing `yaw`.
    pub fn from_yaw(yaw: f32) -> Self {
        Self {
            forward: heading_forward(yaw),
            right: heading_right(yaw),
        }
    }

    /// Both axes projected to the horizontal plane and normalized.
    ///
    /// An axis that can't be flattened is derived from the other (`forward = up x right`,
    /// `right = forward x up`). Only when neither survives is `fallback` used whole.
    /// Returns the planar basis and whether `fallback` was used.
    pub fn planar_or(&self, fallback: &CameraBasis) -> (CameraBasis, bool) {
        let up = Vector3::y();
        match (flatten_axis(self.forward), flatten_axis(self.right)) {
            (Some(forward), Some(right)) => (CameraBasis { forward, right }, false),
            (None, Some(right)) => (
                CameraBasis {
                    forward: up.cross(&right),
                    right,
                },
                false,
            ),
            (Some(forward), None) => (
                CameraBasis {
                    forward,
                    right: forward.cross(&up),
                },
                false,
            ),
            (None, None) => (*fallback, true),
        }
    }

    /// World direction for a planar move axis: `right * x + forward * y`.
    #[inline]
    pub fn direction(&self, move_axis: Vector2<f32>) -> Vector3<f32> {
        self.right * move_axis.x + self.forward * move_axis.y
    }
}

/// Read-only provider of the camera basis.
pub trait CameraRig {
    /// Current basis, or `None` if no camera is available.
    fn basis(&self) -> Option<CameraBasis>;
}

impl CameraRig for CameraBasis {
    fn basis(&self) -> Option<CameraBasis> {
        Some(*self)
    }
}

impl<T: CameraRig> CameraRig for Option<T> {
    fn basis(&self) -> Option<CameraBasis> {
        self.as_ref().and_then(CameraRig::basis)
    }
}

/// No camera. Movement is always relative to the avatar's heading.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCamera;

impl CameraRig for NoCamera {
    fn basis(&self) -> Option<CameraBasis> {
        None
    }
}
