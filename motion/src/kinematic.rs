//! Rapier-backed collision mover.
//!
//! Wraps `KinematicCharacterController::move_shape` as a [`CollisionMover`]. The mover borrows
//! the query pipeline for one tick and writes the corrected translation back into the avatar
//! position it was handed.

use nalgebra::{Isometry3, Vector3};
use rapier3d::control::KinematicCharacterController;
use rapier3d::prelude::{Capsule, QueryPipeline};

use crate::{CollisionMover, MoveReport};

/// Capsule specification for the avatar.
///
/// `half_height` is the half-length of the cylinder section (aligned with +Y), so the total
/// capsule height is `2 * half_height + 2 * radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

impl CapsuleSpec {
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    /// Distance from the capsule center to its lowest point.
    #[inline]
    pub fn foot_offset(&self) -> f32 {
        self.half_height + self.radius
    }

    #[inline]
    pub fn shape(&self) -> Capsule {
        Capsule::new_y(self.half_height, self.radius)
    }
}

impl Default for CapsuleSpec {
    fn default() -> Self {
        Self {
            radius: 0.4,
            half_height: 0.5,
        }
    }
}

/// One tick's worth of Rapier KCC movement for a single capsule.
pub struct RapierMover<'a, 'q> {
    query_pipeline: &'a QueryPipeline<'q>,
    controller: &'a KinematicCharacterController,
    capsule: Capsule,
    position: &'a mut Vector3<f32>,
    dt: f32,
}

impl<'a, 'q> RapierMover<'a, 'q> {
    /// `position` is the capsule center; it is updated in place by every move.
    pub fn new(
        query_pipeline: &'a QueryPipeline<'q>,
        controller: &'a KinematicCharacterController,
        capsule: CapsuleSpec,
        position: &'a mut Vector3<f32>,
        dt: f32,
    ) -> Self {
        Self {
            query_pipeline,
            controller,
            capsule: capsule.shape(),
            position,
            dt,
        }
    }
}

impl CollisionMover for RapierMover<'_, '_> {
    fn move_by(&mut self, displacement: Vector3<f32>) -> MoveReport {
        let pose = Isometry3::translation(self.position.x, self.position.y, self.position.z);

        let corrected = self.controller.move_shape(
            self.dt,
            self.query_pipeline,
            &self.capsule,
            &pose,
            displacement,
            |_| {},
        );

        *self.position += corrected.translation;

        MoveReport {
            applied: corrected.translation,
            grounded: corrected.grounded,
        }
    }
}
