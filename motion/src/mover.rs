use nalgebra::Vector3;

/// Result of a single collision-aware move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveReport {
    /// Translation actually applied after collision (meters).
    pub applied: Vector3<f32>,
    /// Whether the avatar rests on a supporting surface after the move.
    pub grounded: bool,
}

/// "Move with collision" primitive the controller drives.
///
/// Implementations apply `displacement` to the avatar honoring world collision and report
/// support. The controller calls this exactly twice per tick: horizontal, then vertical.
pub trait CollisionMover {
    fn move_by(&mut self, displacement: Vector3<f32>) -> MoveReport;
}

impl<M: CollisionMover + ?Sized> CollisionMover for &mut M {
    fn move_by(&mut self, displacement: Vector3<f32>) -> MoveReport {
        (**self).move_by(displacement)
    }
}

/// Mover with no world: every displacement applies fully, and support is a flat floor at
/// `floor_y`.
///
/// Handy for headless simulation and tests where the Rapier world would be overkill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatGroundMover {
    pub position: Vector3<f32>,
    pub floor_y: f32,
}

impl FlatGroundMover {
    pub fn new(position: Vector3<f32>, floor_y: f32) -> Self {
        Self { position, floor_y }
    }
}

impl CollisionMover for FlatGroundMover {
    fn move_by(&mut self, displacement: Vector3<f32>) -> MoveReport {
        let start = self.position;
        let mut end = start + displacement;
        if end.y <= self.floor_y {
            end.y = self.floor_y;
        }
        self.position = end;

        MoveReport {
            applied: end - start,
            grounded: end.y <= self.floor_y,
        }
    }
}
