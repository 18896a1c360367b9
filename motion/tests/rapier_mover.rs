use motion::{
    CapsuleSpec, ColliderShapeDef, KccSettings, MotionController, MotionSettings, NoCamera,
    RapierMover, RapierQueryWorld, TickReport, WorldStaticDef,
};
use nalgebra::{Vector2, Vector3};
use rapier3d::control::KinematicCharacterController;
use rapier3d::prelude::{QueryFilter, QueryPipeline};

const DT: f32 = 1.0 / 60.0;

struct Rig {
    controller: MotionController,
    kcc: KinematicCharacterController,
    capsule: CapsuleSpec,
    position: Vector3<f32>,
}

impl Rig {
    fn new(start_height: f32) -> Self {
        let capsule = CapsuleSpec::default();
        Self {
            controller: MotionController::new(MotionSettings::default()).unwrap(),
            kcc: KccSettings::default().controller(),
            capsule,
            position: Vector3::new(0.0, capsule.foot_offset() + start_height, 0.0),
        }
    }

    fn tick(&mut self, query_pipeline: &QueryPipeline<'_>) -> TickReport {
        let mut mover = RapierMover::new(
            query_pipeline,
            &self.kcc,
            self.capsule,
            &mut self.position,
            DT,
        );
        self.controller.tick(DT, &NoCamera, &mut mover)
    }

    fn settle(&mut self, query_pipeline: &QueryPipeline<'_>) {
        for _ in 0..120 {
            self.tick(query_pipeline);
        }
        assert!(self.controller.state().is_grounded);
    }

    fn foot_gap(&self) -> f32 {
        self.position.y - self.capsule.foot_offset()
    }
}

fn flat_world() -> RapierQueryWorld {
    RapierQueryWorld::build(vec![WorldStaticDef::ground(0, 0.0)])
}

#[test]
fn falls_and_rests_on_ground() {
    let world = flat_world();
    let qp = world.query_pipeline(QueryFilter::default());
    let mut rig = Rig::new(0.5);

    let mut landed = 0;
    for _ in 0..120 {
        if rig.tick(&qp).landed {
            landed += 1;
        }
    }

    assert!(landed >= 1);
    assert!(rig.controller.state().is_grounded);
    assert!(rig.foot_gap().abs() < 0.1, "gap {}", rig.foot_gap());
}

#[test]
fn jump_leaves_ground_and_lands_again() {
    let world = flat_world();
    let qp = world.query_pipeline(QueryFilter::default());
    let mut rig = Rig::new(0.0);
    rig.settle(&qp);

    rig.controller.on_jump_requested();
    rig.controller.set_jump_held(true);

    let mut jumped = false;
    let mut landed = false;
    let mut peak = rig.foot_gap();
    for _ in 0..300 {
        let report = rig.tick(&qp);
        jumped |= report.jumped;
        peak = peak.max(rig.foot_gap());
        if jumped && report.landed {
            landed = true;
            break;
        }
    }

    assert!(jumped);
    assert!(peak > 3.0, "peak {peak}");
    assert!(landed);
    assert!(rig.foot_gap().abs() < 0.1);
}

#[test]
fn walks_forward_along_heading() {
    let world = flat_world();
    let qp = world.query_pipeline(QueryFilter::default());
    let mut rig = Rig::new(0.0);
    rig.settle(&qp);
    let start = rig.position;

    rig.controller.on_move_input(Vector2::new(0.0, 1.0));
    for _ in 0..60 {
        rig.tick(&qp);
    }

    let moved = rig.position - start;
    assert!(moved.z > 4.5, "moved {moved:?}");
    assert!(moved.x.abs() < 0.05);
    assert!(rig.controller.state().is_grounded);
}

#[test]
fn wall_blocks_forward_motion() {
    let world = RapierQueryWorld::build(vec![
        WorldStaticDef::ground(0, 0.0),
        WorldStaticDef::new(
            1,
            Vector3::new(0.0, 2.0, 3.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(5.0, 2.0, 0.5),
            },
        ),
    ]);
    let qp = world.query_pipeline(QueryFilter::default());
    let mut rig = Rig::new(0.0);
    rig.settle(&qp);

    rig.controller.on_move_input(Vector2::new(0.0, 1.0));
    for _ in 0..120 {
        rig.tick(&qp);
    }

    let wall_face = 3.0 - 0.5;
    assert!(
        rig.position.z + rig.capsule.radius <= wall_face + 0.01,
        "z {}",
        rig.position.z
    );
    assert!(rig.position.z > 1.5);
}

#[test]
fn ceiling_bump_cancels_rise() {
    // Low slab just above the settled capsule's head (capsule height 1.8 m).
    let world = RapierQueryWorld::build(vec![
        WorldStaticDef::ground(0, 0.0),
        WorldStaticDef::new(
            1,
            Vector3::new(0.0, 2.0, 0.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(1.5, 0.1, 1.5),
            },
        ),
    ]);
    let qp = world.query_pipeline(QueryFilter::default());
    let mut rig = Rig::new(0.0);
    rig.settle(&qp);

    rig.controller.on_jump_requested();
    rig.controller.set_jump_held(true);
    assert!(rig.tick(&qp).jumped);
    assert_eq!(rig.controller.state().vertical_velocity, 0.0);

    for _ in 0..30 {
        rig.tick(&qp);
        assert!(rig.controller.state().vertical_velocity <= 0.0);
    }

    // Walking out from under the slab must not release a stored jump.
    rig.controller.set_jump_held(false);
    rig.controller.on_move_input(Vector2::new(0.0, 1.0));
    let mut peak = rig.foot_gap();
    for _ in 0..90 {
        rig.tick(&qp);
        peak = peak.max(rig.foot_gap());
    }

    assert!(rig.position.z > 3.0, "z {}", rig.position.z);
    assert!(peak < 0.2, "peak {peak}");
    assert!(rig.controller.state().is_grounded);
}
