//! The local avatar: spawns it, keeps its collaborators honest and drives it every frame through
//! [`MotionController`](motion::MotionController) and the Rapier-backed mover.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use motion::rapier_world::rapier3d::{
    control::KinematicCharacterController, prelude::QueryFilter,
};
use motion::{Avatar, CameraBasis, CapsuleSpec, KccSettings, MotionSettings, RapierMover};

use crate::{
    camera::FollowCamera,
    convert::{avatar_rotation, to_bevy, to_na},
    input::{ActionInput, PlayerAction},
    world::StaticWorld,
};

const SPAWN_HEIGHT: f32 = 1.0;

/// Tuning inserted at startup. Edit the defaults here to retune the demo.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct MotionTuning {
    pub motion: MotionSettings,
    pub kcc: KccSettings,
}

/// Validated Rapier controller shared by every avatar tick.
#[derive(Resource)]
pub struct CharacterController(pub KinematicCharacterController);

#[derive(Component)]
pub struct Player;

#[derive(Component)]
pub struct PlayerAvatar(pub Avatar);

#[derive(Component, Clone, Copy)]
pub struct AvatarCollider(pub CapsuleSpec);

/// Set on an avatar whose collaborators are missing; it no longer moves.
#[derive(Component)]
pub struct MotionDisabled;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<MotionTuning>();
    app.add_systems(Startup, (build_controller, spawn_avatar));
    app.add_systems(
        Update,
        (disable_unsupported_avatars, drive_avatar)
            .chain()
            .in_set(AvatarSystems::Drive),
    );
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AvatarSystems {
    Drive,
}

fn build_controller(mut commands: Commands, tuning: Res<MotionTuning>) {
    match tuning.kcc.validate() {
        Ok(()) => commands.insert_resource(CharacterController(tuning.kcc.controller())),
        Err(err) => error!("invalid character controller settings: {err}"),
    }
}

fn spawn_avatar(
    mut commands: Commands,
    tuning: Res<MotionTuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let avatar = match Avatar::new(tuning.motion) {
        Ok(avatar) => avatar,
        Err(err) => {
            error!("invalid motion settings, avatar not spawned: {err}");
            return;
        }
    };

    let capsule = CapsuleSpec::default();
    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerAvatar(avatar),
        AvatarCollider(capsule),
        Mesh3d(meshes.add(Capsule3d::new(capsule.radius, capsule.half_height * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb_u8(230, 180, 90))),
        Transform::from_xyz(0.0, capsule.foot_offset() + SPAWN_HEIGHT, 0.0)
            .with_rotation(avatar_rotation(0.0)),
    ));
}

fn disable_unsupported_avatars(
    mut commands: Commands,
    static_world: Option<Res<StaticWorld>>,
    controller: Option<Res<CharacterController>>,
    avatars: Query<(Entity, Has<AvatarCollider>), (With<PlayerAvatar>, Without<MotionDisabled>)>,
) {
    for (entity, has_collider) in &avatars {
        let missing = if !has_collider {
            Some("a collider")
        } else if static_world.is_none() {
            Some("a static world")
        } else if controller.is_none() {
            Some("a character controller")
        } else {
            None
        };

        if let Some(missing) = missing {
            error!("avatar {entity} has no {missing}; motion disabled");
            commands.entity(entity).insert(MotionDisabled);
        }
    }
}

fn drive_avatar(
    time: Res<Time>,
    actions: Res<ActionState<PlayerAction>>,
    static_world: Option<Res<StaticWorld>>,
    controller: Option<Res<CharacterController>>,
    camera: Option<Single<&GlobalTransform, With<FollowCamera>>>,
    mut warned_no_camera: Local<bool>,
    mut avatars: Query<
        (&mut PlayerAvatar, &AvatarCollider, &mut Transform),
        Without<MotionDisabled>,
    >,
) {
    let (Some(static_world), Some(controller)) = (static_world, controller) else {
        return;
    };

    let basis = match camera {
        Some(camera) => {
            *warned_no_camera = false;
            Some(CameraBasis::new(
                to_na(camera.forward().as_vec3()),
                to_na(camera.right().as_vec3()),
            ))
        }
        None => {
            if !*warned_no_camera {
                warn!("no follow camera; moving relative to the avatar heading");
                *warned_no_camera = true;
            }
            None
        }
    };

    let dt = time.delta_secs();
    let query_pipeline = static_world.0.query_pipeline(QueryFilter::default());
    let mut input = ActionInput(&actions);

    for (mut avatar, collider, mut transform) in &mut avatars {
        let mut position = to_na(transform.translation);
        let mut mover = RapierMover::new(
            &query_pipeline,
            &controller.0,
            collider.0,
            &mut position,
            dt,
        );
        if avatar.0.update(dt, &mut input, &basis, &mut mover).is_none() {
            continue;
        }

        transform.translation = to_bevy(&position);
        transform.rotation = avatar_rotation(avatar.0.controller.state().yaw);
    }
}
