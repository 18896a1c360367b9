use bevy::{
    camera::Exposure,
    pbr::{AtmosphereMode, AtmosphereSettings},
    prelude::*,
};

use crate::avatar::{Player, PlayerAvatar};
use crate::convert::to_bevy;

/// Third-person camera trailing the avatar; its basis drives camera-relative movement.
#[derive(Component)]
pub struct FollowCamera;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(PostUpdate, follow_player);
}

const CAMERA_DISTANCE: f32 = 7.0;
const CAMERA_HEIGHT: f32 = 3.5;
const CAMERA_LOOK_HEIGHT: f32 = 1.0;
const CAMERA_DECAY_RATE: f32 = 12.0;

fn add_camera(mut commands: Commands) {
    commands.spawn((
        FollowCamera,
        Exposure { ev100: 16.0 },
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_xyz(0.0, CAMERA_HEIGHT, -CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                400.0,
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
        AtmosphereSettings {
            rendering_method: AtmosphereMode::Raymarched,
            ..default()
        },
    ));
}

/// Desired camera position behind the avatar for `yaw`.
fn boom_target(avatar: Vec3, yaw: f32) -> Vec3 {
    let behind = -to_bevy(&motion::heading_forward(yaw)) * CAMERA_DISTANCE;
    avatar + behind + Vec3::Y * CAMERA_HEIGHT
}

fn follow_player(
    mut camera: Single<&mut Transform, With<FollowCamera>>,
    player: Single<(&Transform, &PlayerAvatar), (With<Player>, Without<FollowCamera>)>,
    time: Res<Time>,
) {
    let (player_tf, avatar) = *player;
    let target = boom_target(player_tf.translation, avatar.0.controller.state().yaw);

    camera
        .translation
        .smooth_nudge(&target, CAMERA_DECAY_RATE, time.delta_secs());
    camera.look_at(player_tf.translation + Vec3::Y * CAMERA_LOOK_HEIGHT, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boom_sits_behind_heading() {
        let target = boom_target(Vec3::ZERO, 0.0);
        assert!(target.z < 0.0);
        assert!((target.y - CAMERA_HEIGHT).abs() < 1.0e-5);

        let turned = boom_target(Vec3::ZERO, std::f32::consts::FRAC_PI_2);
        assert!(turned.x > 0.0);
        assert!(turned.z.abs() < 1.0e-4);
    }
}
