//! Held pickaxe: shown once equipped, swung on attack.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use motion::WeaponHolder;

use crate::avatar::{AvatarSystems, Player, PlayerAvatar};
use crate::input::PlayerAction;

const SWING_DURATION_S: f32 = 0.35;
const SWING_ARC_RAD: f32 = 1.6;
const REST_PITCH_RAD: f32 = 0.3;

/// One swing of the held weapon.
#[derive(Message, Clone, Copy, Debug)]
pub struct Swing {
    pub origin: Vec3,
    pub facing: Dir3,
}

/// The pickaxe mesh carried by the avatar.
#[derive(Component, Default)]
pub struct HeldWeapon {
    swing_remaining: f32,
}

pub(super) fn plugin(app: &mut App) {
    app.add_message::<Swing>();
    app.add_systems(
        Update,
        (
            attach_held_weapon,
            (request_swing, play_swing, show_held_weapon, animate_swing)
                .chain()
                .after(AvatarSystems::Drive),
        ),
    );
}

fn attach_held_weapon(
    mut commands: Commands,
    players: Query<Entity, Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for player in &players {
        let handle = meshes.add(Cuboid::new(0.08, 0.7, 0.08));
        let head = meshes.add(Cuboid::new(0.5, 0.1, 0.1));
        let wood = materials.add(Color::srgb_u8(120, 80, 40));
        let iron = materials.add(Color::srgb_u8(170, 170, 180));

        commands.spawn((
            Name::new("Held pickaxe"),
            HeldWeapon::default(),
            ChildOf(player),
            Transform::from_xyz(0.45, 0.1, -0.3)
                .with_rotation(Quat::from_rotation_x(-REST_PITCH_RAD)),
            Visibility::Hidden,
            children![
                (Mesh3d(handle), MeshMaterial3d(wood)),
                (
                    Mesh3d(head),
                    MeshMaterial3d(iron),
                    Transform::from_xyz(0.0, 0.35, 0.0)
                ),
            ],
        ));
    }
}

fn request_swing(
    actions: Res<ActionState<PlayerAction>>,
    mut avatar: Single<&mut PlayerAvatar, With<Player>>,
) {
    if actions.just_pressed(&PlayerAction::Attack) && !avatar.0.request_swing() {
        debug!("attack ignored, no weapon equipped");
    }
}

fn play_swing(
    mut swings: MessageWriter<Swing>,
    player: Single<(&mut PlayerAvatar, &Transform), With<Player>>,
    mut weapons: Query<&mut HeldWeapon>,
) {
    let (mut avatar, transform) = player.into_inner();
    if !avatar.0.swing.consume() {
        return;
    }

    for mut weapon in &mut weapons {
        weapon.swing_remaining = SWING_DURATION_S;
    }
    swings.write(Swing {
        origin: transform.translation,
        facing: transform.forward(),
    });
}

fn show_held_weapon(
    avatars: Query<&PlayerAvatar, (With<Player>, Changed<PlayerAvatar>)>,
    mut weapons: Query<&mut Visibility, With<HeldWeapon>>,
) {
    if !avatars.iter().any(|avatar| avatar.0.has_weapon()) {
        return;
    }
    for mut visibility in &mut weapons {
        visibility.set_if_neq(Visibility::Inherited);
    }
}

fn animate_swing(time: Res<Time>, mut weapons: Query<(&mut HeldWeapon, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut weapon, mut transform) in &mut weapons {
        if weapon.swing_remaining <= 0.0 {
            continue;
        }
        weapon.swing_remaining = (weapon.swing_remaining - dt).max(0.0);
        transform.rotation = Quat::from_rotation_x(-swing_pitch(weapon.swing_remaining));
    }
}

/// Pitch along the swing arc: raised at the start, through the arc, back to rest at the end.
fn swing_pitch(remaining: f32) -> f32 {
    let t = 1.0 - (remaining / SWING_DURATION_S).clamp(0.0, 1.0);
    REST_PITCH_RAD + SWING_ARC_RAD * (t * std::f32::consts::PI).sin()
}
