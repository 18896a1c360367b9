use bevy::prelude::*;
use motion::{Pickup, PickupOutcome};

use crate::avatar::{AvatarCollider, AvatarSystems, Player, PlayerAvatar};

const SPIN_DEG_PER_SEC: f32 = 50.0;
const PICKUP_RADIUS: f32 = 0.5;

/// A pickaxe lying in the world, spinning until the avatar touches it.
#[derive(Component, Default)]
pub struct WeaponPickup(pub Pickup);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_pickup);
    app.add_systems(Update, (spin, collect.after(AvatarSystems::Drive)));
}

fn spawn_pickup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let handle = meshes.add(Cuboid::new(0.1, 0.8, 0.1));
    let head = meshes.add(Cuboid::new(0.6, 0.12, 0.12));
    let wood = materials.add(Color::srgb_u8(120, 80, 40));
    let iron = materials.add(Color::srgb_u8(170, 170, 180));

    commands.spawn((
        Name::new("Pickaxe pickup"),
        WeaponPickup::default(),
        Transform::from_xyz(0.0, 0.8, 5.0),
        Visibility::default(),
        children![
            (Mesh3d(handle), MeshMaterial3d(wood)),
            (
                Mesh3d(head),
                MeshMaterial3d(iron),
                Transform::from_xyz(0.0, 0.4, 0.0)
            ),
        ],
    ));
}

fn spin(time: Res<Time>, mut pickups: Query<&mut Transform, With<WeaponPickup>>) {
    let step = SPIN_DEG_PER_SEC.to_radians() * time.delta_secs();
    for mut transform in &mut pickups {
        transform.rotate_y(step);
    }
}

fn overlaps(a: Vec3, a_radius: f32, b: Vec3, b_radius: f32) -> bool {
    a.distance_squared(b) <= (a_radius + b_radius).powi(2)
}

fn collect(
    mut commands: Commands,
    mut pickups: Query<(Entity, &mut WeaponPickup, &Transform)>,
    player: Single<
        (&mut PlayerAvatar, &AvatarCollider, &Transform),
        (With<Player>, Without<WeaponPickup>),
    >,
) {
    let (mut avatar, collider, player_tf) = player.into_inner();
    let capsule = collider.0;

    for (entity, mut pickup, transform) in &mut pickups {
        // Closest point on the capsule axis to the pickup.
        let axis_y = transform.translation.y.clamp(
            player_tf.translation.y - capsule.half_height,
            player_tf.translation.y + capsule.half_height,
        );
        let axis_point = player_tf.translation.with_y(axis_y);
        if !overlaps(axis_point, capsule.radius, transform.translation, PICKUP_RADIUS) {
            continue;
        }

        let outcome = pickup.0.on_overlap(Some(&mut avatar.0));
        if let PickupOutcome::Collected { newly_equipped } = outcome {
            info!("picked up pickaxe (newly equipped: {newly_equipped})");
            commands.entity(entity).despawn();
        }
    }
}
