use bevy::prelude::*;
use motion::{DamageOutcome, Damageable, Destructible};

use crate::weapon::Swing;

/// Max distance (meters) from the swinging avatar to a prop it can hit.
const SWING_REACH: f32 = 2.0;
/// Hits must land in front of the avatar: cosine of the half-angle of the swing cone.
const SWING_MIN_FACING_DOT: f32 = 0.3;
const SWING_DAMAGE: i32 = 1;

/// A breakable prop.
#[derive(Component, Default)]
pub struct Breakable(pub Destructible);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_props);
    app.add_systems(Update, apply_swings);
}

fn spawn_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let rock = meshes.add(Sphere::new(0.5));
    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(110, 105, 100),
        perceptual_roughness: 0.9,
        ..default()
    });

    for (i, position) in [
        Vec3::new(3.0, 0.5, 9.0),
        Vec3::new(-2.5, 0.5, 11.0),
        Vec3::new(6.0, 0.5, 2.0),
    ]
    .into_iter()
    .enumerate()
    {
        commands.spawn((
            Name::new(format!("Rock {i}")),
            Breakable::default(),
            Mesh3d(rock.clone()),
            MeshMaterial3d(stone.clone()),
            Transform::from_translation(position),
        ));
    }
}

fn in_swing_reach(swing: &Swing, target: Vec3) -> bool {
    let offset = (target - swing.origin).with_y(0.0);
    let distance = offset.length();
    if distance > SWING_REACH {
        return false;
    }
    // Standing on top of the prop still counts.
    distance <= f32::EPSILON
        || offset.dot(swing.facing.as_vec3()) / distance >= SWING_MIN_FACING_DOT
}

fn apply_swings(
    mut commands: Commands,
    mut swings: MessageReader<Swing>,
    mut props: Query<(Entity, &mut Breakable, &Transform)>,
) {
    for swing in swings.read() {
        for (entity, mut prop, transform) in &mut props {
            if !in_swing_reach(swing, transform.translation) {
                continue;
            }
            match prop.0.take_damage(SWING_DAMAGE) {
                DamageOutcome::Survived { remaining } => {
                    info!("hit {entity}, {remaining} health left");
                }
                DamageOutcome::Destroyed => {
                    info!("{entity} destroyed");
                    commands.entity(entity).despawn();
                }
                DamageOutcome::AlreadyDestroyed => {}
            }
        }
    }
}
