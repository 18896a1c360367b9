//! Static level: the same definitions build both the render meshes and the Rapier query world
//! the avatar collides against.

use bevy::prelude::*;
use motion::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
use nalgebra::{UnitQuaternion, Vector3};

use crate::convert::{quat_to_bevy, to_bevy};

const GROUND_VISUAL_SIZE: f32 = 80.0;

/// Immutable collision world, built once at startup.
#[derive(Resource)]
pub struct StaticWorld(pub RapierQueryWorld);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(PreStartup, build_query_world);
    app.add_systems(Startup, setup);
}

fn level_statics() -> Vec<WorldStaticDef> {
    vec![
        WorldStaticDef::ground(0, 0.0),
        // Low step, climbable via autostep.
        WorldStaticDef::new(
            1,
            Vector3::new(4.0, 0.1, 6.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(1.5, 0.1, 1.5),
            },
        ),
        // Platform that needs a jump.
        WorldStaticDef::new(
            2,
            Vector3::new(-5.0, 0.6, 8.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(2.0, 0.6, 2.0),
            },
        ),
        // Ramp.
        WorldStaticDef {
            id: 3,
            translation: Vector3::new(8.0, 0.5, -4.0),
            rotation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.35),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(1.5, 0.2, 3.0),
            },
        },
        WorldStaticDef::new(
            4,
            Vector3::new(-8.0, 1.5, -6.0),
            ColliderShapeDef::CylinderY {
                radius: 0.8,
                half_height: 1.5,
            },
        ),
        WorldStaticDef::new(
            5,
            Vector3::new(0.0, 0.0, -10.0),
            ColliderShapeDef::Sphere { radius: 1.5 },
        ),
    ]
}

fn build_query_world(mut commands: Commands) {
    let world = RapierQueryWorld::build(level_statics());
    info!("static world ready ({} colliders)", world.colliders.len());
    commands.insert_resource(StaticWorld(world));
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.3, 0.25),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let prop_material = materials.add(Color::srgb_u8(124, 144, 255));

    for def in level_statics() {
        let (mesh, material) = match def.shape {
            ColliderShapeDef::Plane { .. } => (
                meshes.add(
                    Plane3d::default()
                        .mesh()
                        .size(GROUND_VISUAL_SIZE, GROUND_VISUAL_SIZE)
                        .build(),
                ),
                ground_material.clone(),
            ),
            ColliderShapeDef::Cuboid { half_extents } => (
                meshes.add(Cuboid::from_size(to_bevy(&(half_extents * 2.0)))),
                prop_material.clone(),
            ),
            ColliderShapeDef::Sphere { radius } => {
                (meshes.add(Sphere::new(radius)), prop_material.clone())
            }
            ColliderShapeDef::CapsuleY {
                radius,
                half_height,
            } => (
                meshes.add(Capsule3d::new(radius, half_height * 2.0)),
                prop_material.clone(),
            ),
            ColliderShapeDef::CylinderY {
                radius,
                half_height,
            } => (
                meshes.add(Cylinder::new(radius, half_height * 2.0)),
                prop_material.clone(),
            ),
        };

        commands.spawn((
            Name::new(format!("static {}", def.id)),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform {
                translation: to_bevy(&def.translation),
                rotation: quat_to_bevy(&def.rotation),
                ..default()
            },
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: light_consts::lux::RAW_SUNLIGHT,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
