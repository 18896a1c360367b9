//! Debug/performance tooling for native dev builds.
//!
//! Compiled only behind `dev_native` (see `main.rs`). Besides the perf overlay it draws the
//! avatar's collision capsule and heading, and logs phase transitions.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use motion::Phase;

use crate::avatar::{AvatarCollider, AvatarSystems, PlayerAvatar};

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(
        Update,
        (draw_capsules, log_phase_changes).after(AvatarSystems::Drive),
    );
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn draw_capsules(
    mut gizmos: Gizmos,
    avatars: Query<(&PlayerAvatar, &AvatarCollider, &Transform)>,
) {
    for (avatar, collider, transform) in &avatars {
        let state = avatar.0.controller.state();
        let color = match state.phase {
            Phase::Grounded => Color::srgb(0.2, 0.9, 0.3),
            Phase::Rising | Phase::RisingReleased => Color::srgb(0.3, 0.6, 1.0),
            Phase::Falling => Color::srgb(1.0, 0.4, 0.2),
        };
        gizmos.primitive_3d(
            &Capsule3d::new(collider.0.radius, collider.0.half_height * 2.0),
            Isometry3d::from_translation(transform.translation),
            color,
        );
        gizmos.arrow(
            transform.translation,
            transform.translation + transform.forward() * 1.5,
            color,
        );
    }
}

fn log_phase_changes(mut last: Local<Option<Phase>>, avatars: Query<&PlayerAvatar>) {
    for avatar in &avatars {
        let phase = avatar.0.controller.state().phase;
        if *last != Some(phase) {
            debug!("avatar phase {:?} -> {phase:?}", *last);
            *last = Some(phase);
        }
    }
}
