//! Mouse-look cursor capture: locked while playing, released with Escape or on focus loss.

use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, (capture_on_click, release_cursor));
}

fn set_captured(options: &mut CursorOptions, captured: bool) {
    options.grab_mode = if captured {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    options.visible = !captured;
}

fn capture_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        set_captured(&mut cursor, true);
    }
}

fn release_cursor(
    keys: Res<ButtonInput<KeyCode>>,
    mut focus: MessageReader<WindowFocused>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let lost_focus = focus.read().any(|msg| !msg.focused);
    if keys.just_pressed(KeyCode::Escape) || lost_focus {
        set_captured(&mut cursor, false);
    }
}
