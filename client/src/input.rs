use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use motion::{InputSnapshot, InputSource};
use nalgebra::Vector2;

use crate::convert::to_na2;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
    Jump,
    Attack,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<PlayerAction>::default());

    app.register_type::<PlayerAction>();

    let input_map = InputMap::<PlayerAction>::default()
        .with_dual_axis(PlayerAction::Move, VirtualDPad::wasd())
        .with_dual_axis(PlayerAction::Move, GamepadStick::LEFT)
        .with_dual_axis(PlayerAction::Look, MouseMove::default())
        .with_dual_axis(PlayerAction::Look, GamepadStick::RIGHT)
        .with(PlayerAction::Jump, KeyCode::Space)
        .with(PlayerAction::Jump, GamepadButton::South)
        .with(PlayerAction::Attack, MouseButton::Left)
        .with(PlayerAction::Attack, GamepadButton::West);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<PlayerAction>::default());
}

/// Reads the current frame's action state as an [`InputSnapshot`].
pub struct ActionInput<'a>(pub &'a ActionState<PlayerAction>);

impl InputSource for ActionInput<'_> {
    fn poll(&mut self) -> InputSnapshot {
        InputSnapshot {
            move_axis: move_axis(self.0.axis_pair(&PlayerAction::Move)),
            look_delta: to_na2(self.0.axis_pair(&PlayerAction::Look)),
            jump_pressed: self.0.just_pressed(&PlayerAction::Jump),
            jump_held: self.0.pressed(&PlayerAction::Jump),
        }
    }
}

/// WASD diagonals read as `(1, 1)`; keep the stick inside the unit circle.
fn move_axis(raw: Vec2) -> Vector2<f32> {
    to_na2(raw.clamp_length_max(1.0))
}
