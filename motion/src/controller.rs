/*!
Per-tick motion controller for a single avatar.

Each [`MotionController::tick`] runs three ordered steps:

1. Rotate: apply the buffered look delta to the heading (yaw only).
2. Horizontal move: camera-relative direction scaled by `move_speed * dt`, sent to the mover.
3. Vertical move: run the [`Phase`] machine on the mover's support report, then send
   `(0, vertical_velocity * dt, 0)`.

The jump buffer decays after both moves unless it was consumed this tick. A rise the mover
cuts well short (a ceiling) zeroes the upward velocity.

Inputs arrive between ticks, either through the `on_*` callbacks or as an [`InputSnapshot`].
Move and look are last-write-wins; a jump press re-arms the buffer to its full duration.
*/

use nalgebra::{Vector2, Vector3};

use crate::{
    CameraBasis, CameraRig, CollisionMover, InputSnapshot, InputSource, MotionSettings,
    MoveReport, SettingsError,
    constants::{BUFFER_EPS, CEILING_BLOCK_RATIO, DIST_EPS},
    input::{sanitize_axis, sanitize_move_axis},
    phase::{Phase, step_vertical},
    utils::wrap_yaw,
};

/// State owned by the controller and mutated once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Signed vertical speed (m/s), positive rising.
    pub vertical_velocity: f32,
    /// Seconds left in which a jump press is still honored on landing. Always `>= 0`.
    pub jump_buffer_remaining: f32,
    /// Last support report from the mover.
    pub is_grounded: bool,
    /// Heading in radians, `[0, 2π)`.
    pub yaw: f32,
    /// Vertical phase after the last tick.
    pub phase: Phase,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Report of the horizontal move.
    pub horizontal: MoveReport,
    /// Report of the vertical move.
    pub vertical: MoveReport,
    /// Phase after the tick.
    pub phase: Phase,
    /// A buffered jump launched this tick.
    pub jumped: bool,
    /// Support was regained this tick. Never set on the first tick.
    pub landed: bool,
    /// The camera gave no usable planar axis and movement used the avatar heading.
    pub used_heading_fallback: bool,
}

#[derive(Clone, Debug)]
pub struct MotionController {
    settings: MotionSettings,
    state: MotionState,
    move_input: Vector2<f32>,
    look_input: Vector2<f32>,
    jump_held: bool,
    /// A support report has been seen, so `landed` can be trusted.
    support_known: bool,
}

impl MotionController {
    /// Build a controller, rejecting invalid tuning up front.
    pub fn new(settings: MotionSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        Ok(Self {
            settings,
            state: MotionState::default(),
            move_input: Vector2::zeros(),
            look_input: Vector2::zeros(),
            jump_held: false,
            support_known: false,
        })
    }

    /// Start facing `yaw` (radians).
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.state.yaw = if yaw.is_finite() { wrap_yaw(yaw) } else { 0.0 };
        self
    }

    #[inline]
    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    #[inline]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    #[inline]
    pub fn move_input(&self) -> Vector2<f32> {
        self.move_input
    }

    #[inline]
    pub fn look_input(&self) -> Vector2<f32> {
        self.look_input
    }

    #[inline]
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    /// Store the look delta applied by the next tick.
    pub fn on_look_input(&mut self, delta: Vector2<f32>) {
        let (delta, dirty) = sanitize_axis(delta);
        if dirty {
            log::warn!("discarding non-finite look input");
        }
        self.look_input = delta;
    }

    pub fn on_look_canceled(&mut self) {
        self.look_input = Vector2::zeros();
    }

    /// Store the planar move axis used by the next tick.
    pub fn on_move_input(&mut self, axis: Vector2<f32>) {
        let (axis, non_finite) = sanitize_axis(axis);
        if non_finite {
            log::warn!("discarding non-finite move input");
        }
        let (axis, clamped) = sanitize_move_axis(axis);
        if clamped {
            log::trace!("move input longer than 1, normalized to {axis:?}");
        }
        self.move_input = axis;
    }

    pub fn on_move_canceled(&mut self) {
        self.move_input = Vector2::zeros();
    }

    /// Arm the jump buffer. Doesn't jump by itself; the next grounded tick does.
    pub fn on_jump_requested(&mut self) {
        self.state.jump_buffer_remaining = self.settings.jump_buffer_time;
    }

    pub fn set_jump_held(&mut self, held: bool) {
        self.jump_held = held;
    }

    /// Route a polled snapshot through the input callbacks.
    pub fn apply_input(&mut self, snapshot: &InputSnapshot) {
        self.on_move_input(snapshot.move_axis);
        self.on_look_input(snapshot.look_delta);
        if snapshot.jump_pressed {
            self.on_jump_requested();
        }
        self.set_jump_held(snapshot.jump_held);
    }

    /// Poll `source` once and apply the result.
    pub fn poll_input<S: InputSource + ?Sized>(&mut self, source: &mut S) {
        let snapshot = source.poll();
        self.apply_input(&snapshot);
    }

    /// Advance one frame.
    ///
    /// Calls `mover` exactly twice: horizontal displacement first, vertical second.
    pub fn tick<C, M>(&mut self, dt: f32, camera: &C, mover: &mut M) -> TickReport
    where
        C: CameraRig + ?Sized,
        M: CollisionMover + ?Sized,
    {
        let dt = self.clamp_dt(dt);

        // 1) Rotate.
        self.rotate(dt);

        // 2) Horizontal, camera-relative.
        let (direction, used_heading_fallback) = self.move_direction(camera);
        let horizontal = mover.move_by(direction * self.settings.move_speed * dt);

        let was_grounded = self.state.is_grounded;
        self.state.is_grounded = horizontal.grounded;

        // 3) Phase decision, then vertical velocity application.
        let step = step_vertical(
            &self.settings,
            self.state.is_grounded,
            self.state.vertical_velocity,
            self.state.jump_buffer_remaining > 0.0,
            self.jump_held,
            dt,
        );
        self.state.vertical_velocity = step.velocity;
        self.state.phase = step.phase;

        let requested_rise = self.state.vertical_velocity * dt;
        let vertical = mover.move_by(Vector3::new(0.0, requested_rise, 0.0));
        if requested_rise > DIST_EPS && vertical.applied.y < requested_rise * CEILING_BLOCK_RATIO {
            log::debug!(
                "head bump: rose {:.3} of {:.3} m",
                vertical.applied.y,
                requested_rise
            );
            self.state.vertical_velocity = 0.0;
        }

        if step.jumped {
            self.state.jump_buffer_remaining = 0.0;
            log::debug!(
                "jump launched at {:.3} m/s (yaw {:.3})",
                self.state.vertical_velocity,
                self.state.yaw
            );
        } else {
            self.decay_jump_buffer(dt);
        }

        let landed = self.support_known && !was_grounded && self.state.is_grounded;
        self.support_known = true;
        if landed {
            log::debug!("landed");
        }

        log::trace!(
            "tick dt={dt:.4} phase={:?} vv={:.3} buffer={:.3}",
            self.state.phase,
            self.state.vertical_velocity,
            self.state.jump_buffer_remaining
        );

        TickReport {
            horizontal,
            vertical,
            phase: self.state.phase,
            jumped: step.jumped,
            landed,
            used_heading_fallback,
        }
    }

    /// Poll input and tick in one call.
    pub fn update<S, C, M>(
        &mut self,
        dt: f32,
        input: &mut S,
        camera: &C,
        mover: &mut M,
    ) -> TickReport
    where
        S: InputSource + ?Sized,
        C: CameraRig + ?Sized,
        M: CollisionMover + ?Sized,
    {
        self.poll_input(input);
        self.tick(dt, camera, mover)
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("ignoring invalid tick dt {dt}");
            return 0.0;
        }
        dt.min(self.settings.max_tick_dt)
    }

    fn rotate(&mut self, dt: f32) {
        let degrees = self.look_input.x * self.settings.mouse_sensitivity * dt;
        self.state.yaw = wrap_yaw(self.state.yaw + degrees.to_radians());
    }

    fn move_direction<C: CameraRig + ?Sized>(&self, camera: &C) -> (Vector3<f32>, bool) {
        let heading = CameraBasis::from_yaw(self.state.yaw);
        let (basis, used_fallback) = match camera.basis() {
            Some(basis) => basis.planar_or(&heading),
            None => (heading, true),
        };
        (basis.direction(self.move_input), used_fallback)
    }

    fn decay_jump_buffer(&mut self, dt: f32) {
        let remaining = self.state.jump_buffer_remaining - dt;
        self.state.jump_buffer_remaining = if remaining > BUFFER_EPS {
            remaining
        } else {
            0.0
        };
    }
}
