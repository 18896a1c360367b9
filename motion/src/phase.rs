/*!
Vertical phase state machine.

The controller's vertical motion is one velocity integrator whose gravity depends on the
phase the avatar is in:

| phase            | entered when                 | per-tick velocity update                         |
|------------------|------------------------------|--------------------------------------------------|
| `Grounded`       | the mover reports support    | `v = max(v, stick)`, no gravity                  |
| `Rising`         | airborne, `v > 0`, jump held | `v += g * dt`                                    |
| `RisingReleased` | airborne, `v > 0`, released  | `v += g * (low_jump - 1) * dt`, then `g * dt`    |
| `Falling`        | airborne, `v <= 0`           | `v += g * (fall - 1) * dt`, then `g * dt`        |

A buffered jump is only consumed from `Grounded`; it launches with
`sqrt(jump_force * -2 * gravity)` and leaves the avatar `Rising`.
*/

use crate::MotionSettings;

/// Where the avatar is in its vertical motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Grounded,
    Rising,
    RisingReleased,
    Falling,
}

impl Phase {
    /// Phase for the given support report, velocity and jump level.
    pub fn classify(grounded: bool, vertical_velocity: f32, jump_held: bool) -> Phase {
        if grounded {
            Phase::Grounded
        } else if vertical_velocity > 0.0 {
            if jump_held {
                Phase::Rising
            } else {
                Phase::RisingReleased
            }
        } else {
            Phase::Falling
        }
    }

    /// Gravity multiplier on top of base gravity for this phase.
    ///
    /// `None` means gravity isn't integrated at all.
    fn extra_gravity_scale(self, settings: &MotionSettings) -> Option<f32> {
        match self {
            Phase::Grounded => None,
            Phase::Rising => Some(0.0),
            Phase::RisingReleased => Some(settings.low_jump_multiplier - 1.0),
            Phase::Falling => Some(settings.fall_multiplier - 1.0),
        }
    }
}

/// Outcome of one vertical step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalStep {
    /// Vertical velocity to apply this tick (m/s).
    pub velocity: f32,
    /// Phase after the step.
    pub phase: Phase,
    /// A buffered jump was consumed.
    pub jumped: bool,
}

/// Run the phase machine for one tick.
///
/// - `grounded` is this tick's support report.
/// - `jump_buffered` is whether a jump press is still honorable.
/// - `jump_held` is the jump level signal.
pub fn step_vertical(
    settings: &MotionSettings,
    grounded: bool,
    velocity: f32,
    jump_buffered: bool,
    jump_held: bool,
    dt: f32,
) -> VerticalStep {
    let phase = Phase::classify(grounded, velocity, jump_held);

    let Some(extra_scale) = phase.extra_gravity_scale(settings) else {
        if jump_buffered {
            return VerticalStep {
                velocity: settings.jump_velocity(),
                phase: Phase::Rising,
                jumped: true,
            };
        }

        return VerticalStep {
            velocity: velocity.max(settings.grounded_stick_velocity),
            phase: Phase::Grounded,
            jumped: false,
        };
    };

    let mut v = velocity;
    if extra_scale > 0.0 {
        v += settings.gravity * extra_scale * dt;
    }
    v += settings.gravity * dt;

    VerticalStep {
        velocity: v,
        phase,
        jumped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn settings() -> MotionSettings {
        MotionSettings {
            gravity: -10.0,
            low_jump_multiplier: 2.0,
            fall_multiplier: 3.0,
            jump_force: 5.0,
            ..MotionSettings::default()
        }
    }

    #[test]
    fn classify_covers_every_phase() {
        assert_eq!(Phase::classify(true, -5.0, false), Phase::Grounded);
        assert_eq!(Phase::classify(false, 3.0, true), Phase::Rising);
        assert_eq!(Phase::classify(false, 3.0, false), Phase::RisingReleased);
        assert_eq!(Phase::classify(false, -3.0, true), Phase::Falling);
        assert_eq!(Phase::classify(false, 0.0, true), Phase::Falling);
    }

    #[test]
    fn grounded_snaps_downward_velocity_without_gravity() {
        let s = settings();
        let step = step_vertical(&s, true, -7.5, false, false, DT);
        assert_eq!(step.velocity, s.grounded_stick_velocity);
        assert_eq!(step.phase, Phase::Grounded);
        assert!(!step.jumped);

        let resting = step_vertical(&s, true, s.grounded_stick_velocity, false, false, DT);
        assert_eq!(resting.velocity, s.grounded_stick_velocity);
    }

    #[test]
    fn grounded_keeps_gentle_downward_velocity() {
        let s = settings();
        let step = step_vertical(&s, true, -0.4, false, false, DT);
        assert_eq!(step.velocity, -0.4);
        assert_eq!(step.phase, Phase::Grounded);
    }

    #[test]
    fn grounded_keeps_upward_velocity() {
        let step = step_vertical(&settings(), true, 1.5, false, false, DT);
        assert_eq!(step.velocity, 1.5);
        assert_eq!(step.phase, Phase::Grounded);
    }

    #[test]
    fn grounded_with_buffer_jumps() {
        let s = settings();
        let step = step_vertical(&s, true, -2.0, true, false, DT);
        assert!(step.jumped);
        assert_eq!(step.phase, Phase::Rising);
        assert!((step.velocity - 10.0).abs() < 1.0e-5);
    }

    #[test]
    fn airborne_buffer_does_not_jump() {
        let step = step_vertical(&settings(), false, -1.0, true, true, DT);
        assert!(!step.jumped);
        assert_eq!(step.phase, Phase::Falling);
    }

    #[test]
    fn rising_applies_base_gravity_only() {
        let step = step_vertical(&settings(), false, 5.0, false, true, DT);
        assert_eq!(step.phase, Phase::Rising);
        assert!((step.velocity - (5.0 - 10.0 * DT)).abs() < 1.0e-6);
    }

    #[test]
    fn released_rise_applies_low_jump_gravity() {
        let step = step_vertical(&settings(), false, 5.0, false, false, DT);
        assert_eq!(step.phase, Phase::RisingReleased);
        // (2 - 1) extra + 1 base
        assert!((step.velocity - (5.0 - 2.0 * 10.0 * DT)).abs() < 1.0e-6);
    }

    #[test]
    fn falling_applies_fall_gravity() {
        let step = step_vertical(&settings(), false, -1.0, false, true, DT);
        assert_eq!(step.phase, Phase::Falling);
        // (3 - 1) extra + 1 base
        assert!((step.velocity - (-1.0 - 3.0 * 10.0 * DT)).abs() < 1.0e-6);
    }
}
