/*!
Motion and collision tuning.

Two flat sets of named tunables, each set once at initialization:

- [`MotionSettings`]: speeds, jump/gravity shaping and look sensitivity for the
  [`MotionController`](crate::MotionController).
- [`KccSettings`]: how the Rapier-backed mover configures its
  `KinematicCharacterController`.

Notes
- Distances are in meters, time in seconds, angles in degrees (converted at use).
- Both structs validate eagerly; construction sites turn a bad value into a
  [`SettingsError`] instead of a controller that misbehaves at runtime.
*/

use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};

use crate::{
    SettingsError,
    constants::{
        DEFAULT_FALL_MULTIPLIER, DEFAULT_GRAVITY, DEFAULT_JUMP_BUFFER_TIME, DEFAULT_JUMP_FORCE,
        DEFAULT_LOW_JUMP_MULTIPLIER, DEFAULT_MOUSE_SENSITIVITY, DEFAULT_MOVE_SPEED,
        GROUNDED_STICK_VELOCITY, MAX_TICK_DT_S,
    },
};

/// Tunables for one avatar's motion controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettings {
    /// Planar speed (m/s) at full move input.
    pub move_speed: f32,
    /// Apex height (m) of a jump held to the top.
    pub jump_force: f32,
    /// Base gravity (m/s^2), negative.
    pub gravity: f32,
    /// Gravity scale while rising with the jump input released.
    pub low_jump_multiplier: f32,
    /// Gravity scale while falling.
    pub fall_multiplier: f32,
    /// Look delta to yaw-degrees scale.
    pub mouse_sensitivity: f32,
    /// Seconds a jump press is remembered.
    pub jump_buffer_time: f32,
    /// Floor for vertical velocity while grounded (m/s, <= 0).
    pub grounded_stick_velocity: f32,
    /// Upper clamp for a tick's dt (seconds).
    pub max_tick_dt: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            jump_force: DEFAULT_JUMP_FORCE,
            gravity: DEFAULT_GRAVITY,
            low_jump_multiplier: DEFAULT_LOW_JUMP_MULTIPLIER,
            fall_multiplier: DEFAULT_FALL_MULTIPLIER,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            jump_buffer_time: DEFAULT_JUMP_BUFFER_TIME,
            grounded_stick_velocity: GROUNDED_STICK_VELOCITY,
            max_tick_dt: MAX_TICK_DT_S,
        }
    }
}

impl MotionSettings {
    /// Check every tunable.
    ///
    /// Errors
    /// - any value is NaN/infinite
    /// - `gravity >= 0`
    /// - negative `move_speed`, `jump_force`, `mouse_sensitivity` or `jump_buffer_time`
    /// - a gravity multiplier below 1
    /// - `max_tick_dt <= 0`
    /// - `grounded_stick_velocity > 0`
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("low_jump_multiplier", self.low_jump_multiplier),
            ("fall_multiplier", self.fall_multiplier),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("jump_buffer_time", self.jump_buffer_time),
            ("grounded_stick_velocity", self.grounded_stick_velocity),
            ("max_tick_dt", self.max_tick_dt),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field, value });
            }
        }

        if self.gravity >= 0.0 {
            return Err(SettingsError::GravityNotDownward(self.gravity));
        }

        for (field, value) in [
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("jump_buffer_time", self.jump_buffer_time),
        ] {
            if value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("low_jump_multiplier", self.low_jump_multiplier),
            ("fall_multiplier", self.fall_multiplier),
        ] {
            if value < 1.0 {
                return Err(SettingsError::MultiplierBelowOne { field, value });
            }
        }

        if self.max_tick_dt <= 0.0 {
            return Err(SettingsError::NotPositive {
                field: "max_tick_dt",
                value: self.max_tick_dt,
            });
        }

        if self.grounded_stick_velocity > 0.0 {
            return Err(SettingsError::StickVelocityUpward(
                self.grounded_stick_velocity,
            ));
        }

        Ok(())
    }

    /// Launch velocity for a jump reaching `jump_force` meters: `sqrt(jump_force * -2 * gravity)`.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_force * -2.0 * self.gravity).max(0.0).sqrt()
    }
}

/// Kinematic Character Controller (KCC) settings for the Rapier-backed mover.
///
/// Values are expressed in meters and degrees (converted to radians when the controller is
/// built). Lengths are absolute, not relative to the capsule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KccSettings {
    /// Small gap preserved between the character and its surroundings (meters).
    /// Keep `offset` small but non-zero for numerical stability
    pub offset: f32,

    /// Maximum climbable slope angle (degrees).
    pub max_slope_climb_deg: f32,

    /// Minimum slope angle (degrees) before automatic sliding starts.
    pub min_slope_slide_deg: f32,

    /// Autostep maximum height (meters). `0.0` disables autostep.
    pub autostep_max_height: f32,

    /// Autostep minimum width (meters).
    pub autostep_min_width: f32,

    /// Whether the controller should slide against obstacles.
    pub slide: bool,

    /// Max downward distance (meters) the controller snaps to keep ground contact.
    /// `0.0` disables snapping; the grounded stick velocity already keeps contact, and snapping
    /// on the horizontal move would pull a freshly launched jump back down.
    pub snap_to_ground: f32,

    /// Increase if the character gets stuck when sliding (small, meters).
    pub normal_nudge_factor: f32,
}

impl Default for KccSettings {
    fn default() -> Self {
        Self {
            offset: 0.02,
            max_slope_climb_deg: 52.0,
            min_slope_slide_deg: 45.0,
            autostep_max_height: 0.3,
            autostep_min_width: 0.2,
            slide: true,
            snap_to_ground: 0.0,
            normal_nudge_factor: 1.0e-4,
        }
    }
}

impl KccSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("offset", self.offset),
            ("max_slope_climb_deg", self.max_slope_climb_deg),
            ("min_slope_slide_deg", self.min_slope_slide_deg),
            ("autostep_max_height", self.autostep_max_height),
            ("autostep_min_width", self.autostep_min_width),
            ("snap_to_ground", self.snap_to_ground),
            ("normal_nudge_factor", self.normal_nudge_factor),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field, value });
            }
        }

        if self.offset <= 0.0 {
            return Err(SettingsError::NotPositive {
                field: "offset",
                value: self.offset,
            });
        }

        for (field, value) in [
            ("autostep_max_height", self.autostep_max_height),
            ("autostep_min_width", self.autostep_min_width),
            ("snap_to_ground", self.snap_to_ground),
            ("normal_nudge_factor", self.normal_nudge_factor),
        ] {
            if value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("max_slope_climb_deg", self.max_slope_climb_deg),
            ("min_slope_slide_deg", self.min_slope_slide_deg),
        ] {
            if !(0.0..=90.0).contains(&value) {
                return Err(SettingsError::AngleOutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 90.0,
                });
            }
        }

        Ok(())
    }

    /// Build the Rapier controller these settings describe.
    pub fn controller(&self) -> KinematicCharacterController {
        let autostep = (self.autostep_max_height > 0.0).then(|| CharacterAutostep {
            include_dynamic_bodies: false,
            max_height: CharacterLength::Absolute(self.autostep_max_height),
            min_width: CharacterLength::Absolute(self.autostep_min_width),
        });
        let snap_to_ground =
            (self.snap_to_ground > 0.0).then(|| CharacterLength::Absolute(self.snap_to_ground));

        KinematicCharacterController {
            offset: CharacterLength::Absolute(self.offset),
            slide: self.slide,
            autostep,
            max_slope_climb_angle: self.max_slope_climb_deg.to_radians(),
            min_slope_slide_angle: self.min_slope_slide_deg.to_radians(),
            snap_to_ground,
            normal_nudge_factor: self.normal_nudge_factor,
            ..KinematicCharacterController::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(MotionSettings::default().validate(), Ok(()));
        assert_eq!(KccSettings::default().validate(), Ok(()));
    }

    #[test]
    fn jump_velocity_matches_projectile_apex() {
        let settings = MotionSettings {
            jump_force: 5.0,
            gravity: -9.81,
            ..MotionSettings::default()
        };
        assert!((settings.jump_velocity() - 9.9045).abs() < 1.0e-3);
    }

    #[test]
    fn rejects_upward_gravity() {
        let settings = MotionSettings {
            gravity: 9.81,
            ..MotionSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::GravityNotDownward(9.81))
        );
    }

    #[test]
    fn rejects_nan_before_anything_else() {
        let settings = MotionSettings {
            move_speed: f32::NAN,
            gravity: 1.0,
            ..MotionSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonFinite {
                field: "move_speed",
                ..
            })
        ));
    }

    #[test]
    fn rejects_multiplier_below_one() {
        let settings = MotionSettings {
            fall_multiplier: 0.5,
            ..MotionSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MultiplierBelowOne {
                field: "fall_multiplier",
                ..
            })
        ));
    }

    #[test]
    fn rejects_upward_stick_velocity() {
        let settings = MotionSettings {
            grounded_stick_velocity: 0.5,
            ..MotionSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::StickVelocityUpward(0.5))
        );
    }

    #[test]
    fn kcc_rejects_zero_offset_and_wild_angles() {
        let zero_offset = KccSettings {
            offset: 0.0,
            ..KccSettings::default()
        };
        assert!(matches!(
            zero_offset.validate(),
            Err(SettingsError::NotPositive {
                field: "offset",
                ..
            })
        ));

        let steep = KccSettings {
            max_slope_climb_deg: 120.0,
            ..KccSettings::default()
        };
        assert!(matches!(
            steep.validate(),
            Err(SettingsError::AngleOutOfRange { .. })
        ));
    }

    #[test]
    fn kcc_controller_disables_optional_features_at_zero() {
        let kcc = KccSettings {
            autostep_max_height: 0.0,
            snap_to_ground: 0.0,
            ..KccSettings::default()
        }
        .controller();
        assert!(kcc.autostep.is_none());
        assert!(kcc.snap_to_ground.is_none());
    }
}
