use thiserror::Error;

/// Rejected tuning values.
///
/// Settings are validated once when a controller or mover is built. A controller never runs
/// with values that would poison the velocity integrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("`gravity` must be negative (downward), got {0}")]
    GravityNotDownward(f32),

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must be at least 1.0, got {value}")]
    MultiplierBelowOne { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`grounded_stick_velocity` must not point upward, got {0}")]
    StickVelocityUpward(f32),

    #[error("`{field}` must be within [{min}, {max}] degrees, got {value}")]
    AngleOutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
