/// Floor for vertical velocity (m/s) while the avatar rests on ground.
///
/// Caps landing speed; must stay slightly negative so contact stays stable.
pub const GROUNDED_STICK_VELOCITY: f32 = -2.0;

/// Default walking speed in meters per second.
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;

/// Default jump strength. Interpreted as the apex height (meters) of an uncut jump.
pub const DEFAULT_JUMP_FORCE: f32 = 5.0;

/// Default gravity acceleration (m/s^2). Negative means down.
pub const DEFAULT_GRAVITY: f32 = -9.81;

/// Extra gravity applied while rising after the jump input was released.
pub const DEFAULT_LOW_JUMP_MULTIPLIER: f32 = 2.0;

/// Extra gravity applied while falling.
pub const DEFAULT_FALL_MULTIPLIER: f32 = 2.5;

/// Scale from horizontal look delta to yaw degrees (per second of tick time).
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 2.0;

/// How long (seconds) a jump press stays honorable before landing.
pub const DEFAULT_JUMP_BUFFER_TIME: f32 = 0.2;

/// Max dt (seconds) for a single motion tick.
///
/// Large frame stalls are clamped so one tick can't integrate a huge velocity step.
pub const MAX_TICK_DT_S: f32 = 0.25;

/// Practical small distance for comparisons (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// An upward move applying less than this share of the requested rise counts as a head bump.
pub const CEILING_BLOCK_RATIO: f32 = 0.5;

/// Jump buffer values below this are treated as expired (absorbs `remaining - dt` float dust).
pub const BUFFER_EPS: f32 = 1.0e-5;

/// Minimum planar length for a camera axis to be usable after flattening.
pub const PLANAR_AXIS_EPS: f32 = 1.0e-4;

/// Default hit points for destructible props.
pub const DEFAULT_DESTRUCTIBLE_HEALTH: i32 = 3;

/// Default hit points for the avatar.
pub const DEFAULT_AVATAR_HEALTH: i32 = 10;
