pub mod avatar;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod damage;
pub mod error;
pub mod input;
pub mod kinematic;
pub mod mover;
pub mod phase;
pub mod pickup;
pub mod rapier_world;
pub mod settings;
pub mod utils;

pub use avatar::Avatar;
pub use camera::{CameraBasis, CameraRig, NoCamera};
pub use constants::{GROUNDED_STICK_VELOCITY, MAX_TICK_DT_S};
pub use controller::{MotionController, MotionState, TickReport};
pub use damage::{DamageOutcome, Damageable, Destructible};
pub use error::SettingsError;
pub use input::{InputSnapshot, InputSource};
pub use kinematic::{CapsuleSpec, RapierMover};
pub use mover::{CollisionMover, FlatGroundMover, MoveReport};
pub use phase::{Phase, VerticalStep};
pub use pickup::{Loadout, Pickup, PickupOutcome, SwingTrigger, WeaponHolder};
pub use rapier_world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
pub use settings::{KccSettings, MotionSettings};
pub use utils::{heading_forward, heading_right, heading_rotation, wrap_yaw};
