use crate::{
    CameraRig, CollisionMover, Damageable, DamageOutcome, Destructible, InputSource, Loadout,
    MotionController, MotionSettings, SettingsError, SwingTrigger, TickReport, WeaponHolder,
    constants::DEFAULT_AVATAR_HEALTH,
};

/// The playable avatar: motion plus the capabilities collaborators call into.
#[derive(Clone, Debug)]
pub struct Avatar {
    pub controller: MotionController,
    pub loadout: Loadout,
    pub health: Destructible,
    pub swing: SwingTrigger,
}

impl Avatar {
    pub fn new(settings: MotionSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            controller: MotionController::new(settings)?,
            loadout: Loadout::default(),
            health: Destructible::new(DEFAULT_AVATAR_HEALTH),
            swing: SwingTrigger::default(),
        })
    }

    /// Advance motion one frame. A destroyed avatar stays put.
    pub fn tick<C, M>(&mut self, dt: f32, camera: &C, mover: &mut M) -> Option<TickReport>
    where
        C: CameraRig + ?Sized,
        M: CollisionMover + ?Sized,
    {
        if self.health.is_destroyed() {
            return None;
        }
        Some(self.controller.tick(dt, camera, mover))
    }

    /// Poll `input`, then advance motion one frame. A destroyed avatar ignores both.
    pub fn update<S, C, M>(
        &mut self,
        dt: f32,
        input: &mut S,
        camera: &C,
        mover: &mut M,
    ) -> Option<TickReport>
    where
        S: InputSource + ?Sized,
        C: CameraRig + ?Sized,
        M: CollisionMover + ?Sized,
    {
        if self.health.is_destroyed() {
            return None;
        }
        Some(self.controller.update(dt, input, camera, mover))
    }

    /// Ask for a weapon swing; only arms when the weapon is equipped.
    pub fn request_swing(&mut self) -> bool {
        self.swing.request(&self.loadout)
    }
}

impl WeaponHolder for Avatar {
    fn equip_weapon(&mut self) -> bool {
        self.loadout.equip_weapon()
    }

    fn has_weapon(&self) -> bool {
        self.loadout.has_weapon()
    }
}

impl Damageable for Avatar {
    fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let outcome = self.health.take_damage(amount);
        if outcome.is_destroyed() {
            log::info!("avatar destroyed");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatGroundMover, InputSnapshot, NoCamera, Pickup, PickupOutcome};
    use nalgebra::{Vector2, Vector3};

    #[test]
    fn pickup_equips_avatar_and_enables_swing() {
        let mut avatar = Avatar::new(MotionSettings::default()).unwrap();
        assert!(!avatar.request_swing());

        let mut pickup = Pickup::new();
        assert!(matches!(
            pickup.on_overlap(Some(&mut avatar)),
            PickupOutcome::Collected {
                newly_equipped: true
            }
        ));
        assert!(avatar.has_weapon());
        assert!(avatar.request_swing());
        assert!(avatar.swing.consume());
    }

    #[test]
    fn destroyed_avatar_stops_moving() {
        let mut avatar = Avatar::new(MotionSettings::default()).unwrap();
        let mut mover = FlatGroundMover::new(Vector3::zeros(), 0.0);
        avatar.controller.on_move_input(Vector2::new(0.0, 1.0));

        assert!(avatar.tick(0.1, &NoCamera, &mut mover).is_some());
        assert!(avatar.take_damage(DEFAULT_AVATAR_HEALTH).is_destroyed());

        let before = mover.position;
        assert!(avatar.tick(0.1, &NoCamera, &mut mover).is_none());
        assert_eq!(mover.position, before);
    }

    #[test]
    fn update_polls_input_before_moving() {
        let mut avatar = Avatar::new(MotionSettings::default()).unwrap();
        let mut mover = FlatGroundMover::new(Vector3::zeros(), 0.0);
        let mut input = InputSnapshot {
            move_axis: Vector2::new(0.0, 1.0),
            jump_pressed: true,
            jump_held: true,
            ..InputSnapshot::default()
        };

        let report = avatar.update(0.1, &mut input, &NoCamera, &mut mover);

        assert!(report.is_some_and(|r| r.jumped));
        // Default heading faces +Z at 5 m/s.
        assert!((mover.position.z - 0.5).abs() < 1.0e-5);
        assert!(mover.position.y > 0.0);

        assert!(avatar.take_damage(DEFAULT_AVATAR_HEALTH).is_destroyed());
        let before = mover.position;
        assert!(avatar.update(0.1, &mut input, &NoCamera, &mut mover).is_none());
        assert_eq!(mover.position, before);
    }
}
