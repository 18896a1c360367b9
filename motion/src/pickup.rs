//! Weapon pickup and swing trigger.

/// Capability to receive a weapon.
pub trait WeaponHolder {
    /// Grant the weapon. Idempotent; returns `true` only when it wasn't held before.
    fn equip_weapon(&mut self) -> bool;

    fn has_weapon(&self) -> bool;
}

/// Equipped-weapon flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    weapon_equipped: bool,
}

impl WeaponHolder for Loadout {
    fn equip_weapon(&mut self) -> bool {
        let newly = !self.weapon_equipped;
        self.weapon_equipped = true;
        newly
    }

    fn has_weapon(&self) -> bool {
        self.weapon_equipped
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupOutcome {
    /// The avatar touched the pickup; remove it from the world.
    Collected { newly_equipped: bool },
    /// Not the avatar, or the pickup is already gone.
    Ignored,
}

/// A one-shot weapon pickup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pickup {
    consumed: bool,
}

impl Pickup {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Handle an overlap. `holder` is `Some` only when the overlapping object is the avatar.
    pub fn on_overlap<H>(&mut self, holder: Option<&mut H>) -> PickupOutcome
    where
        H: WeaponHolder + ?Sized,
    {
        if self.consumed {
            return PickupOutcome::Ignored;
        }
        let Some(holder) = holder else {
            return PickupOutcome::Ignored;
        };

        let newly_equipped = holder.equip_weapon();
        self.consumed = true;
        log::debug!("weapon pickup collected (newly equipped: {newly_equipped})");
        PickupOutcome::Collected { newly_equipped }
    }
}

/// One-shot attack trigger, armed by an attack request while a weapon is held and consumed
/// by whatever plays the swing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwingTrigger {
    pending: bool,
}

impl SwingTrigger {
    /// Arm the trigger if `holder` has a weapon. Returns whether it armed.
    pub fn request<H: WeaponHolder + ?Sized>(&mut self, holder: &H) -> bool {
        if holder.has_weapon() {
            self.pending = true;
        }
        self.pending
    }

    /// Take the pending swing, leaving the trigger disarmed.
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equip_is_idempotent() {
        let mut loadout = Loadout::default();
        assert!(loadout.equip_weapon());
        assert!(!loadout.equip_weapon());
        assert!(loadout.has_weapon());
    }

    #[test]
    fn avatar_overlap_collects_once() {
        let mut pickup = Pickup::new();
        let mut loadout = Loadout::default();

        assert_eq!(
            pickup.on_overlap(Some(&mut loadout)),
            PickupOutcome::Collected {
                newly_equipped: true
            }
        );
        assert!(pickup.is_consumed());
        assert_eq!(pickup.on_overlap(Some(&mut loadout)), PickupOutcome::Ignored);
    }

    #[test]
    fn non_avatar_overlap_is_ignored() {
        let mut pickup = Pickup::new();
        assert_eq!(pickup.on_overlap::<Loadout>(None), PickupOutcome::Ignored);
        assert!(!pickup.is_consumed());
    }

    #[test]
    fn already_armed_avatar_still_consumes_pickup() {
        let mut pickup = Pickup::new();
        let mut loadout = Loadout::default();
        loadout.equip_weapon();
        assert_eq!(
            pickup.on_overlap(Some(&mut loadout)),
            PickupOutcome::Collected {
                newly_equipped: false
            }
        );
    }

    #[test]
    fn swing_requires_weapon_and_fires_once() {
        let mut trigger = SwingTrigger::default();
        let mut loadout = Loadout::default();

        assert!(!trigger.request(&loadout));
        assert!(!trigger.consume());

        loadout.equip_weapon();
        assert!(trigger.request(&loadout));
        assert!(trigger.consume());
        assert!(!trigger.consume());
    }
}
