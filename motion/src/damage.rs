use crate::constants::DEFAULT_DESTRUCTIBLE_HEALTH;

/// Result of applying damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still standing with this much health left.
    Survived { remaining: i32 },
    /// This hit took health to zero or below. The owner should be destroyed.
    Destroyed,
    /// Already destroyed earlier; nothing changed.
    AlreadyDestroyed,
}

impl DamageOutcome {
    #[inline]
    pub fn is_destroyed(self) -> bool {
        matches!(self, DamageOutcome::Destroyed)
    }
}

/// Anything damage sources can hit.
pub trait Damageable {
    fn take_damage(&mut self, amount: i32) -> DamageOutcome;
}

/// Hit-point counter that signals destruction once at zero.
///
/// No regeneration. Negative damage is treated as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destructible {
    health: i32,
    destroyed: bool,
}

impl Destructible {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            destroyed: health <= 0,
        }
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Default for Destructible {
    fn default() -> Self {
        Self::new(DEFAULT_DESTRUCTIBLE_HEALTH)
    }
}

impl Damageable for Destructible {
    fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::AlreadyDestroyed;
        }

        self.health = self.health.saturating_sub(amount.max(0));
        if self.health <= 0 {
            self.destroyed = true;
            log::debug!("destructible reached {} health, destroyed", self.health);
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::Survived {
                remaining: self.health,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_hits_destroy_default() {
        let mut d = Destructible::default();
        assert_eq!(d.take_damage(1), DamageOutcome::Survived { remaining: 2 });
        assert_eq!(d.take_damage(1), DamageOutcome::Survived { remaining: 1 });
        assert_eq!(d.take_damage(1), DamageOutcome::Destroyed);
        assert!(d.is_destroyed());
    }

    #[test]
    fn overkill_destroys_once() {
        let mut d = Destructible::new(2);
        assert!(d.take_damage(10).is_destroyed());
        assert_eq!(d.take_damage(1), DamageOutcome::AlreadyDestroyed);
        assert_eq!(d.health(), -8);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut d = Destructible::new(3);
        assert_eq!(d.take_damage(-5), DamageOutcome::Survived { remaining: 3 });
    }

    #[test]
    fn zero_health_starts_destroyed() {
        let mut d = Destructible::new(0);
        assert!(d.is_destroyed());
        assert_eq!(d.take_damage(1), DamageOutcome::AlreadyDestroyed);
    }
}
