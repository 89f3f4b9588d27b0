//! Combatant stats with shield-first damage absorption
//!
//! Defense is a turn-scoped shield: it soaks damage before health does and is
//! wiped at the start of every player turn together with attack buffs.
//! Health persists across turns and only grows through heal effects.

use serde::{Deserialize, Serialize};

/// What a single `apply_damage` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// False when the combatant was already defeated
    pub applied: bool,
    pub absorbed_by_defense: i32,
    pub dealt_to_health: i32,
    /// Set only on the call that took health to zero
    pub defeated: bool,
}

/// One side's mutable battle stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantStats {
    health: i32,
    max_health: i32,
    defense: i32,
    attack_damage: i32,
    base_attack_damage: i32,
    defeated: bool,
}

impl CombatantStats {
    /// Full health, no shield, attack at baseline.
    ///
    /// Out-of-range inputs are clamped: max health to at least 1, attack to
    /// at least 0.
    pub fn new(max_health: i32, base_attack_damage: i32) -> Self {
        let max_health = max_health.max(1);
        let base_attack_damage = base_attack_damage.max(0);
        Self {
            health: max_health,
            max_health,
            defense: 0,
            attack_damage: base_attack_damage,
            base_attack_damage,
            defeated: false,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn attack_damage(&self) -> i32 {
        self.attack_damage
    }

    pub fn base_attack_damage(&self) -> i32 {
        self.base_attack_damage
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Soak `amount` with defense first, then health. Negative amounts count
    /// as zero. No-op once defeated.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.defeated {
            return DamageOutcome::default();
        }
        let amount = amount.max(0);

        let to_defense = amount.min(self.defense);
        self.defense -= to_defense;
        let to_health = amount - to_defense;
        let before = self.health;
        self.health = (self.health - to_health).max(0);

        let defeated = self.health == 0;
        self.defeated = defeated;
        DamageOutcome {
            applied: true,
            absorbed_by_defense: to_defense,
            dealt_to_health: before - self.health,
            defeated,
        }
    }

    /// Returns the new defense, or `None` if ignored
    pub fn add_defense(&mut self, amount: i32) -> Option<i32> {
        if amount <= 0 || self.defeated {
            return None;
        }
        self.defense = self.defense.saturating_add(amount);
        Some(self.defense)
    }

    /// Returns the new health, or `None` if ignored. Clamped to max health.
    pub fn add_health(&mut self, amount: i32) -> Option<i32> {
        if amount <= 0 || self.defeated {
            return None;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
        Some(self.health)
    }

    /// Returns the new attack, or `None` if ignored
    pub fn add_attack(&mut self, amount: i32) -> Option<i32> {
        if amount <= 0 || self.defeated {
            return None;
        }
        self.attack_damage = self.attack_damage.saturating_add(amount);
        Some(self.attack_damage)
    }

    pub fn reset_defense(&mut self) {
        self.defense = 0;
    }

    pub fn reset_attack(&mut self) {
        self.attack_damage = self.base_attack_damage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defense_absorbs_first() {
        let mut stats = CombatantStats::new(50, 5);
        stats.add_defense(8);

        let outcome = stats.apply_damage(5);
        assert_eq!(outcome.absorbed_by_defense, 5);
        assert_eq!(outcome.dealt_to_health, 0);
        assert_eq!(stats.defense(), 3);
        assert_eq!(stats.health(), 50);

        let outcome = stats.apply_damage(10);
        assert_eq!(outcome.absorbed_by_defense, 3);
        assert_eq!(outcome.dealt_to_health, 7);
        assert_eq!(stats.defense(), 0);
        assert_eq!(stats.health(), 43);
    }

    #[test]
    fn test_defeat_fires_once() {
        let mut stats = CombatantStats::new(10, 1);
        let outcome = stats.apply_damage(25);
        assert!(outcome.defeated);
        assert_eq!(stats.health(), 0);
        assert!(stats.is_defeated());

        let again = stats.apply_damage(5);
        assert!(!again.applied);
        assert!(!again.defeated);
        assert_eq!(stats.add_health(5), None);
    }

    #[test]
    fn test_non_positive_buffs_ignored() {
        let mut stats = CombatantStats::new(10, 3);
        assert_eq!(stats.add_defense(0), None);
        assert_eq!(stats.add_attack(-4), None);
        assert_eq!(stats.add_health(0), None);
        assert_eq!(stats.defense(), 0);
        assert_eq!(stats.attack_damage(), 3);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut stats = CombatantStats::new(20, 0);
        stats.apply_damage(5);
        assert_eq!(stats.add_health(100), Some(20));
    }

    #[test]
    fn test_negative_damage_is_zero() {
        let mut stats = CombatantStats::new(20, 0);
        let outcome = stats.apply_damage(-7);
        assert_eq!(outcome.dealt_to_health, 0);
        assert_eq!(stats.health(), 20);
    }

    #[test]
    fn test_resets_restore_baseline() {
        let mut stats = CombatantStats::new(20, 4);
        stats.add_attack(6);
        stats.add_defense(9);
        stats.reset_attack();
        stats.reset_defense();
        assert_eq!(stats.attack_damage(), 4);
        assert_eq!(stats.defense(), 0);
    }

    proptest! {
        #[test]
        fn prop_damage_is_conserved(
            max_health in 1i32..500,
            defense in 0i32..200,
            amount in 0i32..1000,
        ) {
            let mut stats = CombatantStats::new(max_health, 1);
            stats.add_defense(defense);
            let (def_before, hp_before) = (stats.defense(), stats.health());

            stats.apply_damage(amount);

            prop_assert!(stats.health() >= 0);
            prop_assert!(stats.defense() >= 0);
            if stats.health() > 0 {
                prop_assert_eq!(
                    def_before - stats.defense() + hp_before - stats.health(),
                    amount
                );
            }
        }
    }
}
