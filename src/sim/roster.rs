//! Living enemies and their attack order

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EnemyId;
use super::stats::CombatantStats;
use super::timer::CountdownTimer;
use crate::config::EnemySpawn;

/// A registered enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub position: Vec2,
    pub stats: CombatantStats,
    /// Launch clock; `None` when the spawn record disabled it
    pub charge: Option<CountdownTimer>,
    pub launch_impulse: Vec2,
}

/// Registry of living enemies, kept sorted by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an enemy at full health and return its handle
    pub fn register(&mut self, spawn: &EnemySpawn) -> EnemyId {
        let id = EnemyId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.enemies.push(Enemy {
            id,
            name: spawn.name.clone(),
            position: spawn.position,
            stats: CombatantStats::new(spawn.max_health, spawn.attack_damage),
            charge: CountdownTimer::optional("enemy charge timer", spawn.charge_duration),
            launch_impulse: spawn.launch_impulse,
        });
        id
    }

    /// Remove an enemy. Unknown handles return `None`.
    pub fn unregister(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    /// Lowest y attacks first, then lowest x, then registration order
    pub fn enemies_in_attack_order(&self) -> Vec<EnemyId> {
        let mut living: Vec<&Enemy> = self
            .enemies
            .iter()
            .filter(|e| !e.stats.is_defeated())
            .collect();
        living.sort_by(|a, b| {
            a.position
                .y
                .total_cmp(&b.position.y)
                .then(a.position.x.total_cmp(&b.position.x))
                .then(a.id.cmp(&b.id))
        });
        living.into_iter().map(|e| e.id).collect()
    }

    /// Living enemy with the least health (ties go to the lower id)
    pub fn weakest(&self) -> Option<EnemyId> {
        self.enemies
            .iter()
            .filter(|e| !e.stats.is_defeated())
            .min_by_key(|e| (e.stats.health(), e.id))
            .map(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(name: &str, x: f32, y: f32, attack: i32) -> EnemySpawn {
        EnemySpawn {
            name: name.to_string(),
            position: Vec2::new(x, y),
            attack_damage: attack,
            ..Default::default()
        }
    }

    #[test]
    fn test_attack_order_y_then_x() {
        let mut roster = EnemyRoster::new();
        let a = roster.register(&spawn("A", 1.0, 0.0, 5));
        let b = roster.register(&spawn("B", 0.0, 0.0, 7));
        assert_eq!(roster.enemies_in_attack_order(), vec![b, a]);

        let c = roster.register(&spawn("C", -5.0, -1.0, 1));
        assert_eq!(roster.enemies_in_attack_order(), vec![c, b, a]);
    }

    #[test]
    fn test_exact_tie_uses_registration_order() {
        let mut roster = EnemyRoster::new();
        let first = roster.register(&spawn("A", 2.0, 2.0, 1));
        let second = roster.register(&spawn("B", 2.0, 2.0, 1));
        assert_eq!(roster.enemies_in_attack_order(), vec![first, second]);
    }

    #[test]
    fn test_unregister_and_stale_handles() {
        let mut roster = EnemyRoster::new();
        let a = roster.register(&spawn("A", 0.0, 0.0, 1));
        let b = roster.register(&spawn("B", 1.0, 0.0, 1));

        assert!(roster.unregister(a).is_some());
        assert!(roster.unregister(a).is_none());
        assert!(!roster.contains(a));
        assert!(roster.get_mut(a).is_none());
        assert_eq!(roster.enemies_in_attack_order(), vec![b]);
        assert_ne!(roster.register(&spawn("C", 0.0, 0.0, 1)), a);
    }

    #[test]
    fn test_disabled_charge() {
        let mut roster = EnemyRoster::new();
        let id = roster.register(&EnemySpawn {
            charge_duration: 0.0,
            ..Default::default()
        });
        assert!(roster.get(id).unwrap().charge.is_none());
    }

    #[test]
    fn test_weakest() {
        let mut roster = EnemyRoster::new();
        let a = roster.register(&spawn("A", 0.0, 0.0, 1));
        let b = roster.register(&spawn("B", 0.0, 0.0, 1));
        assert_eq!(roster.weakest(), Some(a));
        roster.get_mut(b).unwrap().stats.apply_damage(3);
        assert_eq!(roster.weakest(), Some(b));
    }
}
