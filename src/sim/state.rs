//! Shared battle types: handles, sides, projectiles and the ball economy

use serde::{Deserialize, Serialize};

/// Handle for a projectile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Handle for a registered enemy. Stays valid (but inert) after defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Which combatant a contribution or stat belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy(EnemyId),
}

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileStatus {
    /// Spawned and waiting for the player to fling it. Never scores.
    AwaitingLaunch,
    /// In flight or settled on the board
    Launched,
}

/// A projectile the core is tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: Side,
    pub status: ProjectileStatus,
    /// Escalation from collisions; adds to every effect it triggers
    pub level: u32,
}

impl Projectile {
    pub fn new(id: ProjectileId, owner: Side) -> Self {
        Self {
            id,
            owner,
            status: ProjectileStatus::AwaitingLaunch,
            level: 0,
        }
    }

    pub fn is_launched(&self) -> bool {
        self.status == ProjectileStatus::Launched
    }
}

/// Player ball supply for the current turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BallEconomy {
    pub balls_in_hand: u32,
    /// Fill level of the charge bar in [0, 1]
    pub charge_progress: f32,
    /// A charge cycle is in progress (possibly paused)
    pub is_charging: bool,
    /// Clocks frozen while the player aims or decides
    pub action_paused: bool,
}

/// How a battle finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}
