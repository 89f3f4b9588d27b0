//! Battle configuration
//!
//! Loaded once at startup from JSON. Every field has a default so partial
//! files are accepted.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ArenaError, ArenaResult};

/// Spawn record for one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpawn {
    /// Display name (logging and UI only)
    pub name: String,
    /// Board position, used for attack ordering
    pub position: Vec2,
    pub max_health: i32,
    pub attack_damage: i32,
    /// Seconds between enemy launches (<= 0 disables the enemy's charge)
    pub charge_duration: f32,
    /// Impulse handed to physics when the enemy launches a ball
    pub launch_impulse: Vec2,
}

impl Default for EnemySpawn {
    fn default() -> Self {
        Self {
            name: "Enemy".to_string(),
            position: Vec2::ZERO,
            max_health: 40,
            attack_damage: 5,
            charge_duration: ENEMY_CHARGE_DURATION,
            launch_impulse: Vec2::new(0.0, -300.0),
        }
    }
}

/// Battle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === Timers ===
    /// Player action window in seconds (<= 0 disables the board timer)
    pub board_timer_duration: f32,
    /// Seconds to charge one extra ball (<= 0 disables charging)
    pub ball_charge_duration: f32,

    // === Player ===
    pub base_attack_damage: i32,
    pub initial_balls_per_turn: u32,
    pub player_max_health: i32,

    // === Enemy phase pacing ===
    pub enemy_phase_intro_delay: f32,
    pub enemy_attack_interval: f32,
    pub enemy_phase_outro_delay: f32,

    // === Roster ===
    pub enemies: Vec<EnemySpawn>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board_timer_duration: BOARD_TIMER_DURATION,
            ball_charge_duration: BALL_CHARGE_DURATION,

            base_attack_damage: BASE_ATTACK_DAMAGE,
            initial_balls_per_turn: INITIAL_BALLS_PER_TURN,
            player_max_health: PLAYER_MAX_HEALTH,

            enemy_phase_intro_delay: ENEMY_PHASE_INTRO_DELAY,
            enemy_attack_interval: ENEMY_ATTACK_INTERVAL,
            enemy_phase_outro_delay: ENEMY_PHASE_OUTRO_DELAY,

            enemies: vec![
                EnemySpawn {
                    name: "Slime".to_string(),
                    position: Vec2::new(-120.0, 200.0),
                    ..Default::default()
                },
                EnemySpawn {
                    name: "Golem".to_string(),
                    position: Vec2::new(120.0, 200.0),
                    max_health: 60,
                    attack_damage: 7,
                    charge_duration: 10.0,
                    ..Default::default()
                },
            ],
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ArenaResult<Self> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> ArenaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!(
            "Loaded config from {} ({} enemies)",
            path.display(),
            config.enemies.len()
        );
        Ok(config)
    }

    /// Pretty JSON for `--dump-config`
    pub fn to_json(&self) -> ArenaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that cannot describe a playable battle.
    ///
    /// Non-positive timer durations are allowed: they disable that timer.
    pub fn validate(&self) -> ArenaResult<()> {
        let durations = [
            ("board_timer_duration", self.board_timer_duration),
            ("ball_charge_duration", self.ball_charge_duration),
            ("enemy_phase_intro_delay", self.enemy_phase_intro_delay),
            ("enemy_attack_interval", self.enemy_attack_interval),
            ("enemy_phase_outro_delay", self.enemy_phase_outro_delay),
        ];
        for (name, value) in durations {
            if !value.is_finite() {
                return Err(ArenaError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        for (name, value) in &durations[2..] {
            if *value < 0.0 {
                return Err(ArenaError::InvalidConfig(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }

        if self.player_max_health <= 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "player_max_health must be positive (got {})",
                self.player_max_health
            )));
        }
        if self.base_attack_damage < 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "base_attack_damage must not be negative (got {})",
                self.base_attack_damage
            )));
        }

        for enemy in &self.enemies {
            if enemy.max_health <= 0 {
                return Err(ArenaError::InvalidConfig(format!(
                    "enemy {} must have positive max_health",
                    enemy.name
                )));
            }
            if enemy.attack_damage < 0 {
                return Err(ArenaError::InvalidConfig(format!(
                    "enemy {} has negative attack_damage",
                    enemy.name
                )));
            }
            if !enemy.charge_duration.is_finite() || !enemy.position.is_finite() {
                return Err(ArenaError::InvalidConfig(format!(
                    "enemy {} has non-finite values",
                    enemy.name
                )));
            }
        }

        Ok(())
    }
}
