//! Orb Tactics - turn and timer orchestration for a ball-launching arena game
//!
//! Core modules:
//! - `sim`: Deterministic turn core (timers, stats, effects, phases)
//! - `config`: Data-driven battle configuration
//! - `error`: Configuration and lifecycle errors
//!
//! Physics, rendering and raw input live outside this crate. The core only
//! talks to them through [`sim::Physics`], published [`sim::Notification`]s
//! and resolved [`sim::InputEvent`]s.

pub mod config;
pub mod error;
pub mod sim;

pub use config::{ArenaConfig, EnemySpawn};
pub use error::{ArenaError, ArenaResult};

/// Default tuning values
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for a turn-based core)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player action window (seconds)
    pub const BOARD_TIMER_DURATION: f32 = 30.0;
    /// Time to charge one extra ball (seconds)
    pub const BALL_CHARGE_DURATION: f32 = 5.0;
    /// Player baseline attack
    pub const BASE_ATTACK_DAMAGE: i32 = 10;
    /// Balls granted at the start of every player turn
    pub const INITIAL_BALLS_PER_TURN: u32 = 1;
    /// Player starting and maximum health
    pub const PLAYER_MAX_HEALTH: i32 = 100;

    /// Enemy phase pacing (seconds)
    pub const ENEMY_PHASE_INTRO_DELAY: f32 = 0.5;
    pub const ENEMY_ATTACK_INTERVAL: f32 = 0.75;
    pub const ENEMY_PHASE_OUTRO_DELAY: f32 = 0.5;

    /// Enemy charge timer used when a spawn record leaves it unset
    pub const ENEMY_CHARGE_DURATION: f32 = 8.0;
}
