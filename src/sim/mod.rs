//! Deterministic battle core
//!
//! All turn logic lives here. This module must stay pure and deterministic:
//! - Time only advances through `tick`/`advance`
//! - Seeded RNG only (and only inside the scripted physics driver)
//! - Stable iteration order (by id, or by sorted map key)
//! - No rendering or platform dependencies

pub mod effects;
pub mod events;
pub mod machine;
pub mod orchestrator;
pub mod phases;
pub mod physics;
pub mod roster;
pub mod state;
pub mod stats;
pub mod tick;
pub mod timer;

pub use effects::{
    EffectAggregator, EffectKind, EffectRegion, EffectSource, EffectTotal, EffectTotals,
};
pub use events::{EventBus, InputEvent, InputQueue, Notification, StatKind, SubscriptionId};
pub use machine::{StateKind, TurnState, TurnStateMachine};
pub use orchestrator::TurnOrchestrator;
pub use phases::{EnemyAttackScript, Phase, PhaseKind};
pub use physics::{Physics, ScriptedPhysics};
pub use roster::{Enemy, EnemyRoster};
pub use state::{
    BallEconomy, BattleOutcome, EnemyId, Projectile, ProjectileId, ProjectileStatus, Side,
};
pub use stats::{CombatantStats, DamageOutcome};
pub use tick::{TickInput, idle_input, tick};
pub use timer::{CountdownTimer, TimerEvent};
