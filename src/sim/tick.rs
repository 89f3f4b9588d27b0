//! Fixed timestep battle tick
//!
//! Translates one frame of raw commands into orchestrator calls, then
//! advances the battle by exactly `dt`.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::events::InputEvent;
use super::orchestrator::TurnOrchestrator;
use super::phases::PhaseKind;
use super::physics::Physics;
use super::state::{EnemyId, ProjectileId};

/// Launch speed used by idle mode
const IDLE_LAUNCH_SPEED: f32 = 420.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fling the awaiting ball with this impulse
    pub launch: Option<Vec2>,
    /// Pick the enemy to strike
    pub target: Option<EnemyId>,
    /// `Some(true)` freezes the clocks while aiming, `Some(false)` releases them
    pub hold_action: Option<bool>,
    /// Collisions the physics engine reported since the last tick
    pub collisions: Vec<ProjectileId>,
    /// Idle/demo mode - AI plays the player's side
    pub idle_mode: bool,
}

/// Advance the battle by one fixed timestep
pub fn tick<P: Physics>(arena: &mut TurnOrchestrator<P>, input: &TickInput, dt: f32) {
    match input.hold_action {
        Some(true) => arena.pause_for_player_action(),
        Some(false) => arena.resume_after_player_action(),
        None => {}
    }

    for &projectile in &input.collisions {
        arena.register_collision(projectile);
    }

    let mut input = input.clone();
    if input.idle_mode {
        let idle = idle_input(arena);
        input.launch = input.launch.or(idle.launch);
        input.target = input.target.or(idle.target);
    }

    if let Some(impulse) = input.launch {
        match arena.awaiting_projectile() {
            Some(projectile) => {
                arena.submit(InputEvent::LaunchRequested {
                    projectile,
                    impulse,
                });
            }
            None => log::debug!("Launch pressed with no ball waiting"),
        }
    }
    if let Some(enemy) = input.target {
        arena.submit(InputEvent::TargetSelected { enemy });
    }

    arena.advance(dt);
}

/// What the demo AI would press this tick.
///
/// Launches every waiting ball on a swept angle and, once the board has
/// closed, goes after the weakest enemy.
pub fn idle_input<P: Physics>(arena: &TurnOrchestrator<P>) -> TickInput {
    let mut input = TickInput::default();
    if arena.phase() != Some(PhaseKind::Player) || arena.outcome().is_some() {
        return input;
    }

    if arena.can_launch() {
        if let Some(ball) = arena.awaiting_projectile() {
            // Sweep left and right so consecutive shots land differently
            let t = ball.0 as f32 * 0.7 + arena.turn() as f32 * 0.3;
            let angle = FRAC_PI_2 + t.sin() * 0.6 + (t * 0.45).sin() * 0.2;
            input.launch = Some(Vec2::from_angle(angle) * IDLE_LAUNCH_SPEED);
        }
    }

    if arena.target_selection_open() {
        input.target = arena.roster().weakest();
    }
    input
}
