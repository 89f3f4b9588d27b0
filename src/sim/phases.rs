//! Player and enemy phases
//!
//! The enemy rundown is a queue of scripted steps advanced by elapsed time,
//! so "wait, attack, wait" sequences need no suspendable functions.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::events::{InputEvent, SubscriptionId};
use super::machine::{StateKind, TurnState};
use super::orchestrator::TurnOrchestrator;
use super::physics::Physics;
use super::state::EnemyId;

/// The two mutually exclusive turn phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Player,
    Enemy,
}

/// Phase state plugged into the turn machine
#[derive(Debug)]
pub enum Phase {
    Player(PlayerPhaseState),
    Enemy(EnemyPhaseState),
}

impl Phase {
    pub fn new(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Player => Phase::Player(PlayerPhaseState::default()),
            PhaseKind::Enemy => Phase::Enemy(EnemyPhaseState::default()),
        }
    }
}

impl StateKind for Phase {
    type Kind = PhaseKind;

    fn kind(&self) -> PhaseKind {
        match self {
            Phase::Player(_) => PhaseKind::Player,
            Phase::Enemy(_) => PhaseKind::Enemy,
        }
    }
}

impl<P: Physics> TurnState<TurnOrchestrator<P>> for Phase {
    fn on_enter(&mut self, ctx: &mut TurnOrchestrator<P>) {
        match self {
            Phase::Player(state) => state.enter(ctx),
            Phase::Enemy(state) => state.enter(ctx),
        }
    }

    fn on_update(&mut self, ctx: &mut TurnOrchestrator<P>, dt: f32) {
        match self {
            Phase::Player(state) => state.update(ctx),
            Phase::Enemy(state) => state.update(ctx, dt),
        }
    }

    fn on_exit(&mut self, ctx: &mut TurnOrchestrator<P>) {
        match self {
            Phase::Player(state) => state.exit(ctx),
            Phase::Enemy(_) => {}
        }
    }
}

/// Waits for launches to settle and for the player to pick a target
#[derive(Debug, Default)]
pub struct PlayerPhaseState {
    input: Option<SubscriptionId>,
    waiting_for_settle: bool,
}

impl PlayerPhaseState {
    fn enter<P: Physics>(&mut self, ctx: &mut TurnOrchestrator<P>) {
        ctx.begin_turn();
        self.input = Some(ctx.subscribe_input());
    }

    fn update<P: Physics>(&mut self, ctx: &mut TurnOrchestrator<P>) {
        let Some(input) = self.input else {
            return;
        };

        let mut target = None;
        while let Some(event) = ctx.next_input(input) {
            match event {
                InputEvent::LaunchRequested {
                    projectile,
                    impulse,
                } => {
                    if ctx.handle_launch_request(projectile, impulse) {
                        self.waiting_for_settle = true;
                    }
                }
                InputEvent::TargetSelected { enemy } => target = Some(enemy),
            }
        }

        if self.waiting_for_settle && ctx.all_launched_settled() {
            self.waiting_for_settle = false;
            ctx.calculate_and_apply_pending_effects();
            ctx.request_next_ball(false);
        }

        if let Some(enemy) = target {
            if self.waiting_for_settle || !ctx.target_selection_open() {
                log::debug!("Target {enemy:?} selected while the board is busy; ignored");
            } else {
                ctx.resolve_target_selection(enemy);
            }
        }
    }

    fn exit<P: Physics>(&mut self, ctx: &mut TurnOrchestrator<P>) {
        if let Some(input) = self.input.take() {
            ctx.unsubscribe_input(input);
        }
    }
}

/// One step of the enemy rundown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Wait(f32),
    Attack(EnemyId),
    Finish,
}

/// Something the rundown wants done this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    Attack(EnemyId),
    Finish,
}

/// Time-driven queue of scripted steps
#[derive(Debug, Clone, Default)]
pub struct EnemyAttackScript {
    steps: VecDeque<ScriptStep>,
    banked: f32,
}

impl EnemyAttackScript {
    /// intro wait, attacks separated by `interval`, outro wait, finish
    pub fn new(order: &[EnemyId], intro: f32, interval: f32, outro: f32) -> Self {
        let mut steps = VecDeque::with_capacity(order.len() * 2 + 3);
        steps.push_back(ScriptStep::Wait(intro));
        for (i, &enemy) in order.iter().enumerate() {
            if i > 0 {
                steps.push_back(ScriptStep::Wait(interval));
            }
            steps.push_back(ScriptStep::Attack(enemy));
        }
        steps.push_back(ScriptStep::Wait(outro));
        steps.push_back(ScriptStep::Finish);
        Self { steps, banked: 0.0 }
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    /// Spend `dt` on the queue. Leftover time carries into the next step, so
    /// a large `dt` can release several actions at once.
    pub fn advance(&mut self, dt: f32) -> Vec<ScriptAction> {
        self.banked += dt.max(0.0);
        let mut actions = Vec::new();
        while let Some(&step) = self.steps.front() {
            match step {
                ScriptStep::Wait(delay) => {
                    if self.banked < delay {
                        break;
                    }
                    self.banked -= delay;
                }
                ScriptStep::Attack(enemy) => actions.push(ScriptAction::Attack(enemy)),
                ScriptStep::Finish => actions.push(ScriptAction::Finish),
            }
            self.steps.pop_front();
        }
        actions
    }
}

/// Runs the enemy rundown. Takes no player input.
#[derive(Debug, Default)]
pub struct EnemyPhaseState {
    script: EnemyAttackScript,
}

impl EnemyPhaseState {
    fn enter<P: Physics>(&mut self, ctx: &mut TurnOrchestrator<P>) {
        let order = ctx.roster().enemies_in_attack_order();
        let config = ctx.config();
        self.script = EnemyAttackScript::new(
            &order,
            config.enemy_phase_intro_delay,
            config.enemy_attack_interval,
            config.enemy_phase_outro_delay,
        );
        log::debug!("Enemy phase: {} attackers", order.len());
    }

    fn update<P: Physics>(&mut self, ctx: &mut TurnOrchestrator<P>, dt: f32) {
        for action in self.script.advance(dt) {
            if ctx.outcome().is_some() {
                return;
            }
            match action {
                ScriptAction::Attack(enemy) => ctx.enemy_attack(enemy),
                ScriptAction::Finish => ctx.request_phase(PhaseKind::Player),
            }
        }
    }
}
