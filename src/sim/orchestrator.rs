//! Turn orchestration
//!
//! Owns the board timer, the ball-charge timer and the ball economy, reads
//! effect overlaps from physics, applies committed effects to combatant
//! stats and drives the phase machine. Everything happens inside
//! [`TurnOrchestrator::advance`] or a direct operation call; nothing runs in
//! the background.
//!
//! Per tick the order is fixed: board timer, charge timer, enemy charge
//! timers, then the active phase, then any phase change it requested. A
//! timer's event is therefore always published before phase logic looks at
//! the timer in the same tick.

use glam::Vec2;

use super::effects::{EffectAggregator, EffectKind, EffectSource, EffectTotal, EffectTotals};
use super::events::{EventBus, InputEvent, InputQueue, Notification, StatKind, SubscriptionId};
use super::machine::TurnStateMachine;
use super::phases::{Phase, PhaseKind};
use super::physics::Physics;
use super::roster::EnemyRoster;
use super::state::{
    BallEconomy, BattleOutcome, EnemyId, Projectile, ProjectileId, ProjectileStatus, Side,
};
use super::stats::CombatantStats;
use super::timer::{CountdownTimer, TimerEvent};
use crate::config::{ArenaConfig, EnemySpawn};
use crate::error::{ArenaError, ArenaResult};

/// Central coordinator of one battle
pub struct TurnOrchestrator<P: Physics> {
    config: ArenaConfig,
    physics: P,

    player: CombatantStats,
    roster: EnemyRoster,

    /// `None` when disabled by config
    board_timer: Option<CountdownTimer>,
    charge_timer: Option<CountdownTimer>,
    economy: BallEconomy,

    /// Sorted by id
    projectiles: Vec<Projectile>,
    next_projectile_id: u32,
    /// Last observed totals, not yet committed
    pending: EffectTotals,
    /// The player's action window has ended this turn
    window_closed: bool,

    turn: u32,
    outcome: Option<BattleOutcome>,

    /// Taken out while a phase runs so the phase can borrow `self`
    machine: Option<TurnStateMachine<Phase>>,
    phase: Option<PhaseKind>,
    requested_phase: Option<PhaseKind>,

    notifications: EventBus<Notification>,
    input: InputQueue,
}

impl<P: Physics> TurnOrchestrator<P> {
    /// Wire up a battle. Call [`start`](Self::start) to enter the first turn.
    pub fn new(config: ArenaConfig, physics: P) -> ArenaResult<Self> {
        config.validate()?;

        let board_timer = CountdownTimer::optional("board timer", config.board_timer_duration);
        let charge_timer = CountdownTimer::optional("ball charge timer", config.ball_charge_duration);

        let mut roster = EnemyRoster::new();
        for spawn in &config.enemies {
            roster.register(spawn);
        }

        Ok(Self {
            player: CombatantStats::new(config.player_max_health, config.base_attack_damage),
            roster,
            board_timer,
            charge_timer,
            economy: BallEconomy::default(),
            projectiles: Vec::new(),
            next_projectile_id: 1,
            pending: EffectTotals::default(),
            window_closed: false,
            turn: 0,
            outcome: None,
            machine: Some(TurnStateMachine::new()),
            phase: None,
            requested_phase: None,
            notifications: EventBus::new(),
            input: InputQueue::default(),
            config,
            physics,
        })
    }

    /// Enter the first player phase. Only valid once.
    pub fn start(&mut self) -> ArenaResult<()> {
        let Some(mut machine) = self.machine.take() else {
            return Err(ArenaError::AlreadyInitialized);
        };
        let result = machine.initialize(Phase::new(PhaseKind::Player), self);
        self.machine = Some(machine);
        result?;

        self.phase = Some(PhaseKind::Player);
        self.publish(Notification::PhaseChanged {
            phase: PhaseKind::Player,
        });
        if self.roster.is_empty() {
            log::warn!("Battle started with no enemies");
            self.end_battle(BattleOutcome::Victory);
        }
        Ok(())
    }

    /// Run one scheduling step
    pub fn advance(&mut self, dt: f32) {
        if self.outcome.is_some() {
            return;
        }
        let dt = dt.max(0.0);

        self.tick_board_timer(dt);
        self.tick_charge_timer(dt);
        self.tick_enemy_charges(dt);

        if let Some(mut machine) = self.machine.take() {
            machine.tick(self, dt);
            self.machine = Some(machine);
        }
        self.flush_transitions();
    }

    /// Hand a resolved input event to whichever phase is listening.
    ///
    /// Returns false when no phase accepts input right now and the event
    /// was dropped.
    pub fn submit(&mut self, event: InputEvent) -> bool {
        let delivered = self.input.push(event);
        if !delivered {
            log::debug!("Input {event:?} dropped: no phase is listening");
        }
        delivered
    }

    // === Turn operations ===

    /// Reset everything turn-scoped. Runs on every player phase entry.
    pub fn begin_turn(&mut self) {
        self.turn += 1;
        log::info!("Turn {} begins", self.turn);
        self.publish(Notification::TurnStarted { turn: self.turn });

        self.pending = EffectTotals::default();
        self.publish(Notification::AccumulatedBonusChanged { totals: Vec::new() });
        self.retire_all_projectiles();

        self.player.reset_defense();
        self.player.reset_attack();
        self.publish_stat(Side::Player, StatKind::Defense, 0);
        self.publish_stat(Side::Player, StatKind::Attack, self.player.attack_damage());
        let enemy_stats: Vec<(EnemyId, i32)> = self
            .roster
            .iter_mut()
            .map(|enemy| {
                enemy.stats.reset_defense();
                enemy.stats.reset_attack();
                (enemy.id, enemy.stats.attack_damage())
            })
            .collect();
        for (id, attack) in enemy_stats {
            self.publish_stat(Side::Enemy(id), StatKind::Defense, 0);
            self.publish_stat(Side::Enemy(id), StatKind::Attack, attack);
        }

        self.window_closed = false;
        if self.economy.action_paused {
            self.economy.action_paused = false;
            self.publish(Notification::ActionPauseChanged { paused: false });
        }
        if let Some(timer) = self.board_timer.as_mut() {
            let event = timer.reset();
            self.publish_board_event(event);
        }
        for enemy in self.roster.iter_mut() {
            if let Some(charge) = enemy.charge.as_mut() {
                charge.reset();
            }
        }

        self.economy.balls_in_hand = self.config.initial_balls_per_turn;
        self.publish(Notification::BallsInHandChanged {
            balls: self.economy.balls_in_hand,
        });

        self.stop_charging();
        if self.economy.balls_in_hand == 0 {
            self.start_charging();
        } else {
            self.request_next_ball(false);
        }
    }

    /// Put one unlaunched ball on the board.
    ///
    /// Unforced requests are refused while launching is disallowed, while
    /// the hand is empty, or while a ball is already awaiting launch.
    /// Refusals are routine and only logged at debug level.
    pub fn request_next_ball(&mut self, force: bool) -> Option<ProjectileId> {
        if self.outcome.is_some() {
            return None;
        }
        if !force {
            if !self.can_launch() {
                log::debug!("Ball request refused: launching is not allowed");
                return None;
            }
            if self.economy.balls_in_hand == 0 {
                log::debug!("Ball request refused: no balls in hand");
                return None;
            }
            if let Some(waiting) = self.awaiting_projectile() {
                log::debug!("Ball request refused: {waiting:?} is still awaiting launch");
                return None;
            }
        }
        Some(self.spawn_projectile(Side::Player))
    }

    /// Fling an awaiting ball. Returns true if the launch happened.
    pub fn handle_launch_request(&mut self, projectile: ProjectileId, impulse: Vec2) -> bool {
        if !self.can_launch() {
            log::debug!("Launch of {projectile:?} refused: launching is not allowed");
            return false;
        }
        let Some(ball) = self.projectiles.iter_mut().find(|p| p.id == projectile) else {
            log::debug!("Launch of {projectile:?} refused: unknown projectile");
            return false;
        };
        if ball.is_launched() {
            log::debug!("Launch of {projectile:?} refused: already launched");
            return false;
        }
        ball.status = ProjectileStatus::Launched;

        self.economy.balls_in_hand = self.economy.balls_in_hand.saturating_sub(1);
        self.publish(Notification::BallsInHandChanged {
            balls: self.economy.balls_in_hand,
        });
        self.physics.apply_impulse(projectile, impulse);
        self.publish(Notification::ProjectileLaunched { projectile });

        if self.economy.balls_in_hand == 0 {
            self.start_charging();
        }
        true
    }

    /// Physics reported a collision; each one escalates the ball's effects
    pub fn register_collision(&mut self, projectile: ProjectileId) -> bool {
        match self
            .projectiles
            .iter_mut()
            .find(|p| p.id == projectile && p.is_launched())
        {
            Some(ball) => {
                ball.level += 1;
                true
            }
            None => false,
        }
    }

    /// Observe current overlaps and publish per-side totals without
    /// committing them to any stats.
    pub fn calculate_and_apply_pending_effects(&mut self) -> &EffectTotals {
        let sources = self.effect_sources();
        self.pending = EffectAggregator::aggregate(&sources);
        self.publish(Notification::AccumulatedBonusChanged {
            totals: self.pending.to_vec(),
        });
        &self.pending
    }

    /// Deal the player's attack to `target` and hand the turn to the enemies.
    ///
    /// Only valid during the player phase once target selection is open.
    /// Returns false (and changes nothing) otherwise, or when `target` is
    /// no longer on the roster.
    pub fn resolve_target_selection(&mut self, target: EnemyId) -> bool {
        if self.outcome.is_some()
            || self.phase != Some(PhaseKind::Player)
            || self.requested_phase.is_some()
        {
            log::debug!("Target selection of {target:?} ignored: not the player's move");
            return false;
        }
        if !self.target_selection_open() {
            log::debug!("Target selection of {target:?} ignored: board still active");
            return false;
        }
        if !self.roster.contains(target) {
            log::debug!("Target selection of {target:?} ignored: not on the roster");
            return false;
        }
        if !self.window_closed {
            // Board timer disabled: close the window now so buffs commit once
            self.on_board_timer_expired();
        }

        let damage = self.player.attack_damage();
        log::info!("Player strikes {target:?} for {damage}");
        self.damage_enemy(target, damage);

        self.player.reset_attack();
        self.publish_stat(Side::Player, StatKind::Attack, self.player.attack_damage());
        self.retire_all_projectiles();

        self.publish(Notification::TurnEnded { turn: self.turn });
        if self.outcome.is_none() {
            self.request_phase(PhaseKind::Enemy);
            self.flush_transitions();
        }
        true
    }

    /// End of the player's action window: freeze the board, commit every
    /// overlapping effect for both sides, then clear the board.
    pub fn on_board_timer_expired(&mut self) {
        if self.window_closed {
            return;
        }
        self.window_closed = true;
        log::debug!("Action window closed on turn {}", self.turn);

        if let Some(timer) = self.charge_timer.as_mut() {
            timer.pause();
        }
        self.economy.is_charging = false;
        for enemy in self.roster.iter_mut() {
            if let Some(charge) = enemy.charge.as_mut() {
                charge.pause();
            }
        }

        for projectile in &self.projectiles {
            self.physics.zero_velocity(projectile.id);
        }

        let sources = self.effect_sources();
        let totals = EffectAggregator::aggregate(&sources);
        for total in totals.iter() {
            self.commit_effect(total);
        }

        self.retire_all_projectiles();
        self.pending = EffectTotals::default();
        self.publish(Notification::AccumulatedBonusChanged { totals: Vec::new() });
    }

    /// Freeze the board timer, the charge timer and every enemy charge
    /// together. Repeated calls have no further effect.
    pub fn pause_for_player_action(&mut self) {
        if self.economy.action_paused || self.outcome.is_some() {
            return;
        }
        self.economy.action_paused = true;
        if let Some(timer) = self.board_timer.as_mut() {
            timer.pause();
        }
        if let Some(timer) = self.charge_timer.as_mut() {
            timer.pause();
        }
        for enemy in self.roster.iter_mut() {
            if let Some(charge) = enemy.charge.as_mut() {
                charge.pause();
            }
        }
        self.publish(Notification::ActionPauseChanged { paused: true });
    }

    /// Undo [`pause_for_player_action`](Self::pause_for_player_action).
    ///
    /// Clocks restart only while the action window is still open.
    pub fn resume_after_player_action(&mut self) {
        if !self.economy.action_paused {
            return;
        }
        self.economy.action_paused = false;
        if !self.window_closed && self.phase == Some(PhaseKind::Player) {
            if let Some(timer) = self.board_timer.as_mut() {
                timer.resume();
            }
            if self.economy.is_charging {
                if let Some(timer) = self.charge_timer.as_mut() {
                    timer.resume();
                }
            }
            for enemy in self.roster.iter_mut() {
                if let Some(charge) = enemy.charge.as_mut() {
                    charge.resume();
                }
            }
        }
        self.publish(Notification::ActionPauseChanged { paused: false });
    }

    /// One enemy strikes the player. Enemies that left the roster are
    /// skipped.
    pub fn enemy_attack(&mut self, enemy: EnemyId) {
        if self.outcome.is_some() {
            return;
        }
        let Some(attacker) = self.roster.get(enemy).filter(|e| !e.stats.is_defeated()) else {
            log::debug!("{enemy:?} is gone; skipping its attack");
            return;
        };
        let damage = attacker.stats.attack_damage();
        log::debug!("{} attacks for {damage}", attacker.name);
        self.publish(Notification::EnemyAttacked { enemy, damage });
        self.damage_player(damage);
    }

    /// Bring an enemy into the battle at any tick. Its charge timer starts
    /// right away while the action window is open and unpaused; a rundown
    /// already in progress does not pick it up.
    pub fn spawn_enemy(&mut self, spawn: &EnemySpawn) -> EnemyId {
        let id = self.roster.register(spawn);
        let live = self.outcome.is_none()
            && self.phase == Some(PhaseKind::Player)
            && !self.window_closed
            && !self.economy.action_paused;
        if live {
            if let Some(charge) = self.roster.get_mut(id).and_then(|e| e.charge.as_mut()) {
                charge.reset();
            }
        }
        log::info!("{} joins the battle as {id:?}", spawn.name);
        self.publish(Notification::EnemySpawned { enemy: id });
        id
    }

    /// Take an enemy out of the battle at any tick. Later attack steps for
    /// it are skipped. Removing the last enemy wins the battle.
    ///
    /// Returns false for ids no longer on the roster.
    pub fn remove_enemy(&mut self, id: EnemyId) -> bool {
        let Some(enemy) = self.roster.unregister(id) else {
            log::debug!("{id:?} is not on the roster; nothing to remove");
            return false;
        };
        log::info!("{} defeated", enemy.name);
        self.publish(Notification::Defeated {
            combatant: Side::Enemy(id),
        });
        if self.roster.is_empty() {
            self.end_battle(BattleOutcome::Victory);
        }
        true
    }

    // === Queries ===

    /// Launching is blocked while paused, after the window closed, or once
    /// the battle is over
    pub fn can_launch(&self) -> bool {
        !self.economy.action_paused && !self.window_closed && self.outcome.is_none()
    }

    /// The board has ended (or, with no board timer, every ball is at rest)
    pub fn target_selection_open(&self) -> bool {
        self.window_closed || (self.board_timer.is_none() && self.all_launched_settled())
    }

    /// True when physics reports every launched ball at rest
    pub fn all_launched_settled(&self) -> bool {
        self.projectiles
            .iter()
            .filter(|p| p.is_launched())
            .all(|p| self.physics.is_at_rest(p.id))
    }

    pub fn awaiting_projectile(&self) -> Option<ProjectileId> {
        self.projectiles
            .iter()
            .find(|p| p.status == ProjectileStatus::AwaitingLaunch)
            .map(|p| p.id)
    }

    pub fn phase(&self) -> Option<PhaseKind> {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn player(&self) -> &CombatantStats {
        &self.player
    }

    pub fn roster(&self) -> &EnemyRoster {
        &self.roster
    }

    pub fn economy(&self) -> &BallEconomy {
        &self.economy
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pending_totals(&self) -> &EffectTotals {
        &self.pending
    }

    pub fn board_timer(&self) -> Option<&CountdownTimer> {
        self.board_timer.as_ref()
    }

    pub fn charge_timer(&self) -> Option<&CountdownTimer> {
        self.charge_timer.as_ref()
    }

    pub fn is_window_closed(&self) -> bool {
        self.window_closed
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    /// Subscribe here for presentation updates
    pub fn notifications(&mut self) -> &mut EventBus<Notification> {
        &mut self.notifications
    }

    // === Phase plumbing ===

    pub(crate) fn request_phase(&mut self, kind: PhaseKind) {
        self.requested_phase = Some(kind);
    }

    pub(crate) fn subscribe_input(&mut self) -> SubscriptionId {
        self.input.subscribe()
    }

    pub(crate) fn unsubscribe_input(&mut self, id: SubscriptionId) {
        self.input.unsubscribe(id);
    }

    pub(crate) fn next_input(&mut self, id: SubscriptionId) -> Option<InputEvent> {
        self.input.pop(id)
    }

    /// Apply a requested phase change. Inside a phase update the machine is
    /// checked out, so the change waits for the end of `advance`.
    fn flush_transitions(&mut self) {
        let Some(mut machine) = self.machine.take() else {
            return;
        };
        while let Some(kind) = self.requested_phase.take() {
            if self.outcome.is_some() {
                break;
            }
            if machine.change_state(Phase::new(kind), self) {
                log::info!("Phase -> {kind:?}");
                self.phase = Some(kind);
                self.publish(Notification::PhaseChanged { phase: kind });
            }
        }
        self.machine = Some(machine);
    }

    // === Internals ===

    fn tick_board_timer(&mut self, dt: f32) {
        let Some(event) = self.board_timer.as_mut().and_then(|t| t.tick(dt)) else {
            return;
        };
        self.publish_board_event(event);
        if event == TimerEvent::Ended {
            log::info!("Board timer expired on turn {}", self.turn);
            self.on_board_timer_expired();
        }
    }

    fn publish_board_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Progress(progress) => {
                self.publish(Notification::BoardTimerProgress { progress });
            }
            TimerEvent::Ended => {
                self.publish(Notification::BoardTimerProgress { progress: 0.0 });
                self.publish(Notification::BoardTimerEnded);
            }
        }
    }

    fn tick_charge_timer(&mut self, dt: f32) {
        let Some(event) = self.charge_timer.as_mut().and_then(|t| t.tick(dt)) else {
            return;
        };
        match event {
            TimerEvent::Progress(remaining) => self.set_charge_progress(1.0 - remaining),
            TimerEvent::Ended => {
                self.set_charge_progress(1.0);
                self.grant_charged_ball();
            }
        }
    }

    fn grant_charged_ball(&mut self) {
        if let Some(timer) = self.charge_timer.as_mut() {
            timer.pause();
        }
        self.economy.is_charging = false;
        self.economy.balls_in_hand += 1;
        log::debug!("Charge complete: {} ball(s) in hand", self.economy.balls_in_hand);
        self.publish(Notification::BallsInHandChanged {
            balls: self.economy.balls_in_hand,
        });
        self.request_next_ball(true);
    }

    fn start_charging(&mut self) {
        if self.window_closed {
            return;
        }
        let Some(timer) = self.charge_timer.as_mut() else {
            return;
        };
        timer.reset();
        self.economy.is_charging = true;
        self.set_charge_progress(0.0);
    }

    fn stop_charging(&mut self) {
        if let Some(timer) = self.charge_timer.as_mut() {
            timer.pause();
        }
        self.economy.is_charging = false;
        self.set_charge_progress(0.0);
    }

    fn set_charge_progress(&mut self, progress: f32) {
        self.economy.charge_progress = progress.clamp(0.0, 1.0);
        self.publish(Notification::ChargeProgressChanged {
            progress: self.economy.charge_progress,
        });
    }

    fn tick_enemy_charges(&mut self, dt: f32) {
        let ready: Vec<EnemyId> = self
            .roster
            .iter_mut()
            .filter_map(|enemy| {
                let ended = enemy.charge.as_mut()?.tick(dt) == Some(TimerEvent::Ended);
                ended.then_some(enemy.id)
            })
            .collect();
        for enemy in ready {
            self.launch_enemy_ball(enemy);
        }
    }

    fn launch_enemy_ball(&mut self, enemy: EnemyId) {
        if self.window_closed || self.outcome.is_some() {
            return;
        }
        let Some(impulse) = self.roster.get(enemy).map(|e| e.launch_impulse) else {
            return;
        };
        let projectile = self.spawn_projectile(Side::Enemy(enemy));
        if let Some(ball) = self.projectiles.iter_mut().find(|p| p.id == projectile) {
            ball.status = ProjectileStatus::Launched;
        }
        self.physics.apply_impulse(projectile, impulse);
        self.publish(Notification::ProjectileLaunched { projectile });
        log::debug!("{enemy:?} launched {projectile:?}");

        if let Some(charge) = self.roster.get_mut(enemy).and_then(|e| e.charge.as_mut()) {
            charge.reset();
        }
    }

    fn spawn_projectile(&mut self, owner: Side) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;
        self.projectiles.push(Projectile::new(id, owner));
        self.physics.spawn(id, owner);
        self.publish(Notification::ProjectileSpawned {
            projectile: id,
            owner,
        });
        id
    }

    fn retire_all_projectiles(&mut self) {
        for projectile in std::mem::take(&mut self.projectiles) {
            self.physics.despawn(projectile.id);
            self.publish(Notification::ProjectileRetired {
                projectile: projectile.id,
            });
        }
    }

    /// Snapshot of every launched ball's overlaps
    fn effect_sources(&self) -> Vec<EffectSource> {
        self.projectiles
            .iter()
            .filter(|p| p.is_launched())
            .flat_map(|p| {
                self.physics
                    .overlapping_regions(p.id)
                    .into_iter()
                    .map(move |region| {
                        EffectSource::new(p.owner, region.kind, region.base_value, p.level)
                    })
            })
            .collect()
    }

    fn stats_mut(&mut self, side: Side) -> Option<&mut CombatantStats> {
        match side {
            Side::Player => Some(&mut self.player),
            Side::Enemy(id) => self.roster.get_mut(id).map(|e| &mut e.stats),
        }
    }

    fn commit_effect(&mut self, total: EffectTotal) {
        let Some(stats) = self.stats_mut(total.side) else {
            log::debug!("Dropping {:?} for departed {:?}", total.kind, total.side);
            return;
        };
        let changed = match total.kind {
            EffectKind::Attack => stats.add_attack(total.value).map(|v| (StatKind::Attack, v)),
            EffectKind::Defense => stats.add_defense(total.value).map(|v| (StatKind::Defense, v)),
            EffectKind::Heal => stats.add_health(total.value).map(|v| (StatKind::Health, v)),
            EffectKind::None => None,
        };
        if let Some((stat, value)) = changed {
            self.publish_stat(total.side, stat, value);
        }
    }

    fn damage_enemy(&mut self, target: EnemyId, amount: i32) {
        let Some(enemy) = self.roster.get_mut(target) else {
            return;
        };
        let outcome = enemy.stats.apply_damage(amount);
        if !outcome.applied {
            return;
        }
        let (defense, health) = (enemy.stats.defense(), enemy.stats.health());
        let side = Side::Enemy(target);
        self.publish_stat(side, StatKind::Defense, defense);
        self.publish_stat(side, StatKind::Health, health);

        if outcome.defeated {
            self.remove_enemy(target);
        }
    }

    fn damage_player(&mut self, amount: i32) {
        let outcome = self.player.apply_damage(amount);
        if !outcome.applied {
            return;
        }
        self.publish_stat(Side::Player, StatKind::Defense, self.player.defense());
        self.publish_stat(Side::Player, StatKind::Health, self.player.health());
        if outcome.defeated {
            log::info!("Player defeated on turn {}", self.turn);
            self.publish(Notification::Defeated {
                combatant: Side::Player,
            });
            self.end_battle(BattleOutcome::Defeat);
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.requested_phase = None;
        if let Some(timer) = self.board_timer.as_mut() {
            timer.pause();
        }
        if let Some(timer) = self.charge_timer.as_mut() {
            timer.pause();
        }
        self.economy.is_charging = false;
        log::info!("Battle over after {} turn(s): {outcome:?}", self.turn);
        self.publish(Notification::BattleEnded { outcome });
    }

    fn publish_stat(&mut self, combatant: Side, stat: StatKind, value: i32) {
        self.publish(Notification::StatChanged {
            combatant,
            stat,
            value,
        });
    }

    fn publish(&mut self, notification: Notification) {
        self.notifications.publish(&notification);
    }
}
