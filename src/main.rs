//! Orb Tactics headless demo
//!
//! Plays a battle with the scripted physics driver and the idle AI, driving
//! the turn core through the same fixed-step loop a frontend would use.

use std::path::PathBuf;

use clap::Parser;

use orb_tactics::consts::{MAX_SUBSTEPS, SIM_DT};
use orb_tactics::sim::{Notification, ScriptedPhysics, TickInput, TurnOrchestrator, tick};
use orb_tactics::{ArenaConfig, ArenaResult};

/// Turn-based ball-launching arena, played by the demo AI
#[derive(Parser, Debug)]
#[command(name = "orb-tactics")]
#[command(about = "Headless Orb Tactics battle runner")]
#[command(version)]
struct Args {
    /// Battle configuration (JSON). Built-in defaults when omitted.
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Seed for the scripted physics driver
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Stop after this many turns even if nobody has won
    #[arg(long, default_value = "50")]
    max_turns: u32,

    /// Frame length fed to the fixed-step loop (seconds)
    #[arg(long, default_value = "0.033")]
    frame_dt: f32,

    /// Print every notification as a JSON line
    #[arg(long)]
    json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    dump_config: bool,
}

/// Battle instance plus the frontend-side loop state
struct Game {
    arena: TurnOrchestrator<ScriptedPhysics>,
    accumulator: f32,
    input: TickInput,
    ticks: u64,
}

impl Game {
    fn new(config: ArenaConfig, seed: u64) -> ArenaResult<Self> {
        let arena = TurnOrchestrator::new(config, ScriptedPhysics::seeded(seed))?;
        Ok(Self {
            arena,
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            ticks: 0,
        })
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.input.collisions = self.arena.physics_mut().step();
            let input = self.input.clone();
            tick(&mut self.arena, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.ticks += 1;

            // Clear one-shot inputs after processing
            self.input.launch = None;
            self.input.target = None;
            self.input.hold_action = None;
            self.input.collisions.clear();
        }
    }
}

fn log_notification(notification: &Notification) {
    match notification {
        Notification::TurnStarted { .. }
        | Notification::PhaseChanged { .. }
        | Notification::Defeated { .. }
        | Notification::BattleEnded { .. } => log::info!("{notification:?}"),
        Notification::BoardTimerProgress { .. } | Notification::ChargeProgressChanged { .. } => {
            log::trace!("{notification:?}")
        }
        _ => log::debug!("{notification:?}"),
    }
}

fn run(args: Args) -> ArenaResult<()> {
    let config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    log::info!(
        "Starting battle with seed {} against {} enemies",
        args.seed,
        config.enemies.len()
    );
    let mut game = Game::new(config, args.seed)?;

    let json = args.json;
    game.arena.notifications().subscribe(move |notification| {
        log_notification(notification);
        if json {
            match serde_json::to_string(notification) {
                Ok(line) => println!("{line}"),
                Err(e) => log::warn!("Failed to encode notification: {e}"),
            }
        }
    });
    game.arena.start()?;

    let frame_dt = if args.frame_dt.is_finite() && args.frame_dt > 0.0 {
        args.frame_dt
    } else {
        log::warn!("Invalid frame length {}; using {SIM_DT}", args.frame_dt);
        SIM_DT
    };

    while game.arena.outcome().is_none() && game.arena.turn() <= args.max_turns {
        game.update(frame_dt);
    }

    let arena = &game.arena;
    let seconds = game.ticks as f32 * SIM_DT;
    match arena.outcome() {
        Some(outcome) => log::info!("{outcome:?} on turn {} ({seconds:.1}s)", arena.turn()),
        None => log::info!("No winner after {} turns ({seconds:.1}s)", args.max_turns),
    }
    log::info!(
        "Player health {}/{}",
        arena.player().health(),
        arena.player().max_health()
    );
    for enemy in arena.roster().iter() {
        log::info!(
            "{} health {}/{}",
            enemy.name,
            enemy.stats.health(),
            enemy.stats.max_health()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
