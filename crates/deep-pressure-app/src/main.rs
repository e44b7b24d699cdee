//! Command-line entry point. Plays a session with the autopilot.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deep_pressure_app::autopilot::Autopilot;
use deep_pressure_app::frontend::{ConsoleFrontend, Frontend, JsonFrontend};
use deep_pressure_app::game_loop::{spawn_game_loop, LoopConfig, DEFAULT_TICK_RATE};
use deep_pressure_app::session::{run_headless, HEADLESS_MAX_STEPS, HEADLESS_STEP_MS};
use deep_pressure_core::enums::Difficulty;
use deep_pressure_core::state::GameStateSnapshot;
use deep_pressure_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "deep-pressure", version, about = "Submarine damage-control simulation")]
struct Cli {
    /// easy, moderate or hard
    #[arg(short, long, default_value = "moderate")]
    difficulty: Difficulty,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Game loop ticks per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Simulated seconds per real second
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    #[arg(long)]
    no_tutorial: bool,

    /// Chance the autopilot picks a wrong action
    #[arg(long, default_value_t = 0.1)]
    mistake_rate: f64,

    /// Severity a problem must reach before the autopilot reacts
    #[arg(long, default_value_t = 25.0)]
    reaction: f64,

    /// Run the whole session in fixed steps without sleeping
    #[arg(long)]
    headless: bool,

    /// Emit events as JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Print sound cues
    #[arg(long)]
    cues: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !(cli.speed.is_finite() && cli.speed > 0.0) {
        bail!("--speed must be a positive number");
    }

    let sim = SimConfig {
        seed: cli.seed,
        tutorial: !cli.no_tutorial,
        spawning: true,
    };
    let mut autopilot = Autopilot::new(cli.difficulty, cli.mistake_rate, cli.seed.wrapping_add(1))
        .with_reaction(cli.reaction);

    let mut frontend: Box<dyn Frontend> = if cli.json {
        Box::new(JsonFrontend::new(std::io::stdout()))
    } else {
        Box::new(ConsoleFrontend::stdout().with_cues(cli.cues))
    };

    info!(difficulty = %cli.difficulty, seed = cli.seed, headless = cli.headless, "starting session");
    let last = if cli.headless {
        run_headless(
            sim,
            &mut autopilot,
            &mut *frontend,
            HEADLESS_STEP_MS,
            HEADLESS_MAX_STEPS,
        )
    } else {
        run_realtime(
            LoopConfig {
                sim,
                tick_rate: cli.tick_rate,
                speed: cli.speed,
            },
            autopilot,
            frontend,
        )?
    };

    info!(phase = ?last.phase, mission = last.mission, "session over");
    Ok(())
}

/// Poll the game loop and feed the autopilot until the session ends.
fn run_realtime(
    config: LoopConfig,
    mut autopilot: Autopilot,
    frontend: Box<dyn Frontend>,
) -> Result<GameStateSnapshot> {
    let poll = Duration::from_millis(5);
    let handle = spawn_game_loop(config, frontend)?;
    let mut last_seen = None;

    loop {
        std::thread::sleep(poll);
        if handle.is_finished() {
            bail!("game loop stopped unexpectedly");
        }
        let Some(snapshot) = handle.latest_snapshot() else {
            continue;
        };
        if last_seen == Some(snapshot.time) {
            continue;
        }
        last_seen = Some(snapshot.time);

        if snapshot.phase.is_terminal() {
            handle.shutdown()?;
            return Ok(snapshot);
        }
        for command in autopilot.next_commands(&snapshot) {
            handle.send(command)?;
        }
    }
}
