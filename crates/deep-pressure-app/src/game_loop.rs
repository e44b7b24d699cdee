//! Game loop thread: runs the simulation engine at a fixed rate and hands
//! snapshots to a frontend.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via an `mpsc` channel. Snapshots go to the
//! frontend and are stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use deep_pressure_core::state::GameStateSnapshot;
use deep_pressure_sim::{SimConfig, SimulationEngine};

use crate::frontend::Frontend;
use crate::state::{LoopCommand, LoopHandle};

pub const DEFAULT_TICK_RATE: u32 = 30;

/// Real-time driver settings.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub sim: SimConfig,
    /// Ticks per wall-clock second.
    pub tick_rate: u32,
    /// Simulated seconds per wall-clock second.
    pub speed: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate: DEFAULT_TICK_RATE,
            speed: 1.0,
        }
    }
}

/// Wall-clock duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop<F>(config: LoopConfig, frontend: F) -> Result<LoopHandle>
where
    F: Frontend + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("deep-pressure-game-loop".into())
        .spawn(move || run_game_loop(config, frontend, cmd_rx, &shared))
        .context("failed to spawn game loop thread")?;

    Ok(LoopHandle::new(cmd_tx, latest_snapshot, thread))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<F: Frontend>(
    config: LoopConfig,
    mut frontend: F,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let tick = tick_duration(config.tick_rate);
    let sim_step = tick.as_secs_f64() * config.speed.max(0.0);
    let mut engine = SimulationEngine::new(config.sim);
    let mut next_tick_time = Instant::now();
    info!(tick_rate = config.tick_rate, speed = config.speed, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => {
                    debug!("game loop shutdown requested");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by one tick of simulated time
        let snapshot = engine.advance(sim_step);

        // 3. Present
        frontend.present(&snapshot);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::RecordingFrontend;
    use deep_pressure_core::commands::PlayerCommand;
    use deep_pressure_core::enums::{Difficulty, GamePhase};

    fn fast_config() -> LoopConfig {
        LoopConfig {
            sim: SimConfig {
                seed: 3,
                tutorial: false,
                spawning: true,
            },
            tick_rate: 200,
            speed: 10.0,
        }
    }

    fn wait_for(
        handle: &LoopHandle,
        mut predicate: impl FnMut(&GameStateSnapshot) -> bool,
    ) -> Option<GameStateSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snapshot) = handle.latest_snapshot() {
                if predicate(&snapshot) {
                    return Some(snapshot);
                }
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        None
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Player(PlayerCommand::StartMission))
            .unwrap();
        tx.send(LoopCommand::Player(PlayerCommand::CloseTutorial))
            .unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Player(PlayerCommand::StartMission)
        ));
        assert!(matches!(
            commands[1],
            LoopCommand::Player(PlayerCommand::CloseTutorial)
        ));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration() {
        // 30Hz = 33.333ms per tick
        assert_eq!(
            tick_duration(DEFAULT_TICK_RATE).as_nanos(),
            (1_000_000_000u64 / 30) as u128
        );
        // A zero rate is treated as 1Hz
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_loop_applies_commands_and_presents() {
        let recorder = RecordingFrontend::new();
        let handle = spawn_game_loop(fast_config(), recorder.clone()).unwrap();

        handle
            .send(PlayerCommand::SelectDifficulty {
                level: Difficulty::Easy,
            })
            .unwrap();
        handle.send(PlayerCommand::StartMission).unwrap();

        let snap = wait_for(&handle, |s| s.is_running).expect("mission should start");
        assert_eq!(snap.phase, GamePhase::Active);
        assert_eq!(snap.difficulty, Some(Difficulty::Easy));

        handle.shutdown().unwrap();
        assert!(!recorder.is_empty());
    }

    #[test]
    fn test_simulated_time_advances_with_speed() {
        let handle = spawn_game_loop(fast_config(), RecordingFrontend::new()).unwrap();
        let snap = wait_for(&handle, |s| s.time.elapsed_ms >= 1_000);
        handle.shutdown().unwrap();
        assert!(snap.is_some());
    }

    #[test]
    fn test_send_fails_after_loop_stops() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        drop(rx);
        let thread = std::thread::spawn(|| {});
        let handle = LoopHandle::new(tx, Arc::new(Mutex::new(None)), thread);

        assert!(handle.send(PlayerCommand::StartMission).is_err());
        assert!(handle.latest_snapshot().is_none());
        handle.shutdown().unwrap();
    }
}
