//! State shared between the input side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, Result};

use deep_pressure_core::commands::PlayerCommand;
use deep_pressure_core::state::GameStateSnapshot;

/// Commands sent from the input side to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Owner-side handle to a running game loop.
///
/// Dropping the handle disconnects the channel, which also stops the loop.
pub struct LoopHandle {
    command_tx: mpsc::Sender<LoopCommand>,
    /// Updated by the game loop thread after each tick.
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    thread: Option<JoinHandle<()>>,
}

impl LoopHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<LoopCommand>,
        latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            latest_snapshot,
            thread: Some(thread),
        }
    }

    /// Forward a player command. Fails once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(LoopCommand::Player(command))
            .map_err(|_| anyhow!("game loop is no longer running"))
    }

    /// Most recent snapshot, if the loop has ticked at least once.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) -> Result<()> {
        // The loop may already be gone; joining is what matters.
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| anyhow!("game loop thread panicked")),
            None => Ok(()),
        }
    }
}
