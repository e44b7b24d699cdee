//! Player commands sent from the input layer to the simulation.
//!
//! Commands are either applied immediately or queued for processing at the
//! next advance. Invalid commands are rejected, never fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Pick the difficulty for the whole session.
    SelectDifficulty { level: Difficulty },
    /// Leave the briefing and begin the mission.
    StartMission,
    /// Dismiss the first-mission tutorial and start the clock.
    CloseTutorial,
    /// Abandon everything and return to difficulty selection.
    RestartGame,

    // --- Control room ---
    /// Select the problem in a slot (0-based).
    SelectProblem { slot: usize },
    /// Apply a corrective action to the selected problem.
    SelectAction { action: Action },
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Accepted,
    Rejected(Rejection),
}

impl CommandOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CommandOutcome::Accepted)
    }
}

impl From<Result<(), Rejection>> for CommandOutcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => CommandOutcome::Accepted,
            Err(rejection) => CommandOutcome::Rejected(rejection),
        }
    }
}

/// Why a command was not applied. State is untouched on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("command not valid during {0:?}")]
    WrongPhase(GamePhase),
    #[error("mission clock is not running")]
    MissionNotRunning,
    #[error("no tutorial to close")]
    TutorialNotOpen,
    #[error("slot {slot} out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },
    #[error("slot {0} is empty")]
    SlotEmpty(usize),
    #[error("select a problem first")]
    NoProblemSelected,
}
