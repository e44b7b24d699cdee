//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Difficulty preset, selected once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown difficulty: {0:?} (expected easy, moderate or hard)")]
    Difficulty(String),
    #[error("unknown action: {0:?} (expected seal, reroute, vent or emergency)")]
    Action(String),
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseError::Difficulty(s.to_string())),
        }
    }
}

/// Corrective action vocabulary available to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Seal a breach or crack.
    Seal,
    /// Reroute power around a failing circuit.
    Reroute,
    /// Vent pressure.
    Vent,
    /// Emergency response (fire suppression).
    Emergency,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Seal, Action::Reroute, Action::Vent, Action::Emergency];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Seal => "seal",
            Action::Reroute => "reroute",
            Action::Vent => "vent",
            Action::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seal" => Ok(Action::Seal),
            "reroute" => Ok(Action::Reroute),
            "vent" => Ok(Action::Vent),
            "emergency" => Ok(Action::Emergency),
            _ => Err(ParseError::Action(s.to_string())),
        }
    }
}

/// Problem type. Each maps to one catalog definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Flooding,
    PowerFailure,
    PressureBreach,
    Fire,
    SystemOverload,
    StructuralCrack,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 6] = [
        ProblemKind::Flooding,
        ProblemKind::PowerFailure,
        ProblemKind::PressureBreach,
        ProblemKind::Fire,
        ProblemKind::SystemOverload,
        ProblemKind::StructuralCrack,
    ];
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    DifficultySelect,
    Briefing,
    Active,
    MissionComplete,
    Victory,
    Defeat,
}

impl GamePhase {
    /// Victory and defeat only accept a restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Screen identifiers pushed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    DifficultySelect,
    Briefing,
    Tutorial,
    ControlRoom,
    MissionComplete,
    Outcome,
}

/// Presentation band for a problem's severity. Rendering hint only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityBand {
    #[default]
    Low,
    Active,
    Critical,
}

impl SeverityBand {
    pub fn from_severity(severity: f64) -> Self {
        if severity >= SEVERITY_CRITICAL {
            SeverityBand::Critical
        } else if severity >= SEVERITY_ACTIVE {
            SeverityBand::Active
        } else {
            SeverityBand::Low
        }
    }
}

/// Display band for hull, power and the mission timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusBand {
    #[default]
    Nominal,
    Warning,
    Critical,
}

impl StatusBand {
    pub fn for_integrity(value: i32) -> Self {
        if value > INTEGRITY_NOMINAL_ABOVE {
            StatusBand::Nominal
        } else if value > INTEGRITY_WARNING_ABOVE {
            StatusBand::Warning
        } else {
            StatusBand::Critical
        }
    }

    pub fn for_timer(secs: u32) -> Self {
        if secs <= TIMER_CRITICAL_SECS {
            StatusBand::Critical
        } else {
            StatusBand::Nominal
        }
    }
}

/// Severity tag on an event log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Critical,
}

/// How a problem left its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Solved,
    Failed,
}

/// Which resource ran out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    /// Hull integrity reached zero.
    HullBreach,
    /// Power reached zero.
    PowerLoss,
}

impl DefeatCause {
    pub fn message(&self) -> &'static str {
        match self {
            DefeatCause::HullBreach => "Structural collapse. The submarine has been destroyed.",
            DefeatCause::PowerLoss => "Total blackout. All systems offline.",
        }
    }
}
