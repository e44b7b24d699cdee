//! Game state snapshot: the complete visible state handed to the frontend.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{EngineEvent, LogEntry};
use crate::types::SimTime;

/// Complete game state returned after each advance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    /// Current mission (1-3), or 0 before a difficulty is chosen.
    pub mission: u8,
    pub tutorial_open: bool,
    /// Whether the mission clock is ticking and control-room commands are accepted.
    pub is_running: bool,
    pub status: StatusView,
    pub slots: Vec<SlotView>,
    pub selection: SelectionView,
    /// Action buttons are only live while a problem is selected.
    pub actions_enabled: bool,
    /// Most recent log entries, newest first.
    pub log: Vec<LogEntry>,
    pub outcome: Option<OutcomeSummary>,
    /// Events emitted since the previous snapshot, in order.
    pub events: Vec<EngineEvent>,
}

/// Timer and integrity readouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub time_remaining: u32,
    pub timer_band: StatusBand,
    /// Hull clamped to [0, 100].
    pub hull: i32,
    pub hull_band: StatusBand,
    /// Power clamped to [0, 100].
    pub power: i32,
    pub power_band: StatusBand,
    pub problems_solved: u32,
}

/// What a problem slot currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum SlotView {
    /// "AWAITING PROBLEM".
    #[default]
    Empty,
    Active(ProblemView),
    /// Brief flash after a problem leaves the slot.
    Cleared { resolution: Resolution },
}

/// Render data for an active problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemView {
    pub kind: ProblemKind,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub location: String,
    /// Severity in [0, 100].
    pub severity: f64,
    pub band: SeverityBand,
    pub selected: bool,
}

/// Pending player selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionView {
    pub problem: Option<usize>,
    pub action: Option<Action>,
}

/// Result screen contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub victory: bool,
    pub mission: u8,
    /// True once the final mission is won or any mission is lost.
    pub campaign_over: bool,
    pub time_survived_secs: u32,
    pub problems_solved: u32,
    /// Problems solved across every mission so far.
    pub total_problems_solved: u32,
    pub hull: i32,
    pub power: i32,
    pub cause: Option<DefeatCause>,
    pub message: String,
}
