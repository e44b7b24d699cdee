//! Events emitted by the simulation for the renderer and the sound system.
//!
//! Every event is fire-and-forget: the engine never waits on a consumer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::{OutcomeSummary, SlotView};

/// Named sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    AlarmStart,
    AlarmStop,
    Success,
    Failure,
    CriticalAlert,
    Click,
    VictoryFanfare,
    DefeatSting,
    CountdownTick,
}

/// One line in the control-room event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
    /// Engine time at which the entry was written.
    pub at_ms: u64,
}

/// Everything the presentation layer can react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    /// Switch the visible screen. `mission` is set for briefing screens.
    ScreenTransition { screen: Screen, mission: Option<u8> },
    /// Timer and integrity readouts changed. Hull and power are display-clamped.
    StatusUpdate {
        time_remaining: u32,
        hull: i32,
        power: i32,
    },
    /// Redraw one problem slot.
    SlotRender { slot: usize, view: SlotView },
    /// Append to the event log.
    LogEntry(LogEntry),
    /// Mission or campaign result.
    OutcomeSummary(OutcomeSummary),
    /// Trigger a sound cue.
    Audio { cue: AudioCue },
}
