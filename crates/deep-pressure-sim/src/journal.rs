//! Outgoing event buffer and the control-room log history.

use std::collections::VecDeque;

use deep_pressure_core::constants::LOG_HISTORY;
use deep_pressure_core::enums::LogLevel;
use deep_pressure_core::events::{AudioCue, EngineEvent, LogEntry};

/// Collects events between snapshots.
#[derive(Debug, Default)]
pub struct Journal {
    events: Vec<EngineEvent>,
    /// Newest first.
    history: VecDeque<LogEntry>,
    now_ms: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp for subsequent log entries.
    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn push(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, cue: AudioCue) {
        self.events.push(EngineEvent::Audio { cue });
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            message: message.into(),
            level,
            at_ms: self.now_ms,
        };
        self.history.push_front(entry.clone());
        self.history.truncate(LOG_HISTORY);
        self.events.push(EngineEvent::LogEntry(entry));
    }

    /// Take everything emitted since the last drain.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn history(&self) -> Vec<LogEntry> {
        self.history.iter().cloned().collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
