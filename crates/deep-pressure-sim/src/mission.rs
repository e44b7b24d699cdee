//! Per-mission state owned by the engine while a mission is loaded.

use deep_pressure_core::catalog::DifficultyProfile;
use deep_pressure_core::enums::{Action, StatusBand};
use deep_pressure_core::events::EngineEvent;
use deep_pressure_core::state::{SelectionView, StatusView};
use deep_pressure_core::types::Integrity;

use crate::ledger::ResourceLedger;
use crate::slots::SlotSet;

/// Pending player selection. Cleared after every evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub problem: Option<usize>,
    pub action: Option<Action>,
}

impl Selection {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self) -> SelectionView {
        SelectionView {
            problem: self.problem,
            action: self.action,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MissionState {
    /// Mission number, 1-3.
    pub number: u8,
    pub profile: &'static DifficultyProfile,
    pub ledger: ResourceLedger,
    pub slots: SlotSet,
    pub selection: Selection,
    pub duration_secs: u32,
    pub time_remaining: u32,
    pub problems_solved: u32,
    /// Gate for the periodic tasks and for control-room commands.
    pub is_running: bool,
    /// Timer hit zero during the current instant; victory is pending.
    pub time_expired: bool,
}

impl MissionState {
    pub fn new(
        number: u8,
        profile: &'static DifficultyProfile,
        integrity: Integrity,
        duration_secs: u32,
    ) -> Self {
        Self {
            number,
            profile,
            ledger: ResourceLedger::new(integrity),
            slots: SlotSet::with_capacity(profile.max_problems),
            selection: Selection::default(),
            duration_secs,
            time_remaining: duration_secs,
            problems_solved: 0,
            is_running: false,
            time_expired: false,
        }
    }

    pub fn time_survived_secs(&self) -> u32 {
        self.duration_secs.saturating_sub(self.time_remaining)
    }

    pub fn status_view(&self) -> StatusView {
        let shown = self.ledger.display();
        StatusView {
            time_remaining: self.time_remaining,
            timer_band: StatusBand::for_timer(self.time_remaining),
            hull: shown.hull,
            hull_band: StatusBand::for_integrity(shown.hull),
            power: shown.power,
            power_band: StatusBand::for_integrity(shown.power),
            problems_solved: self.problems_solved,
        }
    }

    pub fn status_event(&self) -> EngineEvent {
        let shown = self.ledger.display();
        EngineEvent::StatusUpdate {
            time_remaining: self.time_remaining,
            hull: shown.hull,
            power: shown.power,
        }
    }

    pub fn slot_event(&self, slot: usize) -> Option<EngineEvent> {
        let view = self
            .slots
            .slot(slot)?
            .view(self.selection.problem == Some(slot));
        Some(EngineEvent::SlotRender { slot, view })
    }
}
