//! Snapshot system: builds a `GameStateSnapshot` from the engine state.

use deep_pressure_campaign::Campaign;
use deep_pressure_core::enums::{GamePhase, StatusBand};
use deep_pressure_core::events::{EngineEvent, LogEntry};
use deep_pressure_core::state::{GameStateSnapshot, OutcomeSummary, SelectionView, StatusView};
use deep_pressure_core::types::{Integrity, SimTime};

use crate::mission::MissionState;

/// Everything the snapshot reads from the engine.
pub struct SnapshotSource<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub campaign: Option<&'a Campaign>,
    pub mission: Option<&'a MissionState>,
    pub tutorial_open: bool,
    pub log: Vec<LogEntry>,
    pub outcome: Option<&'a OutcomeSummary>,
}

pub fn build_snapshot(source: SnapshotSource<'_>, events: Vec<EngineEvent>) -> GameStateSnapshot {
    let mission = source.mission;
    let is_running = mission.is_some_and(|m| m.is_running);
    let selection = mission.map(|m| m.selection.view()).unwrap_or_default();

    GameStateSnapshot {
        time: source.time,
        phase: source.phase,
        difficulty: source.campaign.map(|c| c.difficulty()),
        mission: source.campaign.map(|c| c.mission()).unwrap_or(0),
        tutorial_open: source.tutorial_open,
        is_running,
        status: status_view(source.campaign, mission),
        slots: mission
            .map(|m| m.slots.views(m.selection.problem))
            .unwrap_or_default(),
        selection,
        actions_enabled: actions_enabled(is_running, &selection),
        log: source.log,
        outcome: source.outcome.cloned(),
        events,
    }
}

fn actions_enabled(is_running: bool, selection: &SelectionView) -> bool {
    is_running && selection.problem.is_some()
}

/// Live readouts during a mission, otherwise what the next mission will
/// start with.
fn status_view(campaign: Option<&Campaign>, mission: Option<&MissionState>) -> StatusView {
    if let Some(mission) = mission {
        return mission.status_view();
    }
    let (integrity, time_remaining) = match campaign {
        Some(c) => (c.starting_integrity().clamped(), c.mission_duration_secs()),
        None => (Integrity::default(), 0),
    };
    StatusView {
        time_remaining,
        timer_band: StatusBand::for_timer(time_remaining),
        hull: integrity.hull,
        hull_band: StatusBand::for_integrity(integrity.hull),
        power: integrity.power,
        power_band: StatusBand::for_integrity(integrity.power),
        problems_solved: 0,
    }
}
