//! Action evaluation: solving and failing problems.

use tracing::debug;

use deep_pressure_core::commands::Rejection;
use deep_pressure_core::constants::{PENALTY_SPAWN_STAGGER_MS, SLOT_CLEAR_DELAY_MS, SOLVE_HEAL};
use deep_pressure_core::enums::{Action, LogLevel, Resolution};
use deep_pressure_core::events::AudioCue;

use crate::journal::Journal;
use crate::mission::MissionState;
use crate::scheduler::{Scheduler, Task};

/// Commit `action` against the selected problem.
///
/// The selection is cleared whatever the result. The caller checks for
/// defeat after a failure.
pub fn evaluate(
    mission: &mut MissionState,
    action: Action,
    now_ms: u64,
    scheduler: &mut Scheduler,
    journal: &mut Journal,
) -> Result<Resolution, Rejection> {
    let slot = mission.selection.problem.ok_or(Rejection::NoProblemSelected)?;
    let correct = mission
        .slots
        .get(slot)
        .map(|p| p.definition().correct_action)
        .ok_or(Rejection::SlotEmpty(slot))?;

    mission.selection.action = Some(action);
    let resolution = if action == correct {
        solve(mission, slot, now_ms, scheduler, journal);
        Resolution::Solved
    } else {
        journal.log(
            LogLevel::Warning,
            format!("Wrong action: {} has no effect.", action.as_str().to_uppercase()),
        );
        fail(mission, slot, now_ms, scheduler, journal);
        Resolution::Failed
    };
    mission.selection.clear();

    // Repaint so the slot no longer shows as selected.
    if let Some(event) = mission.slot_event(slot) {
        journal.push(event);
    }
    Ok(resolution)
}

/// Remove the problem in `slot`, count it and heal both resources.
pub fn solve(
    mission: &mut MissionState,
    slot: usize,
    now_ms: u64,
    scheduler: &mut Scheduler,
    journal: &mut Journal,
) -> bool {
    let clear_at = now_ms + SLOT_CLEAR_DELAY_MS;
    let Some(problem) = mission.slots.take(slot, Resolution::Solved, clear_at) else {
        return false;
    };
    let def = problem.definition();

    mission.problems_solved += 1;
    mission.ledger.apply_heal(SOLVE_HEAL, SOLVE_HEAL);
    debug!(slot, kind = def.id, solved = mission.problems_solved, "problem solved");

    journal.log(
        LogLevel::Success,
        format!("{} resolved in {}. Hull and power +{}%.", def.name, problem.location, SOLVE_HEAL),
    );
    journal.cue(AudioCue::Success);
    finish(mission, slot, clear_at, scheduler, journal);
    true
}

/// Remove the problem in `slot` and apply its damage plus the difficulty
/// penalty, then book the staggered penalty spawns.
///
/// Power damage uses the hull penalty term, same as hull damage.
pub fn fail(
    mission: &mut MissionState,
    slot: usize,
    now_ms: u64,
    scheduler: &mut Scheduler,
    journal: &mut Journal,
) -> bool {
    let clear_at = now_ms + SLOT_CLEAR_DELAY_MS;
    let Some(problem) = mission.slots.take(slot, Resolution::Failed, clear_at) else {
        return false;
    };
    let def = problem.definition();
    let penalty = mission.profile.wrong_action_penalty;
    let hull_damage = def.hull_damage + penalty.hull;
    let power_damage = def.power_damage + penalty.hull;

    mission.ledger.apply_damage(hull_damage, power_damage);
    if mission.selection.problem == Some(slot) {
        mission.selection.clear();
    }
    debug!(
        slot,
        kind = def.id,
        hull = mission.ledger.hull(),
        power = mission.ledger.power(),
        "problem failed"
    );

    journal.log(
        LogLevel::Critical,
        format!("{} failed! Hull -{}%, power -{}%.", def.name, hull_damage, power_damage),
    );
    journal.cue(AudioCue::Failure);

    for k in 1..=u64::from(penalty.problems) {
        scheduler.schedule_once(now_ms + k * PENALTY_SPAWN_STAGGER_MS, Task::PenaltySpawn);
    }
    if penalty.problems > 0 {
        journal.log(
            LogLevel::Warning,
            format!("Cascade failure: {} new problem(s) incoming.", penalty.problems),
        );
    }

    finish(mission, slot, clear_at, scheduler, journal);
    true
}

fn finish(
    mission: &MissionState,
    slot: usize,
    clear_at: u64,
    scheduler: &mut Scheduler,
    journal: &mut Journal,
) {
    scheduler.schedule_once(clear_at, Task::ClearSlot { slot });
    if let Some(event) = mission.slot_event(slot) {
        journal.push(event);
    }
    journal.push(mission.status_event());
    if mission.slots.occupied() == 0 {
        journal.cue(AudioCue::AlarmStop);
    }
}
