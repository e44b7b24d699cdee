//! Problem spawning.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use deep_pressure_core::catalog::problem_definition;
use deep_pressure_core::enums::{LogLevel, ProblemKind};
use deep_pressure_core::events::AudioCue;

use crate::journal::Journal;
use crate::mission::MissionState;
use crate::slots::ActiveProblem;

/// Spawn a random problem into the first empty slot.
///
/// Does nothing when every slot is occupied. No random numbers are drawn
/// in that case.
pub fn spawn(
    mission: &mut MissionState,
    rng: &mut ChaCha8Rng,
    journal: &mut Journal,
) -> Option<usize> {
    if mission.slots.is_full() {
        debug!(capacity = mission.slots.capacity(), "spawn skipped, slots full");
        return None;
    }
    let kind = ProblemKind::ALL[rng.gen_range(0..ProblemKind::ALL.len())];
    let def = problem_definition(kind);
    let location = def.locations[rng.gen_range(0..def.locations.len())];
    let problem = ActiveProblem::new(kind, location, mission.profile.degradation_ms);
    place(mission, problem, journal)
}

/// Put an already-built problem on the board.
pub fn place(
    mission: &mut MissionState,
    problem: ActiveProblem,
    journal: &mut Journal,
) -> Option<usize> {
    let def = problem.definition();
    let location = problem.location;
    let slot = mission.slots.place(problem)?;
    debug!(slot, kind = def.id, location, "problem spawned");

    journal.log(
        LogLevel::Warning,
        format!("{}: {}", def.name, def.describe(location)),
    );
    journal.cue(AudioCue::AlarmStart);
    if let Some(event) = mission.slot_event(slot) {
        journal.push(event);
    }
    Some(slot)
}
