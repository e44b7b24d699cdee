//! Severity escalation.

use deep_pressure_core::constants::DEGRADE_INTERVAL_MS;
use deep_pressure_core::events::AudioCue;

use crate::journal::Journal;
use crate::mission::MissionState;
use crate::slots::Degrade;

/// Raise severity on every active problem by one tick.
///
/// Returns the slots whose problem reached 100, ascending. The caller fails
/// them; this system never removes anything.
pub fn run(mission: &mut MissionState, journal: &mut Journal) -> Vec<usize> {
    let mut failed = Vec::new();

    for slot in mission.slots.occupied_indices() {
        let Some(problem) = mission.slots.get_mut(slot) else {
            continue;
        };
        match problem.degrade(DEGRADE_INTERVAL_MS as u32) {
            Degrade::Failed => failed.push(slot),
            Degrade::TurnedCritical => journal.cue(AudioCue::CriticalAlert),
            Degrade::Rising => {}
        }
        if let Some(event) = mission.slot_event(slot) {
            journal.push(event);
        }
    }

    failed
}
