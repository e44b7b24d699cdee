//! Mission timer.

use deep_pressure_core::constants::COUNTDOWN_WARNING_SECS;
use deep_pressure_core::events::AudioCue;

use crate::journal::Journal;
use crate::mission::MissionState;

/// Remove one second from the timer. Reaching zero only marks the mission
/// as expired; victory is decided once the current instant is drained.
pub fn run(mission: &mut MissionState, journal: &mut Journal) {
    mission.time_remaining = mission.time_remaining.saturating_sub(1);
    journal.push(mission.status_event());

    if mission.time_remaining == 0 {
        mission.time_expired = true;
    } else if mission.time_remaining <= COUNTDOWN_WARNING_SECS {
        journal.cue(AudioCue::CountdownTick);
    }
}
