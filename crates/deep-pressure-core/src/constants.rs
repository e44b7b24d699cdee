//! Simulation constants and tuning parameters.
//!
//! Per-difficulty values live in the catalog; everything here is shared
//! by all profiles.

// --- Clock ---

/// Countdown cadence (ms). One tick removes one second from the mission timer.
pub const COUNTDOWN_INTERVAL_MS: u64 = 1_000;

/// Degradation cadence (ms).
pub const DEGRADE_INTERVAL_MS: u64 = 1_000;

/// Delay between the clock starting and the very first problem.
pub const FIRST_SPAWN_DELAY_MS: u64 = 5_000;

/// Cosmetic delay before a resolved or failed slot renders as empty again.
pub const SLOT_CLEAR_DELAY_MS: u64 = 2_000;

/// Spacing between consecutive penalty spawns after a failure.
pub const PENALTY_SPAWN_STAGGER_MS: u64 = 500;

/// Pause on the mission-complete screen before the next briefing.
pub const MISSION_ADVANCE_DELAY_MS: u64 = 3_000;

/// Longest single advance. Larger steps are clamped to this.
pub const MAX_ADVANCE_MS: u64 = 3_600_000;

/// Countdown ticks inside this window emit a countdown cue.
pub const COUNTDOWN_WARNING_SECS: u32 = 10;

/// Timer display turns critical at or below this many seconds.
pub const TIMER_CRITICAL_SECS: u32 = 30;

// --- Integrity ---

/// Upper bound for hull and power.
pub const MAX_INTEGRITY: i32 = 100;

/// Hull and power restored by a correct action.
pub const SOLVE_HEAL: i32 = 10;

/// Integrity above this value displays as nominal.
pub const INTEGRITY_NOMINAL_ABOVE: i32 = 50;

/// Integrity above this value (and not nominal) displays as a warning.
pub const INTEGRITY_WARNING_ABOVE: i32 = 25;

// --- Problems ---

/// Severity at which a problem fails on its own.
pub const SEVERITY_MAX: f64 = 100.0;

/// Severity at which a problem renders as critical.
pub const SEVERITY_CRITICAL: f64 = 66.0;

/// Severity at which a problem renders as active.
pub const SEVERITY_ACTIVE: f64 = 33.0;

/// Largest slot set any profile uses.
pub const MAX_SLOTS: usize = 3;

// --- Campaign ---

/// Number of missions in a campaign.
pub const MISSION_COUNT: u8 = 3;

/// Mission length as a percentage of the profile's base duration, by mission.
pub const MISSION_TIME_PERCENT: [u32; MISSION_COUNT as usize] = [100, 85, 70];

/// Number of log entries carried in each snapshot.
pub const LOG_HISTORY: usize = 5;
