//! Static tables: difficulty presets, problem types and mission briefings.
//!
//! Nothing here changes at runtime. Lookups return `&'static` references so
//! the rest of the engine can hold on to catalog entries without cloning.

use serde::{Deserialize, Serialize};

use crate::constants::{MISSION_COUNT, MISSION_TIME_PERCENT};
use crate::enums::{Action, Difficulty, ProblemKind};

/// Extra punishment applied when a problem fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongActionPenalty {
    /// Additional problems spawned after the failure.
    pub problems: u32,
    /// Flat integrity damage added on top of the problem's own damage.
    pub hull: i32,
}

/// Tunable constants for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Base mission length in seconds (mission 1).
    pub mission_time_secs: u32,
    /// Spawner cadence (ms).
    pub spawn_interval_ms: u64,
    /// Time for a fresh problem to climb from 0 to 100 severity (ms).
    pub degradation_ms: u32,
    pub wrong_action_penalty: WrongActionPenalty,
    pub starting_hull: i32,
    pub starting_power: i32,
    /// Slot capacity.
    pub max_problems: usize,
}

impl DifficultyProfile {
    /// Mission length in whole seconds, or `None` outside 1..=3.
    ///
    /// Missions 2 and 3 run for 85% and 70% of the base time, floored.
    pub fn mission_duration_secs(&self, mission: u8) -> Option<u32> {
        if mission == 0 || mission > MISSION_COUNT {
            return None;
        }
        let percent = MISSION_TIME_PERCENT[(mission - 1) as usize];
        Some(self.mission_time_secs * percent / 100)
    }

    /// Severity gained per second by problems spawned under this profile.
    pub fn degradation_rate(&self) -> f64 {
        100.0 / (self.degradation_ms as f64 / 1000.0)
    }
}

static EASY: DifficultyProfile = DifficultyProfile {
    difficulty: Difficulty::Easy,
    mission_time_secs: 180,
    spawn_interval_ms: 15_000,
    degradation_ms: 30_000,
    wrong_action_penalty: WrongActionPenalty {
        problems: 1,
        hull: 10,
    },
    starting_hull: 100,
    starting_power: 100,
    max_problems: 2,
};

static MODERATE: DifficultyProfile = DifficultyProfile {
    difficulty: Difficulty::Moderate,
    mission_time_secs: 150,
    spawn_interval_ms: 10_000,
    degradation_ms: 20_000,
    wrong_action_penalty: WrongActionPenalty {
        problems: 1,
        hull: 10,
    },
    starting_hull: 85,
    starting_power: 75,
    max_problems: 3,
};

static HARD: DifficultyProfile = DifficultyProfile {
    difficulty: Difficulty::Hard,
    mission_time_secs: 120,
    spawn_interval_ms: 7_000,
    degradation_ms: 12_000,
    wrong_action_penalty: WrongActionPenalty {
        problems: 2,
        hull: 15,
    },
    starting_hull: 70,
    starting_power: 50,
    max_problems: 3,
};

/// Get the profile for a difficulty level.
pub fn difficulty_profile(difficulty: Difficulty) -> &'static DifficultyProfile {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Moderate => &MODERATE,
        Difficulty::Hard => &HARD,
    }
}

/// Catalog entry for a problem type.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDefinition {
    pub kind: ProblemKind,
    /// Stable identifier, e.g. "powerFailure".
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Description with a `{location}` placeholder.
    pub description: &'static str,
    pub correct_action: Action,
    pub hull_damage: i32,
    pub power_damage: i32,
    pub locations: &'static [&'static str],
}

impl ProblemDefinition {
    /// Fill the description template with a compartment name.
    pub fn describe(&self, location: &str) -> String {
        self.description.replace("{location}", location)
    }
}

static FLOODING: ProblemDefinition = ProblemDefinition {
    kind: ProblemKind::Flooding,
    id: "flooding",
    name: "FLOODING",
    icon: "💧",
    description: "Water breach detected in {location}",
    correct_action: Action::Seal,
    hull_damage: 5,
    power_damage: 0,
    locations: &["Torpedo Room", "Ballast Tank 2", "Crew Quarters", "Bilge"],
};

static POWER_FAILURE: ProblemDefinition = ProblemDefinition {
    kind: ProblemKind::PowerFailure,
    id: "powerFailure",
    name: "POWER FAILURE",
    icon: "⚡",
    description: "Electrical system critical in {location}",
    correct_action: Action::Reroute,
    hull_damage: 0,
    power_damage: 5,
    locations: &["Battery Well", "Main Switchboard", "Sonar Room", "Control Room"],
};

static PRESSURE_BREACH: ProblemDefinition = ProblemDefinition {
    kind: ProblemKind::PressureBreach,
    id: "pressureBreach",
    name: "PRESSURE BREACH",
    icon: "🔴",
    description: "External pressure rising in {location}",
    correct_action: Action::Vent,
    hull_damage: 5,
    power_damage: 0,
    locations: &["Forward Escape Trunk", "Airlock", "Ballast Tank 1", "Aft Compartment"],
};

static FIRE: ProblemDefinition = ProblemDefinition {
    kind: ProblemKind::Fire,
    id: "fire",
    name: "FIRE",
    icon: "🔥",
    description: "Fire detected in {location}",
    correct_action: Action::Emergency,
    hull_damage: 5,
    power_damage: 5,
    locations: &["Galley", "Engine Room", "Auxiliary Machinery", "Electronics Bay"],
};

static SYSTEM_OVERLOAD: ProblemDefinition = ProblemDefinition {
    kind: ProblemKind::SystemOverload,
    id: "systemOverload",
    name: "SYSTEM OVERLOAD",
    icon: "⚠️",
    description: "Systems exceeding capacity in {location}",
    correct_action: Action::Reroute,
    hull_damage: 0,
    power_damage: 5,
    locations: &["Reactor Control", "Navigation", "Fire Control", "Life Support"],
};

static STRUCTURAL_CRACK: ProblemDefinition = ProblemDefinition {
    kind: ProblemKind::StructuralCrack,
    id: "structuralCrack",
    name: "STRUCTURAL CRACK",
    icon: "🔧",
    description: "Hull integrity compromised in {location}",
    correct_action: Action::Seal,
    hull_damage: 5,
    power_damage: 0,
    locations: &["Frame 42", "Conning Tower", "Pressure Hull Aft", "Keel Section"],
};

/// Get the catalog entry for a problem type.
pub fn problem_definition(kind: ProblemKind) -> &'static ProblemDefinition {
    match kind {
        ProblemKind::Flooding => &FLOODING,
        ProblemKind::PowerFailure => &POWER_FAILURE,
        ProblemKind::PressureBreach => &PRESSURE_BREACH,
        ProblemKind::Fire => &FIRE,
        ProblemKind::SystemOverload => &SYSTEM_OVERLOAD,
        ProblemKind::StructuralCrack => &STRUCTURAL_CRACK,
    }
}

/// Briefing text shown before a mission.
#[derive(Debug, Clone, Serialize)]
pub struct MissionBriefing {
    pub number: u8,
    pub title: &'static str,
    pub briefing: &'static str,
    pub objective: &'static str,
}

static MISSIONS: [MissionBriefing; MISSION_COUNT as usize] = [
    MissionBriefing {
        number: 1,
        title: "EMERGENCY DIVE",
        briefing: "Enemy destroyers have detected our position. Execute emergency dive to \
                   400 meters. Hull integrity compromised during initial descent. Multiple \
                   systems showing damage. Maintain stealth protocols while managing critical \
                   failures.",
        objective: "Survive for 3 minutes while keeping hull and power systems operational. \
                    Reach safe depth without catastrophic failure.",
    },
    MissionBriefing {
        number: 2,
        title: "CRITICAL SYSTEMS",
        briefing: "Power grid failing after sustained damage. Crew exhausted from continuous \
                   repairs. Multiple cascading failures across all decks. Command has \
                   authorized emergency measures to maintain operation.",
        objective: "Stabilize critical systems for 2.5 minutes. Hull damage carries forward \
                    from previous mission. Failure is not an option.",
    },
    MissionBriefing {
        number: 3,
        title: "SURFACE OR DIE",
        briefing: "All non-essential systems offline. Life support operating on backup \
                   reserves. This is our final push to reach friendly waters. Everything is \
                   failing at once. Make it count.",
        objective: "Survive 2 minutes of maximum chaos. Victory requires reaching the surface \
                    with any hull and power remaining. This is the end.",
    },
];

/// Look up a mission briefing by number (1-based).
pub fn mission_briefing(mission: u8) -> Option<&'static MissionBriefing> {
    MISSIONS.get((mission as usize).checked_sub(1)?)
}
