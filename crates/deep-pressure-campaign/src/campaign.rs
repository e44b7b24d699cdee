use serde::{Deserialize, Serialize};
use tracing::info;

use deep_pressure_core::catalog::{
    difficulty_profile, mission_briefing, DifficultyProfile, MissionBriefing,
};
use deep_pressure_core::constants::MISSION_COUNT;
use deep_pressure_core::enums::Difficulty;
use deep_pressure_core::types::Integrity;

/// Result of one finished mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub mission: u8,
    pub survived: bool,
    pub time_survived_secs: u32,
    pub problems_solved: u32,
    /// Raw values at mission end (may be negative after a defeat).
    pub hull: i32,
    pub power: i32,
}

/// Where the campaign goes after a mission is survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignProgress {
    /// Another mission follows after the intermission.
    NextMission(u8),
    /// The final mission was survived.
    Victory,
}

/// Persistent campaign state that survives across missions.
///
/// Hull and power are stored here between missions and loaded into the
/// resource ledger when the next mission starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    difficulty: Difficulty,
    /// Current mission, always within 1..=MISSION_COUNT.
    mission: u8,
    carried: Integrity,
    records: Vec<MissionRecord>,
}

impl Campaign {
    /// Begin a campaign at mission 1 with the profile's starting integrity.
    pub fn new(difficulty: Difficulty) -> Self {
        let profile = difficulty_profile(difficulty);
        info!(%difficulty, "campaign started");
        Self {
            difficulty,
            mission: 1,
            carried: Integrity::new(profile.starting_hull, profile.starting_power),
            records: Vec::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        difficulty_profile(self.difficulty)
    }

    pub fn mission(&self) -> u8 {
        self.mission
    }

    pub fn briefing(&self) -> Option<&'static MissionBriefing> {
        mission_briefing(self.mission)
    }

    /// Fresh clock for the current mission.
    pub fn mission_duration_secs(&self) -> u32 {
        let profile = self.profile();
        profile
            .mission_duration_secs(self.mission)
            .unwrap_or(profile.mission_time_secs)
    }

    /// Hull and power the current mission starts with.
    pub fn starting_integrity(&self) -> Integrity {
        self.carried
    }

    pub fn is_final_mission(&self) -> bool {
        self.mission >= MISSION_COUNT
    }

    /// Record a survived mission and carry its integrity forward.
    pub fn complete_mission(&mut self, record: MissionRecord) -> CampaignProgress {
        self.carried = Integrity::new(record.hull, record.power);
        info!(
            mission = record.mission,
            hull = record.hull,
            power = record.power,
            solved = record.problems_solved,
            "mission survived"
        );
        self.records.push(record);

        if self.is_final_mission() {
            CampaignProgress::Victory
        } else {
            CampaignProgress::NextMission(self.mission + 1)
        }
    }

    /// Record a lost mission. The campaign is over after this.
    pub fn fail_mission(&mut self, record: MissionRecord) {
        info!(mission = record.mission, "mission lost");
        self.carried = Integrity::new(record.hull, record.power);
        self.records.push(record);
    }

    /// Move to the next mission. Returns the new mission number, or `None`
    /// when the final mission has already been reached.
    pub fn advance(&mut self) -> Option<u8> {
        if self.is_final_mission() {
            return None;
        }
        self.mission += 1;
        Some(self.mission)
    }

    /// Problems solved across every recorded mission.
    pub fn total_problems_solved(&self) -> u32 {
        self.records.iter().map(|r| r.problems_solved).sum()
    }

    pub fn records(&self) -> &[MissionRecord] {
        &self.records
    }

    /// True once any mission has been lost or the final one survived.
    pub fn is_over(&self) -> bool {
        self.records
            .last()
            .is_some_and(|r| !r.survived || r.mission >= MISSION_COUNT)
    }
}
