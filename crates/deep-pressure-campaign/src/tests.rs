//! Tests for campaign progression and carried integrity.

use deep_pressure_core::enums::Difficulty;
use deep_pressure_core::types::Integrity;

use crate::campaign::{Campaign, CampaignProgress, MissionRecord};

fn survived(mission: u8, hull: i32, power: i32, solved: u32) -> MissionRecord {
    MissionRecord {
        mission,
        survived: true,
        time_survived_secs: 100,
        problems_solved: solved,
        hull,
        power,
    }
}

#[test]
fn test_new_campaign_loads_profile_integrity() {
    let campaign = Campaign::new(Difficulty::Hard);
    assert_eq!(campaign.mission(), 1);
    assert_eq!(campaign.starting_integrity(), Integrity::new(70, 50));
    assert_eq!(campaign.mission_duration_secs(), 120);
    assert_eq!(campaign.briefing().map(|b| b.number), Some(1));
    assert!(!campaign.is_over());
}

#[test]
fn test_integrity_carries_between_missions() {
    let mut campaign = Campaign::new(Difficulty::Moderate);
    let progress = campaign.complete_mission(survived(1, 62, 41, 4));
    assert_eq!(progress, CampaignProgress::NextMission(2));
    assert_eq!(campaign.advance(), Some(2));

    assert_eq!(campaign.starting_integrity(), Integrity::new(62, 41));
    assert_eq!(campaign.mission_duration_secs(), 127);
}

#[test]
fn test_durations_shrink_each_mission() {
    let mut campaign = Campaign::new(Difficulty::Easy);
    let mut durations = vec![campaign.mission_duration_secs()];
    for mission in 1..3 {
        campaign.complete_mission(survived(mission, 100, 100, 0));
        campaign.advance();
        durations.push(campaign.mission_duration_secs());
    }
    assert_eq!(durations, vec![180, 153, 126]);
}

#[test]
fn test_final_mission_survival_is_victory() {
    let mut campaign = Campaign::new(Difficulty::Easy);
    campaign.complete_mission(survived(1, 90, 90, 2));
    campaign.advance();
    campaign.complete_mission(survived(2, 80, 80, 3));
    campaign.advance();
    assert!(campaign.is_final_mission());

    let progress = campaign.complete_mission(survived(3, 70, 70, 5));
    assert_eq!(progress, CampaignProgress::Victory);
    assert_eq!(campaign.advance(), None);
    assert_eq!(campaign.mission(), 3);
    assert!(campaign.is_over());
}

#[test]
fn test_total_problems_solved_accumulates() {
    let mut campaign = Campaign::new(Difficulty::Easy);
    campaign.complete_mission(survived(1, 90, 90, 2));
    campaign.advance();
    campaign.complete_mission(survived(2, 90, 90, 3));
    assert_eq!(campaign.total_problems_solved(), 5);
    assert_eq!(campaign.records().len(), 2);
}

#[test]
fn test_failed_mission_ends_campaign() {
    let mut campaign = Campaign::new(Difficulty::Hard);
    campaign.fail_mission(MissionRecord {
        mission: 1,
        survived: false,
        time_survived_secs: 42,
        problems_solved: 1,
        hull: -10,
        power: 20,
    });
    assert!(campaign.is_over());
    assert_eq!(campaign.starting_integrity(), Integrity::new(-10, 20));
}

#[test]
fn test_campaign_serializes() {
    let mut campaign = Campaign::new(Difficulty::Moderate);
    campaign.complete_mission(survived(1, 50, 60, 7));
    let json = serde_json::to_string(&campaign).unwrap();
    let back: Campaign = serde_json::from_str(&json).unwrap();
    assert_eq!(back.records(), campaign.records());
    assert_eq!(back.difficulty(), Difficulty::Moderate);
}
