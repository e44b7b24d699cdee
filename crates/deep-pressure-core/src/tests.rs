#[cfg(test)]
mod tests {
    use crate::catalog::*;
    use crate::commands::{CommandOutcome, PlayerCommand, Rejection};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{AudioCue, EngineEvent};
    use crate::state::{GameStateSnapshot, SlotView};
    use crate::types::{Integrity, SimTime};

    // ---- Catalog ----

    #[test]
    fn test_starting_integrity_within_bounds() {
        for difficulty in Difficulty::ALL {
            let profile = difficulty_profile(difficulty);
            assert_eq!(profile.difficulty, difficulty);
            assert!((0..=MAX_INTEGRITY).contains(&profile.starting_hull));
            assert!((0..=MAX_INTEGRITY).contains(&profile.starting_power));
            assert!(profile.max_problems >= 1 && profile.max_problems <= MAX_SLOTS);
        }
    }

    #[test]
    fn test_mission_durations_follow_percentages() {
        let expected = [
            (Difficulty::Easy, [180, 153, 126]),
            (Difficulty::Moderate, [150, 127, 105]),
            (Difficulty::Hard, [120, 102, 84]),
        ];
        for (difficulty, secs) in expected {
            let profile = difficulty_profile(difficulty);
            for (i, want) in secs.into_iter().enumerate() {
                assert_eq!(profile.mission_duration_secs(i as u8 + 1), Some(want));
            }
            assert_eq!(profile.mission_duration_secs(0), None);
            assert_eq!(profile.mission_duration_secs(4), None);
        }
    }

    #[test]
    fn test_moderate_mission_two_floors_fraction() {
        // 150 * 0.85 = 127.5
        let profile = difficulty_profile(Difficulty::Moderate);
        assert_eq!(profile.mission_duration_secs(2), Some(127));
        assert_eq!(profile.mission_duration_secs(3), Some(105));
    }

    #[test]
    fn test_degradation_rate_is_percent_per_second() {
        let easy = difficulty_profile(Difficulty::Easy);
        assert!((easy.degradation_rate() - 100.0 / 30.0).abs() < 1e-12);
        let hard = difficulty_profile(Difficulty::Hard);
        assert!((hard.degradation_rate() - 100.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_hard_penalty_values() {
        let hard = difficulty_profile(Difficulty::Hard);
        assert_eq!(hard.wrong_action_penalty.problems, 2);
        assert_eq!(hard.wrong_action_penalty.hull, 15);
    }

    #[test]
    fn test_every_problem_has_locations_and_template() {
        for kind in ProblemKind::ALL {
            let def = problem_definition(kind);
            assert_eq!(def.kind, kind);
            assert!(!def.locations.is_empty(), "{} has no locations", def.id);
            assert!(def.description.contains("{location}"));
            assert!(def.hull_damage >= 0 && def.power_damage >= 0);
        }
    }

    #[test]
    fn test_describe_fills_location() {
        let def = problem_definition(ProblemKind::Fire);
        assert_eq!(def.describe("Galley"), "Fire detected in Galley");
    }

    #[test]
    fn test_correct_actions_match_source_table() {
        use ProblemKind::*;
        let expected = [
            (Flooding, Action::Seal),
            (PowerFailure, Action::Reroute),
            (PressureBreach, Action::Vent),
            (Fire, Action::Emergency),
            (SystemOverload, Action::Reroute),
            (StructuralCrack, Action::Seal),
        ];
        for (kind, action) in expected {
            assert_eq!(problem_definition(kind).correct_action, action);
        }
    }

    #[test]
    fn test_mission_briefing_lookup() {
        assert_eq!(mission_briefing(1).map(|m| m.title), Some("EMERGENCY DIVE"));
        assert_eq!(mission_briefing(3).map(|m| m.number), Some(3));
        assert!(mission_briefing(0).is_none());
        assert!(mission_briefing(4).is_none());
    }

    // ---- Parsing ----

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!(matches!(
            "brutal".parse::<Difficulty>(),
            Err(ParseError::Difficulty(_))
        ));
    }

    #[test]
    fn test_action_from_str() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("pray".parse::<Action>().is_err());
    }

    // ---- Bands ----

    #[test]
    fn test_severity_band_thresholds() {
        assert_eq!(SeverityBand::from_severity(0.0), SeverityBand::Low);
        assert_eq!(SeverityBand::from_severity(32.9), SeverityBand::Low);
        assert_eq!(SeverityBand::from_severity(33.0), SeverityBand::Active);
        assert_eq!(SeverityBand::from_severity(65.9), SeverityBand::Active);
        assert_eq!(SeverityBand::from_severity(66.0), SeverityBand::Critical);
        assert_eq!(SeverityBand::from_severity(100.0), SeverityBand::Critical);
    }

    #[test]
    fn test_status_band_thresholds() {
        assert_eq!(StatusBand::for_integrity(51), StatusBand::Nominal);
        assert_eq!(StatusBand::for_integrity(50), StatusBand::Warning);
        assert_eq!(StatusBand::for_integrity(26), StatusBand::Warning);
        assert_eq!(StatusBand::for_integrity(25), StatusBand::Critical);
        assert_eq!(StatusBand::for_timer(31), StatusBand::Nominal);
        assert_eq!(StatusBand::for_timer(30), StatusBand::Critical);
    }

    // ---- Types ----

    #[test]
    fn test_integrity_clamps_for_display() {
        let i = Integrity::new(-15, 120);
        assert_eq!(i.clamped(), Integrity::new(0, 100));
    }

    #[test]
    fn test_millis_from_secs() {
        assert_eq!(SimTime::millis_from_secs(1.0), Some(1000));
        assert_eq!(SimTime::millis_from_secs(0.0334), Some(33));
        assert_eq!(SimTime::millis_from_secs(-0.5), None);
        assert_eq!(SimTime::millis_from_secs(f64::NAN), None);
        assert_eq!(SimTime::millis_from_secs(1e300), Some(MAX_ADVANCE_MS));
    }

    // ---- Wire format ----

    /// Commands are an internally tagged union so the input layer can send JSON.
    #[test]
    fn test_player_command_json_shape() {
        let cmd = PlayerCommand::SelectAction {
            action: Action::Reroute,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"SelectAction","action":"reroute"}"#);

        let back: PlayerCommand =
            serde_json::from_str(r#"{"type":"SelectDifficulty","level":"moderate"}"#).unwrap();
        assert_eq!(
            back,
            PlayerCommand::SelectDifficulty {
                level: Difficulty::Moderate
            }
        );
    }

    #[test]
    fn test_engine_event_json_shape() {
        let event = EngineEvent::Audio {
            cue: AudioCue::AlarmStart,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"Audio","cue":"alarm_start"}"#);

        let render = EngineEvent::SlotRender {
            slot: 1,
            view: SlotView::Empty,
        };
        let json = serde_json::to_string(&render).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, render);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::NoProblemSelected.to_string(),
            "select a problem first"
        );
        let outcome: CommandOutcome = Err(Rejection::SlotEmpty(2)).into();
        assert!(!outcome.is_accepted());
        assert!(CommandOutcome::from(Ok(())).is_accepted());
    }

    #[test]
    fn test_default_snapshot_is_difficulty_select() {
        let snapshot = GameStateSnapshot::default();
        assert_eq!(snapshot.phase, GamePhase::DifficultySelect);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, snapshot.phase);
        assert!(back.slots.is_empty());
    }
}
