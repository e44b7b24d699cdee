//! Scripted input: plays a session by reading snapshots.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use deep_pressure_core::catalog::problem_definition;
use deep_pressure_core::commands::PlayerCommand;
use deep_pressure_core::enums::{Action, Difficulty, GamePhase, ProblemKind};
use deep_pressure_core::state::{GameStateSnapshot, SlotView};

/// Automated player with a configurable error rate.
pub struct Autopilot {
    difficulty: Difficulty,
    /// Probability of answering with a wrong action, in [0, 1].
    mistake_rate: f64,
    /// Problems below this severity are left alone.
    reaction_severity: f64,
    rng: ChaCha8Rng,
}

impl Autopilot {
    pub fn new(difficulty: Difficulty, mistake_rate: f64, seed: u64) -> Self {
        let mistake_rate = if mistake_rate.is_finite() {
            mistake_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            difficulty,
            mistake_rate,
            reaction_severity: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Wait until a problem reaches `severity` before acting on it.
    pub fn with_reaction(mut self, severity: f64) -> Self {
        self.reaction_severity = severity.max(0.0);
        self
    }

    pub fn mistake_rate(&self) -> f64 {
        self.mistake_rate
    }

    /// Commands to send in response to `snapshot`.
    pub fn next_commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::DifficultySelect => vec![PlayerCommand::SelectDifficulty {
                level: self.difficulty,
            }],
            GamePhase::Briefing => vec![PlayerCommand::StartMission],
            GamePhase::Active if snapshot.tutorial_open => vec![PlayerCommand::CloseTutorial],
            GamePhase::Active if snapshot.is_running => self.respond(snapshot),
            _ => Vec::new(),
        }
    }

    fn respond(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let target = snapshot
            .slots
            .iter()
            .enumerate()
            .filter_map(|(slot, view)| match view {
                SlotView::Active(problem) if problem.severity >= self.reaction_severity => {
                    Some((slot, problem.kind, problem.severity))
                }
                _ => None,
            })
            .max_by(|a, b| a.2.total_cmp(&b.2).then(b.0.cmp(&a.0)));

        let Some((slot, kind, _)) = target else {
            return Vec::new();
        };
        vec![
            PlayerCommand::SelectProblem { slot },
            PlayerCommand::SelectAction {
                action: self.choose_action(kind),
            },
        ]
    }

    fn choose_action(&mut self, kind: ProblemKind) -> Action {
        let correct = problem_definition(kind).correct_action;
        if !self.rng.gen_bool(self.mistake_rate) {
            return correct;
        }
        let wrong: Vec<Action> = Action::ALL
            .into_iter()
            .filter(|a| *a != correct)
            .collect();
        wrong.choose(&mut self.rng).copied().unwrap_or(correct)
    }
}
