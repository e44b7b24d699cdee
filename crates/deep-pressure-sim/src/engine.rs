//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the session state, applies player commands, runs
//! scheduled tasks and produces `GameStateSnapshot`s. It has no notion of
//! wall-clock time: a driver calls `advance` with elapsed seconds, which keeps
//! the whole session deterministic and testable without waiting.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use deep_pressure_campaign::{Campaign, CampaignProgress, MissionRecord};
use deep_pressure_core::commands::{CommandOutcome, PlayerCommand, Rejection};
use deep_pressure_core::constants::*;
use deep_pressure_core::enums::*;
use deep_pressure_core::events::{AudioCue, EngineEvent};
use deep_pressure_core::state::{GameStateSnapshot, OutcomeSummary, SlotView};
use deep_pressure_core::types::SimTime;

use crate::journal::Journal;
use crate::mission::MissionState;
use crate::scheduler::{Fired, Scheduler, Task};
use crate::systems;
use crate::systems::snapshot::SnapshotSource;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Show the tutorial overlay before mission 1. The clock waits for it.
    pub tutorial: bool,
    /// Spawn problems. Off means no first spawn and no spawner cadence.
    pub spawning: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tutorial: true,
            spawning: true,
        }
    }
}

/// The simulation engine. Owns the campaign, the running mission and the
/// task scheduler.
pub struct SimulationEngine {
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    command_queue: VecDeque<PlayerCommand>,
    journal: Journal,
    campaign: Option<Campaign>,
    mission: Option<MissionState>,
    tutorial_open: bool,
    outcome: Option<OutcomeSummary>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            scheduler: Scheduler::new(),
            command_queue: VecDeque::new(),
            journal: Journal::new(),
            campaign: None,
            mission: None,
            tutorial_open: false,
            outcome: None,
        }
    }

    /// Queue a player command for processing at the next advance.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately at the current engine time.
    pub fn handle_command(&mut self, command: PlayerCommand) -> CommandOutcome {
        let result = match command {
            PlayerCommand::SelectDifficulty { level } => self.select_difficulty(level),
            PlayerCommand::StartMission => self.start_mission(),
            PlayerCommand::CloseTutorial => self.close_tutorial(),
            PlayerCommand::RestartGame => {
                self.restart();
                Ok(())
            }
            PlayerCommand::SelectProblem { slot } => self.select_problem(slot),
            PlayerCommand::SelectAction { action } => self.select_action(action),
        };
        if let Err(rejection) = &result {
            debug!(?command, %rejection, "command rejected");
        }
        result.into()
    }

    /// Drain queued commands, advance engine time by `delta_secs` and return
    /// the resulting snapshot. Negative or non-finite deltas only process
    /// commands.
    pub fn advance(&mut self, delta_secs: f64) -> GameStateSnapshot {
        match SimTime::millis_from_secs(delta_secs) {
            Some(delta_ms) => self.advance_millis(delta_ms),
            None => {
                warn!(delta_secs, "ignoring invalid time delta");
                self.advance_millis(0)
            }
        }
    }

    /// Same as `advance`, in whole milliseconds. Steps longer than
    /// `MAX_ADVANCE_MS` are clamped.
    pub fn advance_millis(&mut self, delta_ms: u64) -> GameStateSnapshot {
        if delta_ms > MAX_ADVANCE_MS {
            warn!(delta_ms, "clamping oversized time delta");
        }
        self.process_commands();
        let target = self
            .time
            .elapsed_ms
            .saturating_add(delta_ms.min(MAX_ADVANCE_MS));
        self.run_until(target);
        let events = self.journal.drain();
        self.build_snapshot(events)
    }

    /// Current state without draining pending events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    /// Take every event emitted since the last advance or drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.journal.drain()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.campaign.as_ref()
    }

    pub fn mission(&self) -> Option<&MissionState> {
        self.mission.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.mission.as_ref().is_some_and(|m| m.is_running)
    }

    /// Put a specific problem on the board (for tests).
    #[cfg(test)]
    pub fn force_spawn(&mut self, kind: ProblemKind) -> Option<usize> {
        let mission = self.mission.as_mut()?;
        let def = deep_pressure_core::catalog::problem_definition(kind);
        let problem =
            crate::slots::ActiveProblem::new(kind, def.locations[0], mission.profile.degradation_ms);
        systems::spawner::place(mission, problem, &mut self.journal)
    }

    /// Overwrite hull and power (for tests).
    #[cfg(test)]
    pub fn set_integrity(&mut self, hull: i32, power: i32) {
        if let Some(mission) = self.mission.as_mut() {
            mission.ledger = crate::ledger::ResourceLedger::new(
                deep_pressure_core::types::Integrity::new(hull, power),
            );
        }
    }

    /// Get a read-only reference to the scheduler (for tests).
    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // --- Commands ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn select_difficulty(&mut self, level: Difficulty) -> Result<(), Rejection> {
        self.expect_phase(GamePhase::DifficultySelect)?;
        let campaign = Campaign::new(level);
        let mission = campaign.mission();
        self.campaign = Some(campaign);
        self.journal.cue(AudioCue::Click);
        self.enter_briefing(mission);
        Ok(())
    }

    fn start_mission(&mut self) -> Result<(), Rejection> {
        self.expect_phase(GamePhase::Briefing)?;
        let Some(campaign) = self.campaign.as_ref() else {
            return Err(Rejection::WrongPhase(self.phase));
        };
        let mission = MissionState::new(
            campaign.mission(),
            campaign.profile(),
            campaign.starting_integrity(),
            campaign.mission_duration_secs(),
        );
        info!(
            mission = mission.number,
            duration = mission.duration_secs,
            hull = mission.ledger.hull(),
            power = mission.ledger.power(),
            "mission loaded"
        );

        self.phase = GamePhase::Active;
        self.outcome = None;
        self.journal.clear_history();
        self.journal.cue(AudioCue::Click);
        self.journal.push(EngineEvent::ScreenTransition {
            screen: Screen::ControlRoom,
            mission: Some(mission.number),
        });
        for slot in 0..mission.slots.capacity() {
            self.journal.push(EngineEvent::SlotRender {
                slot,
                view: SlotView::Empty,
            });
        }
        self.journal.push(mission.status_event());

        let show_tutorial = self.config.tutorial && mission.number == 1;
        self.mission = Some(mission);
        if show_tutorial {
            self.tutorial_open = true;
            self.journal.push(EngineEvent::ScreenTransition {
                screen: Screen::Tutorial,
                mission: Some(1),
            });
        } else {
            self.start_clock();
        }
        Ok(())
    }

    fn close_tutorial(&mut self) -> Result<(), Rejection> {
        if !self.tutorial_open {
            return Err(Rejection::TutorialNotOpen);
        }
        self.tutorial_open = false;
        self.journal.cue(AudioCue::Click);
        self.journal.push(EngineEvent::ScreenTransition {
            screen: Screen::ControlRoom,
            mission: self.mission.as_ref().map(|m| m.number),
        });
        self.start_clock();
        Ok(())
    }

    fn select_problem(&mut self, slot: usize) -> Result<(), Rejection> {
        let mission = Self::running_mission(self.phase, &mut self.mission)?;
        let capacity = mission.slots.capacity();
        if slot >= capacity {
            return Err(Rejection::SlotOutOfRange { slot, capacity });
        }
        if mission.slots.get(slot).is_none() {
            return Err(Rejection::SlotEmpty(slot));
        }

        let previous = mission.selection.problem.replace(slot);
        mission.selection.action = None;
        let repaint: Vec<EngineEvent> = previous
            .filter(|&p| p != slot)
            .into_iter()
            .chain(std::iter::once(slot))
            .filter_map(|s| mission.slot_event(s))
            .collect();
        for event in repaint {
            self.journal.push(event);
        }
        self.journal.cue(AudioCue::Click);
        Ok(())
    }

    fn select_action(&mut self, action: Action) -> Result<(), Rejection> {
        let now = self.time.elapsed_ms;
        let mission = Self::running_mission(self.phase, &mut self.mission)?;
        let result = systems::resolution::evaluate(
            mission,
            action,
            now,
            &mut self.scheduler,
            &mut self.journal,
        );
        match result {
            Ok(Resolution::Failed) => {
                self.check_defeat();
                Ok(())
            }
            Ok(Resolution::Solved) => Ok(()),
            Err(Rejection::NoProblemSelected) => {
                self.journal.log(LogLevel::Warning, "Select a problem first.");
                Err(Rejection::NoProblemSelected)
            }
            Err(rejection) => Err(rejection),
        }
    }

    fn restart(&mut self) {
        let was_running = self.is_running();
        self.scheduler.cancel_all();
        self.campaign = None;
        self.mission = None;
        self.phase = GamePhase::DifficultySelect;
        self.tutorial_open = false;
        self.outcome = None;
        self.journal.clear_history();

        if was_running {
            self.journal.cue(AudioCue::AlarmStop);
        }
        self.journal.push(EngineEvent::ScreenTransition {
            screen: Screen::DifficultySelect,
            mission: None,
        });
        info!("session restarted");
    }

    fn expect_phase(&self, phase: GamePhase) -> Result<(), Rejection> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(Rejection::WrongPhase(self.phase))
        }
    }

    /// Control-room commands need an active phase and a ticking clock.
    fn running_mission(
        phase: GamePhase,
        mission: &mut Option<MissionState>,
    ) -> Result<&mut MissionState, Rejection> {
        if phase != GamePhase::Active {
            return Err(Rejection::WrongPhase(phase));
        }
        mission
            .as_mut()
            .filter(|m| m.is_running)
            .ok_or(Rejection::MissionNotRunning)
    }

    // --- Clock ---

    fn start_clock(&mut self) {
        let now = self.time.elapsed_ms;
        let Some(mission) = self.mission.as_mut() else {
            return;
        };
        mission.is_running = true;

        self.scheduler
            .schedule_repeating(now + COUNTDOWN_INTERVAL_MS, COUNTDOWN_INTERVAL_MS, Task::Countdown);
        self.scheduler
            .schedule_repeating(now + DEGRADE_INTERVAL_MS, DEGRADE_INTERVAL_MS, Task::Degrader);
        if self.config.spawning {
            let interval = mission.profile.spawn_interval_ms;
            self.scheduler
                .schedule_once(now + FIRST_SPAWN_DELAY_MS, Task::FirstSpawn);
            self.scheduler
                .schedule_repeating(now + interval, interval, Task::Spawner);
        }

        self.journal.log(LogLevel::Success, "Mission started. All systems nominal.");
        info!(mission = mission.number, "mission clock started");
    }

    /// Fire every task due up to `target_ms`, one instant at a time.
    fn run_until(&mut self, target_ms: u64) {
        while let Some(due) = self.scheduler.next_due().filter(|&d| d <= target_ms) {
            self.set_time(due.max(self.time.elapsed_ms));
            while let Some(fired) = self.scheduler.pop_due(due) {
                self.fire(fired);
            }
            self.resolve_instant();
        }
        self.set_time(target_ms.max(self.time.elapsed_ms));
    }

    fn set_time(&mut self, elapsed_ms: u64) {
        self.time = SimTime::from_millis(elapsed_ms);
        self.journal.set_time(elapsed_ms);
    }

    fn fire(&mut self, fired: Fired) {
        let now = self.time.elapsed_ms;
        match fired.task {
            Task::AdvanceBriefing => self.advance_briefing(),
            Task::ClearSlot { slot } => {
                if let Some(mission) = self.mission.as_mut() {
                    if mission.slots.clear_residue(slot, now) {
                        if let Some(event) = mission.slot_event(slot) {
                            self.journal.push(event);
                        }
                    }
                }
            }
            Task::Countdown => {
                if let Some(mission) = self.mission.as_mut().filter(|m| m.is_running) {
                    systems::countdown::run(mission, &mut self.journal);
                }
            }
            Task::Degrader => self.run_degrader(),
            Task::FirstSpawn | Task::Spawner | Task::PenaltySpawn => {
                // A mission whose timer already ran out takes no more spawns.
                if let Some(mission) = self
                    .mission
                    .as_mut()
                    .filter(|m| m.is_running && !m.time_expired)
                {
                    systems::spawner::spawn(mission, &mut self.rng, &mut self.journal);
                }
            }
        }
    }

    fn run_degrader(&mut self) {
        let now = self.time.elapsed_ms;
        let failed = match self.mission.as_mut() {
            Some(mission) if mission.is_running => {
                systems::degradation::run(mission, &mut self.journal)
            }
            _ => return,
        };

        for slot in failed {
            let Some(mission) = self.mission.as_mut().filter(|m| m.is_running) else {
                return;
            };
            if let Some(problem) = mission.slots.get(slot) {
                self.journal.log(
                    LogLevel::Critical,
                    format!("{} reached critical state!", problem.definition().name),
                );
            }
            systems::resolution::fail(mission, slot, now, &mut self.scheduler, &mut self.journal);
            if self.check_defeat() {
                return;
            }
        }
    }

    /// Victory is only declared once everything due at this instant has run,
    /// so a same-instant depletion always wins.
    fn resolve_instant(&mut self) {
        let expired = self
            .mission
            .as_ref()
            .is_some_and(|m| m.is_running && m.time_expired);
        if expired && !self.check_defeat() {
            self.end_mission_victory();
        }
    }

    fn advance_briefing(&mut self) {
        if self.phase != GamePhase::MissionComplete {
            return;
        }
        let Some(next) = self.campaign.as_mut().and_then(|c| c.advance()) else {
            return;
        };
        self.mission = None;
        self.outcome = None;
        self.enter_briefing(next);
    }

    fn enter_briefing(&mut self, mission: u8) {
        self.phase = GamePhase::Briefing;
        self.journal.push(EngineEvent::ScreenTransition {
            screen: Screen::Briefing,
            mission: Some(mission),
        });
        info!(mission, "briefing");
    }

    // --- Mission end ---

    /// End the mission as a defeat if hull or power is depleted.
    fn check_defeat(&mut self) -> bool {
        let defeated = self
            .mission
            .as_ref()
            .is_some_and(|m| m.is_running && m.ledger.is_defeated());
        if defeated {
            self.end_mission_defeat();
        }
        defeated
    }

    fn stop_mission(&mut self) -> Option<MissionRecord> {
        self.scheduler.cancel_all();
        let mission = self.mission.as_mut()?;
        mission.is_running = false;
        mission.selection.clear();
        let integrity = mission.ledger.integrity();
        Some(MissionRecord {
            mission: mission.number,
            survived: !mission.ledger.is_defeated(),
            time_survived_secs: mission.time_survived_secs(),
            problems_solved: mission.problems_solved,
            hull: integrity.hull,
            power: integrity.power,
        })
    }

    fn end_mission_defeat(&mut self) {
        let Some(record) = self.stop_mission() else {
            return;
        };
        let cause = self.mission.as_ref().and_then(|m| m.ledger.defeat_cause());
        let message = cause
            .map(|c| c.message())
            .unwrap_or("The submarine has been lost.");

        let mut total = 0;
        if let Some(campaign) = self.campaign.as_mut() {
            campaign.fail_mission(record.clone());
            total = campaign.total_problems_solved();
        }
        info!(mission = record.mission, ?cause, "mission failed");

        self.phase = GamePhase::Defeat;
        self.journal.log(LogLevel::Critical, "MISSION FAILED");
        self.journal.cue(AudioCue::AlarmStop);
        self.journal.cue(AudioCue::DefeatSting);
        self.publish_outcome(record, false, true, total, cause, message.to_string());
    }

    fn end_mission_victory(&mut self) {
        let Some(record) = self.stop_mission() else {
            return;
        };
        let Some(campaign) = self.campaign.as_mut() else {
            return;
        };
        let progress = campaign.complete_mission(record.clone());
        let total = campaign.total_problems_solved();

        self.journal.log(LogLevel::Success, "MISSION COMPLETE");
        self.journal.cue(AudioCue::AlarmStop);
        self.journal.cue(AudioCue::VictoryFanfare);

        match progress {
            CampaignProgress::NextMission(next) => {
                info!(mission = record.mission, next, "mission complete");
                self.phase = GamePhase::MissionComplete;
                self.scheduler.schedule_once(
                    self.time.elapsed_ms + MISSION_ADVANCE_DELAY_MS,
                    Task::AdvanceBriefing,
                );
                let message = format!("Mission {} completed. Prepare for next phase.", record.mission);
                self.publish_outcome(record, true, false, total, None, message);
            }
            CampaignProgress::Victory => {
                info!(total_solved = total, "campaign won");
                self.phase = GamePhase::Victory;
                let message = "All missions completed. The submarine survives.".to_string();
                self.publish_outcome(record, true, true, total, None, message);
            }
        }
    }

    fn publish_outcome(
        &mut self,
        record: MissionRecord,
        victory: bool,
        campaign_over: bool,
        total_problems_solved: u32,
        cause: Option<DefeatCause>,
        message: String,
    ) {
        let summary = OutcomeSummary {
            victory,
            mission: record.mission,
            campaign_over,
            time_survived_secs: record.time_survived_secs,
            problems_solved: record.problems_solved,
            total_problems_solved,
            hull: record.hull.clamp(0, MAX_INTEGRITY),
            power: record.power.clamp(0, MAX_INTEGRITY),
            cause,
            message,
        };
        let screen = if campaign_over {
            Screen::Outcome
        } else {
            Screen::MissionComplete
        };
        if let Some(mission) = self.mission.as_ref() {
            self.journal.push(mission.status_event());
        }
        self.journal.push(EngineEvent::ScreenTransition {
            screen,
            mission: Some(record.mission),
        });
        self.journal.push(EngineEvent::OutcomeSummary(summary.clone()));
        self.outcome = Some(summary);
    }

    fn build_snapshot(&self, events: Vec<EngineEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            SnapshotSource {
                time: self.time,
                phase: self.phase,
                campaign: self.campaign.as_ref(),
                mission: self.mission.as_ref(),
                tutorial_open: self.tutorial_open,
                log: self.journal.history(),
                outcome: self.outcome.as_ref(),
            },
            events,
        )
    }
}
