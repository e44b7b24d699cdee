//! Presentation sinks. The engine never waits on any of these.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use deep_pressure_core::catalog::mission_briefing;
use deep_pressure_core::enums::{LogLevel, Screen};
use deep_pressure_core::events::EngineEvent;
use deep_pressure_core::state::{GameStateSnapshot, OutcomeSummary};

/// Receives every snapshot the engine produces.
pub trait Frontend: Send {
    fn present(&mut self, snapshot: &GameStateSnapshot);
}

impl<F: Frontend + ?Sized> Frontend for Box<F> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        (**self).present(snapshot);
    }
}

/// `m:ss`, as shown on the mission timer.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Plain-text renderer for a terminal.
pub struct ConsoleFrontend<W: Write + Send> {
    out: W,
    show_cues: bool,
}

impl ConsoleFrontend<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleFrontend<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_cues: false,
        }
    }

    /// Also print sound cues.
    pub fn with_cues(mut self, show_cues: bool) -> Self {
        self.show_cues = show_cues;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: &EngineEvent, snapshot: &GameStateSnapshot) -> io::Result<()> {
        let clock = format_clock(snapshot.status.time_remaining);
        match event {
            EngineEvent::ScreenTransition { screen, mission } => {
                self.render_screen(*screen, *mission)?;
            }
            EngineEvent::StatusUpdate {
                time_remaining,
                hull,
                power,
            } => {
                if *time_remaining > 0 && time_remaining % 30 == 0 {
                    writeln!(
                        self.out,
                        "[{}] hull {}%  power {}%",
                        format_clock(*time_remaining),
                        hull,
                        power
                    )?;
                }
            }
            EngineEvent::LogEntry(entry) => {
                let tag = match entry.level {
                    LogLevel::Info => "INFO",
                    LogLevel::Success => "OK",
                    LogLevel::Warning => "WARN",
                    LogLevel::Critical => "CRIT",
                };
                writeln!(self.out, "[{clock}] {tag:<4} {}", entry.message)?;
            }
            EngineEvent::OutcomeSummary(summary) => self.render_outcome(summary)?,
            EngineEvent::Audio { cue } => {
                if self.show_cues {
                    writeln!(self.out, "[{clock}]      ({cue:?})")?;
                }
            }
            EngineEvent::SlotRender { .. } => {}
        }
        Ok(())
    }

    fn render_screen(&mut self, screen: Screen, mission: Option<u8>) -> io::Result<()> {
        match screen {
            Screen::DifficultySelect => writeln!(self.out, "== SELECT DIFFICULTY ==")?,
            Screen::Briefing => {
                if let Some(briefing) = mission.and_then(mission_briefing) {
                    writeln!(self.out)?;
                    writeln!(
                        self.out,
                        "== MISSION {:02}: {} ==",
                        briefing.number, briefing.title
                    )?;
                    writeln!(self.out, "{}", briefing.briefing)?;
                    writeln!(self.out, "Objective: {}", briefing.objective)?;
                }
            }
            Screen::Tutorial => writeln!(
                self.out,
                "-- Select a problem, then the matching action: seal, reroute, vent or emergency. --"
            )?,
            Screen::ControlRoom => writeln!(self.out, "-- CONTROL ROOM --")?,
            Screen::MissionComplete | Screen::Outcome => {}
        }
        Ok(())
    }

    fn render_outcome(&mut self, summary: &OutcomeSummary) -> io::Result<()> {
        let title = if summary.victory {
            "MISSION COMPLETE"
        } else {
            "MISSION FAILED"
        };
        writeln!(self.out)?;
        writeln!(self.out, "== {title} ==")?;
        writeln!(self.out, "{}", summary.message)?;
        writeln!(
            self.out,
            "Time survived: {}",
            format_clock(summary.time_survived_secs)
        )?;
        writeln!(self.out, "Problems solved: {}", summary.problems_solved)?;
        writeln!(self.out, "Hull: {}%  Power: {}%", summary.hull, summary.power)?;
        if summary.campaign_over {
            writeln!(
                self.out,
                "Total problems solved: {}",
                summary.total_problems_solved
            )?;
        }
        Ok(())
    }
}

impl<W: Write + Send> Frontend for ConsoleFrontend<W> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            // A closed terminal must not stop the simulation.
            let _ = self.render(event, snapshot);
        }
        let _ = self.out.flush();
    }
}

/// Writes every event as one JSON line.
pub struct JsonFrontend<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonFrontend<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Frontend for JsonFrontend<W> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            if let Ok(line) = serde_json::to_string(event) {
                let _ = writeln!(self.out, "{line}");
            }
        }
    }
}

/// Collects snapshots for inspection from another thread.
#[derive(Clone, Default)]
pub struct RecordingFrontend {
    snapshots: Arc<Mutex<Vec<GameStateSnapshot>>>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshots(&self) -> Vec<GameStateSnapshot> {
        self.snapshots
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Frontend for RecordingFrontend {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.push(snapshot.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deep_pressure_core::enums::Difficulty;
    use deep_pressure_core::events::{AudioCue, LogEntry};

    fn with_events(events: Vec<EngineEvent>) -> GameStateSnapshot {
        GameStateSnapshot {
            events,
            ..Default::default()
        }
    }

    fn console_output(snapshot: &GameStateSnapshot, cues: bool) -> String {
        let mut console = ConsoleFrontend::new(Vec::new()).with_cues(cues);
        console.present(snapshot);
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(127), "2:07");
    }

    #[test]
    fn test_console_prints_briefing_and_log() {
        let mut snap = with_events(vec![
            EngineEvent::ScreenTransition {
                screen: Screen::Briefing,
                mission: Some(1),
            },
            EngineEvent::LogEntry(LogEntry {
                message: "Mission started. All systems nominal.".into(),
                level: LogLevel::Info,
                at_ms: 0,
            }),
        ]);
        snap.difficulty = Some(Difficulty::Easy);
        snap.status.time_remaining = 180;

        let out = console_output(&snap, false);
        assert!(out.contains("MISSION 01"));
        assert!(out.contains("Objective:"));
        assert!(out.contains("[3:00] INFO Mission started. All systems nominal."));
    }

    #[test]
    fn test_console_cues_are_optional() {
        let snap = with_events(vec![EngineEvent::Audio {
            cue: AudioCue::Success,
        }]);
        assert!(console_output(&snap, false).is_empty());
        assert!(console_output(&snap, true).contains("Success"));
    }

    #[test]
    fn test_console_prints_outcome() {
        let snap = with_events(vec![EngineEvent::OutcomeSummary(OutcomeSummary {
            victory: false,
            mission: 2,
            campaign_over: true,
            time_survived_secs: 75,
            problems_solved: 4,
            total_problems_solved: 11,
            hull: 0,
            power: 12,
            cause: None,
            message: "Hull integrity failed.".into(),
        })]);
        let out = console_output(&snap, false);
        assert!(out.contains("MISSION FAILED"));
        assert!(out.contains("Time survived: 1:15"));
        assert!(out.contains("Total problems solved: 11"));
    }

    #[test]
    fn test_json_frontend_writes_one_line_per_event() {
        let snap = with_events(vec![
            EngineEvent::Audio {
                cue: AudioCue::Click,
            },
            EngineEvent::ScreenTransition {
                screen: Screen::ControlRoom,
                mission: Some(1),
            },
        ]);
        let mut json = JsonFrontend::new(Vec::new());
        json.present(&snap);
        let out = String::from_utf8(json.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let _: EngineEvent = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_recording_frontend_shares_snapshots() {
        let recorder = RecordingFrontend::new();
        let mut sink: Box<dyn Frontend> = Box::new(recorder.clone());
        sink.present(&GameStateSnapshot::default());
        sink.present(&GameStateSnapshot::default());
        assert_eq!(recorder.len(), 2);
    }
}
