//! Headless driver: runs a whole session in fixed steps without sleeping.

use tracing::{debug, info};

use deep_pressure_core::state::GameStateSnapshot;
use deep_pressure_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::frontend::Frontend;

/// Simulated milliseconds per headless step.
pub const HEADLESS_STEP_MS: u64 = 100;

/// Upper bound on steps, well past the longest possible campaign.
pub const HEADLESS_MAX_STEPS: usize = 20_000;

/// Play until victory, defeat or `max_steps`. Returns the last snapshot.
pub fn run_headless(
    sim: SimConfig,
    autopilot: &mut Autopilot,
    frontend: &mut dyn Frontend,
    step_ms: u64,
    max_steps: usize,
) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(sim);
    let mut snapshot = engine.advance_millis(0);
    frontend.present(&snapshot);

    for step in 0..max_steps {
        if snapshot.phase.is_terminal() {
            info!(step, phase = ?snapshot.phase, "headless session finished");
            return snapshot;
        }
        engine.queue_commands(autopilot.next_commands(&snapshot));
        snapshot = engine.advance_millis(step_ms);
        frontend.present(&snapshot);
    }

    debug!(max_steps, "headless session hit the step limit");
    snapshot
}
