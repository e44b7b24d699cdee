//! Simulation engine for DEEP PRESSURE.
//!
//! Owns the mission state, runs the countdown, spawner and degradation tasks
//! on a deterministic scheduler, and produces GameStateSnapshots for the
//! frontend.

pub mod engine;
pub mod journal;
pub mod ledger;
pub mod mission;
pub mod scheduler;
pub mod slots;
pub mod systems;

pub use deep_pressure_core as core;
pub use engine::{SimConfig, SimulationEngine};
