//! DEEP PRESSURE application layer.
//!
//! Drives the simulation engine either in real time on a game loop thread
//! or headless in fixed steps, and hands snapshots to a frontend.

pub mod autopilot;
pub mod frontend;
pub mod game_loop;
pub mod session;
pub mod state;

pub use deep_pressure_core as core;
