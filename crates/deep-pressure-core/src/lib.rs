//! Core types and definitions for the DEEP PRESSURE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the static catalog, commands, events, state snapshots, and constants.
//! It has no dependency on any runtime or presentation framework.

pub mod catalog;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
