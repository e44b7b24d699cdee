//! Campaign progression for DEEP PRESSURE.
//!
//! A campaign is three missions played at one difficulty. Hull and power
//! carry over between missions, the clock and the per-mission
//! problems-solved counter do not.

pub mod campaign;

pub use campaign::{Campaign, CampaignProgress, MissionRecord};
pub use deep_pressure_core as core;

#[cfg(test)]
mod tests;
