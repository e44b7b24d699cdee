//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ADVANCE_MS, MAX_INTEGRITY};

/// Simulation time tracking. Engine time is whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTime {
    pub elapsed_ms: u64,
}

impl SimTime {
    pub fn from_millis(elapsed_ms: u64) -> Self {
        Self { elapsed_ms }
    }

    /// Elapsed time in seconds.
    pub fn secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }

    /// Convert a wall-clock delta to whole milliseconds.
    ///
    /// Returns `None` for negative or non-finite input. Deltas longer than
    /// `MAX_ADVANCE_MS` are clamped.
    pub fn millis_from_secs(delta_secs: f64) -> Option<u64> {
        if !delta_secs.is_finite() || delta_secs < 0.0 {
            return None;
        }
        Some((delta_secs * 1000.0).round().min(MAX_ADVANCE_MS as f64) as u64)
    }
}

/// Hull and power. Values may go below zero internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integrity {
    pub hull: i32,
    pub power: i32,
}

impl Integrity {
    pub fn new(hull: i32, power: i32) -> Self {
        Self { hull, power }
    }

    /// Values clamped to [0, 100] for display.
    pub fn clamped(&self) -> Self {
        Self {
            hull: self.hull.clamp(0, MAX_INTEGRITY),
            power: self.power.clamp(0, MAX_INTEGRITY),
        }
    }
}

impl Default for Integrity {
    fn default() -> Self {
        Self::new(MAX_INTEGRITY, MAX_INTEGRITY)
    }
}
