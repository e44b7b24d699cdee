//! Resource ledger: hull and power integrity.

use deep_pressure_core::constants::MAX_INTEGRITY;
use deep_pressure_core::enums::DefeatCause;
use deep_pressure_core::types::Integrity;

/// Hull and power for the running mission.
///
/// Damage is not clamped, so values can go below zero. Healing clamps at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLedger {
    hull: i32,
    power: i32,
}

impl ResourceLedger {
    pub fn new(integrity: Integrity) -> Self {
        Self {
            hull: integrity.hull,
            power: integrity.power,
        }
    }

    pub fn hull(&self) -> i32 {
        self.hull
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    /// Raw values, possibly negative.
    pub fn integrity(&self) -> Integrity {
        Integrity::new(self.hull, self.power)
    }

    /// Values clamped to [0, 100].
    pub fn display(&self) -> Integrity {
        self.integrity().clamped()
    }

    pub fn apply_damage(&mut self, hull: i32, power: i32) {
        self.hull -= hull;
        self.power -= power;
    }

    pub fn apply_heal(&mut self, hull: i32, power: i32) {
        self.hull = (self.hull + hull).min(MAX_INTEGRITY);
        self.power = (self.power + power).min(MAX_INTEGRITY);
    }

    pub fn is_defeated(&self) -> bool {
        self.hull <= 0 || self.power <= 0
    }

    /// Hull is checked first when both are depleted.
    pub fn defeat_cause(&self) -> Option<DefeatCause> {
        if self.hull <= 0 {
            Some(DefeatCause::HullBreach)
        } else if self.power <= 0 {
            Some(DefeatCause::PowerLoss)
        } else {
            None
        }
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new(Integrity::default())
    }
}
