//! Problem slots and the active problems that occupy them.

use deep_pressure_core::catalog::{problem_definition, ProblemDefinition};
use deep_pressure_core::constants::SEVERITY_MAX;
use deep_pressure_core::enums::{ProblemKind, Resolution, SeverityBand};
use deep_pressure_core::state::{ProblemView, SlotView};

/// What one degradation step did to a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degrade {
    Rising,
    /// Severity crossed into the critical band on this step.
    TurnedCritical,
    /// Severity reached 100.
    Failed,
}

/// A live problem instance.
///
/// Severity is kept as elapsed degradation time over the problem's lifetime,
/// so N ticks always land on exactly `min(100, N * rate)` without drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProblem {
    pub kind: ProblemKind,
    pub location: &'static str,
    elapsed_ms: u32,
    /// Fixed at spawn from the difficulty profile.
    lifetime_ms: u32,
    critical_alerted: bool,
}

impl ActiveProblem {
    pub fn new(kind: ProblemKind, location: &'static str, lifetime_ms: u32) -> Self {
        Self {
            kind,
            location,
            elapsed_ms: 0,
            lifetime_ms,
            critical_alerted: false,
        }
    }

    pub fn definition(&self) -> &'static ProblemDefinition {
        problem_definition(self.kind)
    }

    /// Severity in [0, 100].
    pub fn severity(&self) -> f64 {
        if self.lifetime_ms == 0 {
            return SEVERITY_MAX;
        }
        SEVERITY_MAX * self.elapsed_ms.min(self.lifetime_ms) as f64 / self.lifetime_ms as f64
    }

    /// Percent per second.
    pub fn degradation_rate(&self) -> f64 {
        SEVERITY_MAX / (self.lifetime_ms as f64 / 1000.0)
    }

    pub fn band(&self) -> SeverityBand {
        SeverityBand::from_severity(self.severity())
    }

    pub fn has_failed(&self) -> bool {
        self.elapsed_ms >= self.lifetime_ms
    }

    /// Apply one degradation step of `step_ms`.
    pub fn degrade(&mut self, step_ms: u32) -> Degrade {
        self.elapsed_ms = self.elapsed_ms.saturating_add(step_ms).min(self.lifetime_ms);
        if self.has_failed() {
            return Degrade::Failed;
        }
        if !self.critical_alerted && self.band() == SeverityBand::Critical {
            self.critical_alerted = true;
            return Degrade::TurnedCritical;
        }
        Degrade::Rising
    }

    pub fn view(&self, selected: bool) -> ProblemView {
        let def = self.definition();
        ProblemView {
            kind: self.kind,
            name: def.name.to_string(),
            icon: def.icon.to_string(),
            description: def.describe(self.location),
            location: self.location.to_string(),
            severity: self.severity(),
            band: self.band(),
            selected,
        }
    }
}

/// Cosmetic state left behind after a problem leaves its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residue {
    pub resolution: Resolution,
    /// Engine time at which the slot shows empty again.
    pub clear_at_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    problem: Option<ActiveProblem>,
    residue: Option<Residue>,
}

impl Slot {
    pub fn problem(&self) -> Option<&ActiveProblem> {
        self.problem.as_ref()
    }

    pub fn residue(&self) -> Option<&Residue> {
        self.residue.as_ref()
    }

    pub fn view(&self, selected: bool) -> SlotView {
        match (&self.problem, &self.residue) {
            (Some(problem), _) => SlotView::Active(problem.view(selected)),
            (None, Some(residue)) => SlotView::Cleared {
                resolution: residue.resolution,
            },
            (None, None) => SlotView::Empty,
        }
    }
}

/// Fixed-capacity ordered slot collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSet {
    slots: Vec<Slot>,
}

impl SlotSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.problem.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() >= self.capacity()
    }

    /// Lowest-index slot without a problem. A cleared-but-still-flashing slot
    /// counts as empty.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.problem.is_none())
    }

    /// Place a problem in the first empty slot. Returns the slot index, or
    /// `None` when every slot is occupied.
    pub fn place(&mut self, problem: ActiveProblem) -> Option<usize> {
        let index = self.first_empty()?;
        let slot = &mut self.slots[index];
        slot.problem = Some(problem);
        slot.residue = None;
        Some(index)
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn get(&self, index: usize) -> Option<&ActiveProblem> {
        self.slots.get(index).and_then(|s| s.problem.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ActiveProblem> {
        self.slots.get_mut(index).and_then(|s| s.problem.as_mut())
    }

    /// Remove the problem in `index`, leaving a residue that clears at
    /// `clear_at_ms`.
    pub fn take(
        &mut self,
        index: usize,
        resolution: Resolution,
        clear_at_ms: u64,
    ) -> Option<ActiveProblem> {
        let slot = self.slots.get_mut(index)?;
        let problem = slot.problem.take()?;
        slot.residue = Some(Residue {
            resolution,
            clear_at_ms,
        });
        Some(problem)
    }

    /// Drop a due residue. A slot that was refilled or re-flashed since the
    /// clear was scheduled is left alone.
    pub fn clear_residue(&mut self, index: usize, now_ms: u64) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        match slot.residue {
            Some(residue) if slot.problem.is_none() && residue.clear_at_ms <= now_ms => {
                slot.residue = None;
                true
            }
            _ => false,
        }
    }

    /// Indices of occupied slots, ascending.
    pub fn occupied_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.problem.is_some())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn views(&self, selected: Option<usize>) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| s.view(selected == Some(i)))
            .collect()
    }
}
