//! Deterministic task scheduler for the mission clock.
//!
//! Tasks are ordered by due time, then by task priority, then by insertion
//! order. `cancel_all` empties the queue, so nothing scheduled before it can
//! fire afterwards.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

/// Work the engine performs when an entry comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Decrement the mission timer.
    Countdown,
    /// Regular spawn cadence.
    Spawner,
    /// Raise severity on every active problem.
    Degrader,
    /// The one-off opening spawn.
    FirstSpawn,
    /// One of the extra spawns after a failure.
    PenaltySpawn,
    /// Return a flashing slot to empty.
    ClearSlot { slot: usize },
    /// Leave the mission-complete screen for the next briefing.
    AdvanceBriefing,
}

impl Task {
    /// Lower runs first within one instant. The countdown goes first so an
    /// expiring timer is seen by everything else due at the same time.
    fn priority(&self) -> u8 {
        match self {
            Task::Countdown => 0,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_ms: u64,
    seq: u64,
    interval_ms: Option<u64>,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.task.priority(), self.seq).cmp(&(
            other.due_ms,
            other.task.priority(),
            other.seq,
        ))
    }
}

/// A task popped from the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub task: Task,
    pub due_ms: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once at `due_ms`.
    pub fn schedule_once(&mut self, due_ms: u64, task: Task) {
        self.push(due_ms, None, task);
    }

    /// Run `task` at `first_due_ms` and every `interval_ms` after that.
    pub fn schedule_repeating(&mut self, first_due_ms: u64, interval_ms: u64, task: Task) {
        self.push(first_due_ms, Some(interval_ms.max(1)), task);
    }

    fn push(&mut self, due_ms: u64, interval_ms: Option<u64>, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due_ms,
            seq,
            interval_ms,
            task,
        }));
    }

    /// Due time of the earliest entry.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Pop the earliest entry due at or before `now_ms`. Repeating entries
    /// are re-armed one interval after their due time.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        let Reverse(head) = self.queue.peek()?;
        if head.due_ms > now_ms {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        if let Some(interval) = entry.interval_ms {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.queue.push(Reverse(Entry {
                due_ms: entry.due_ms.saturating_add(interval),
                seq,
                ..entry
            }));
        }
        trace!(task = ?entry.task, due_ms = entry.due_ms, "task fired");
        Some(Fired {
            task: entry.task,
            due_ms: entry.due_ms,
        })
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        if !self.queue.is_empty() {
            trace!(pending = self.queue.len(), "cancelling all tasks");
        }
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether an entry for `task` is pending.
    pub fn contains(&self, task: Task) -> bool {
        self.queue.iter().any(|Reverse(e)| e.task == task)
    }
}
