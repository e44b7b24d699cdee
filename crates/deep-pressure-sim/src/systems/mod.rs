//! Systems that run when scheduled tasks come due.
//!
//! Systems are free functions over the mission state. They do not own
//! state and never touch the scheduler except to book follow-up work.

pub mod countdown;
pub mod degradation;
pub mod resolution;
pub mod snapshot;
pub mod spawner;
