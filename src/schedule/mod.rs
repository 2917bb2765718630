//! Logical-time scheduling.
//!
//! Every delay in a round (closing a mismatched pair, the reshuffle
//! decision, the round-over dialog) and every periodic tick (the time
//! attack countdown) is a task in the round's [`Scheduler`]. Tearing a
//! round down clears its scheduler, so no task from an old round can run
//! against a new one.

mod scheduler;

pub use scheduler::{Fired, Scheduler, TimerId};
