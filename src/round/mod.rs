//! Rounds and sessions.
//!
//! [`Round`] wires the deck, the match and turn coordinators, the active
//! mode and the task scheduler together. [`Session`] owns a round and its
//! presenter and handles retry and exit.

mod play;
mod session;

pub use play::{Activation, Round, RoundTask};
pub use session::Session;
