//! Game rules: click resolution, turn order and round results.
//!
//! - `MatchCoordinator` turns activations into opened, matched or
//!   mismatched cards
//! - `TurnCoordinator` tracks the active player and per-player tallies
//! - `GameResult`/`RoundOutcome` describe how a round ended
//!
//! Mode-specific behaviour lives in [`crate::modes`]; the rules here are
//! the same for every mode.

pub mod matcher;
pub mod turns;
pub mod outcome;

pub use matcher::{MatchCoordinator, MatchEvent, MatchState};
pub use turns::TurnCoordinator;
pub use outcome::{EndReason, GameResult, RoundOutcome};
