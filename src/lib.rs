//! # rust-pairs
//!
//! A card-matching ("pairs" / concentration) game engine.
//!
//! Cards are laid out face down on a grid. Each identity appears on exactly
//! two cards. The player opens two cards per attempt: a match stays open, a
//! mismatch closes again after a short delay. Four modes layer extra rules
//! on top: plain play, a countdown, a score with a streak multiplier, and a
//! board that reshuffles its closed cards every few attempts. Rounds can be
//! played solo or by two players taking turns.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The core never draws. Every visual change is a command
//!    to a [`Presenter`], and nothing is read back.
//!
//! 2. **Logical Time**: There are no threads or wall clocks. Delays and
//!    ticks are tasks in a per-round [`Scheduler`], run when the caller
//!    advances the round clock. Replays are exact.
//!
//! 3. **Deterministic**: Layouts and reshuffles come from a seeded
//!    [`GameRng`]; the same seed and inputs give the same round.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors, logical time
//! - `cards`: Cards, grid positions and the deck
//! - `schedule`: Cancellable one-shot and periodic tasks
//! - `rules`: Match resolution, turn order, round outcomes
//! - `modes`: Quick play, time attack, score attack, shuffle
//! - `presenter`: The outbound visual interface
//! - `round`: A round and the session around it

pub mod core;
pub mod cards;
pub mod schedule;
pub mod rules;
pub mod modes;
pub mod presenter;
pub mod round;

// Re-export commonly used types
pub use crate::core::{
    format_seconds, GameMode, GameRng, Millis, PlayerId, PlayerMap, Rejection, RoundConfig,
    RoundError, Timings,
};

pub use crate::cards::{Card, CardFace, CardId, Deck, GridPos, Identity};

pub use crate::schedule::{Scheduler, TimerId};

pub use crate::rules::{
    EndReason, GameResult, MatchCoordinator, MatchEvent, MatchState, RoundOutcome,
    TurnCoordinator,
};

pub use crate::modes::{ModeManager, ScoreAttack, ShuffleCount, TimeAttack};

pub use crate::presenter::{
    CardVisual, NullPresenter, Presenter, PresenterCommand, RecordingPresenter,
};

pub use crate::round::{Activation, Round, Session};
