//! Core types: players, RNG, configuration, errors and logical time.
//!
//! These are shared by every other module and hold no game rules.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod timing;

pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::GameRng;
pub use config::{GameMode, RoundConfig};
pub use error::{Rejection, RoundError};
pub use timing::{format_seconds, Millis, Timings, DEFAULT_TIME_ATTACK_MS};
