//! Cards and the deck.
//!
//! ## Key Types
//!
//! - `CardId`: Stable id of a card within a round
//! - `Identity`: Pair value shared by exactly two cards
//! - `GridPos`: Logical grid slot
//! - `Card`: Face, slot and match state of one card
//! - `Deck`: All cards of a round, pair count, and the reshuffle

pub mod card;
pub mod deck;

pub use card::{Card, CardFace, CardId, GridPos, Identity};
pub use deck::{Deck, Moved};
