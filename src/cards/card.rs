//! A single tile on the board.
//!
//! A `Card` holds only logical state: which pair it belongs to, whether it
//! is face up, and which grid slot it occupies. How it looks is the
//! presenter's business.

use serde::{Deserialize, Serialize};

/// Identifier for a card within one round.
///
/// Ids are dense (`0..card_count`) and stable for the life of the round,
/// including across reshuffles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The value shared by the two cards of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(pub u32);

impl Identity {
    /// Create a new identity value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical grid slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub col: usize,
    pub row: usize,
}

impl GridPos {
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Slot for a row-major index on a grid `columns` wide.
    #[must_use]
    pub const fn from_index(index: usize, columns: usize) -> Self {
        Self {
            col: index % columns,
            row: index / columns,
        }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Which side of the card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    #[default]
    Closed,
    Open,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable id within the round.
    pub id: CardId,

    /// Pair value.
    pub identity: Identity,

    /// Current face.
    pub face: CardFace,

    /// Current grid slot.
    pub position: GridPos,

    /// Set once the pair is found; a matched card stays open.
    pub matched: bool,
}

impl Card {
    /// Create a closed, unmatched card.
    #[must_use]
    pub fn new(id: CardId, identity: Identity, position: GridPos) -> Self {
        Self {
            id,
            identity,
            face: CardFace::Closed,
            position,
            matched: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.face == CardFace::Open
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.face == CardFace::Closed
    }

    /// Turn the card face up.
    pub fn open(&mut self) {
        self.face = CardFace::Open;
    }

    /// Turn the card face down. Matched cards never close.
    pub fn close(&mut self) {
        if !self.matched {
            self.face = CardFace::Closed;
        }
    }

    /// Lock the card face up for the rest of the round.
    pub fn mark_matched(&mut self) {
        self.face = CardFace::Open;
        self.matched = true;
    }
}
