//! The full set of cards for a round.
//!
//! A `Deck` is built once per round from a list of identities and a grid
//! size. Every identity yields exactly two cards, and every grid slot holds
//! exactly one card. After construction the deck changes in only two ways:
//! cards are opened, closed or matched, and closed cards trade slots when
//! the board is reshuffled.
//!
//! ## Usage
//!
//! ```
//! use rust_pairs::cards::{Deck, Identity};
//! use rust_pairs::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let identities = [Identity::new(1), Identity::new(2)];
//! let deck = Deck::build(&identities, 2, 2, &mut rng).unwrap();
//!
//! assert_eq!(deck.len(), 4);
//! assert_eq!(deck.total_pairs(), 2);
//! assert!(deck.cards().iter().all(|c| c.is_closed()));
//! ```

use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::card::{Card, CardId, GridPos, Identity};
use crate::core::error::RoundError;
use crate::core::rng::GameRng;

/// Redraws allowed before a reshuffle falls back to rotating the slots.
const MAX_RESHUFFLE_DRAWS: usize = 16;

/// A card that changed slot during a reshuffle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Moved {
    pub card: CardId,
    pub from: GridPos,
    pub to: GridPos,
}

/// Cards for one round, indexed by `CardId`.
#[derive(Clone, Debug)]
pub struct Deck {
    /// Render order; `cards[i].id == CardId(i)`.
    cards: Vec<Card>,

    /// Slot -> card occupying it.
    slots: FxHashMap<GridPos, CardId>,

    columns: usize,
    rows: usize,

    /// Pairs found so far.
    matched_pairs: usize,
}

impl Deck {
    /// Build a deck with two cards per identity on a `columns` x `rows` grid.
    ///
    /// Slots are assigned by a uniform random permutation of the grid.
    /// Fails with [`RoundError::LayoutMismatch`] if the grid does not hold
    /// exactly two cards per identity; no partial deck is created.
    pub fn build(
        identities: &[Identity],
        columns: usize,
        rows: usize,
        rng: &mut GameRng,
    ) -> Result<Self, RoundError> {
        let slot_count = columns
            .checked_mul(rows)
            .filter(|&n| identities.len().checked_mul(2) == Some(n));
        let Some(slot_count) = slot_count else {
            warn!(
                "refusing to build deck: {} identities on a {}x{} grid",
                identities.len(),
                columns,
                rows
            );
            return Err(RoundError::LayoutMismatch {
                identities: identities.len(),
                columns,
                rows,
            });
        };

        let order = rng.permutation(slot_count);
        let mut cards = Vec::with_capacity(slot_count);
        let mut slots = FxHashMap::default();

        for (i, slot) in order.into_iter().enumerate() {
            let id = CardId::new(i as u32);
            let identity = identities[i / 2];
            let position = GridPos::from_index(slot, columns);
            slots.insert(position, id);
            cards.push(Card::new(id, identity, position));
        }

        debug!("built deck of {} cards on {}x{}", cards.len(), columns, rows);

        Ok(Self {
            cards,
            slots,
            columns,
            rows,
            matched_pairs: 0,
        })
    }

    /// All cards, in render order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Look up a card mutably.
    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// The card occupying a grid slot.
    #[must_use]
    pub fn card_at(&self, pos: GridPos) -> Option<CardId> {
        self.slots.get(&pos).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// Number of pairs found so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// True once every pair has been found.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    /// Number of cards currently face down.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_closed()).count()
    }

    /// Lock a found pair face up and count it.
    pub fn record_match(&mut self, first: CardId, second: CardId) {
        for id in [first, second] {
            if let Some(card) = self.card_mut(id) {
                card.mark_matched();
            }
        }
        self.matched_pairs += 1;
        debug_assert!(self.matched_pairs * 2 <= self.cards.len());
    }

    /// Permute the slots of the currently closed cards.
    ///
    /// Open cards keep their slots, and identities and faces are untouched.
    /// With two or more closed cards at least one card always moves; a
    /// subset of zero or one card is left alone. Returns every card that
    /// changed slot.
    pub fn reshuffle(&mut self, rng: &mut GameRng) -> SmallVec<[Moved; 16]> {
        let subset: Vec<CardId> = self
            .cards
            .iter()
            .filter(|c| c.is_closed())
            .map(|c| c.id)
            .collect();

        let mut moved = SmallVec::new();
        if subset.len() < 2 {
            debug!("reshuffle skipped: {} closed card(s)", subset.len());
            return moved;
        }

        let before: Vec<GridPos> = subset.iter().map(|&id| self.cards[id.index()].position).collect();

        let mut after = before.clone();
        let mut draws = 0;
        loop {
            rng.shuffle(&mut after);
            draws += 1;
            if after != before {
                break;
            }
            if draws >= MAX_RESHUFFLE_DRAWS {
                after.rotate_left(1);
                break;
            }
        }

        for ((&id, &from), &to) in subset.iter().zip(&before).zip(&after) {
            self.cards[id.index()].position = to;
            self.slots.insert(to, id);
            if from != to {
                moved.push(Moved { card: id, from, to });
            }
        }

        debug!("reshuffled {} closed cards, {} moved", subset.len(), moved.len());
        moved
    }
}
