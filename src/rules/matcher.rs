//! Click resolution.
//!
//! `MatchCoordinator` decides what an activation does to the board. It has
//! three states:
//!
//! - `Idle`: no unmatched card is face up
//! - `OneOpen(card)`: one card is face up, waiting for its partner
//! - `Resolving { first, second }`: a mismatched pair is face up and input
//!   is locked until [`MatchCoordinator::finish_mismatch`] closes it
//!
//! The coordinator never waits itself. The round schedules the close and
//! calls back when the delay has passed.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Deck, Identity};
use crate::core::error::Rejection;

/// Resolution state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    #[default]
    Idle,
    OneOpen(CardId),
    Resolving { first: CardId, second: CardId },
}

/// What an accepted activation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// The first card of an attempt was turned up.
    Opened(CardId),
    /// The second card matched the first; both stay up.
    Matched {
        first: CardId,
        second: CardId,
        identity: Identity,
    },
    /// The second card did not match; both are up until the close.
    Mismatched { first: CardId, second: CardId },
}

impl MatchEvent {
    /// The card that was activated.
    #[must_use]
    pub fn card(&self) -> CardId {
        match *self {
            MatchEvent::Opened(card) => card,
            MatchEvent::Matched { second, .. } | MatchEvent::Mismatched { second, .. } => second,
        }
    }
}

/// The activation state machine for one round.
#[derive(Clone, Debug, Default)]
pub struct MatchCoordinator {
    state: MatchState,
    stopped: bool,
}

impl MatchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == MatchState::Idle
    }

    /// The face-up card waiting for its partner, if any.
    #[must_use]
    pub fn awaiting(&self) -> Option<CardId> {
        match self.state {
            MatchState::OneOpen(card) => Some(card),
            _ => None,
        }
    }

    /// True while a mismatched pair is waiting to close.
    #[must_use]
    pub fn input_locked(&self) -> bool {
        matches!(self.state, MatchState::Resolving { .. })
    }

    /// True once the round has ended and activations are refused.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Refuse all further activations.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Process one activation against the deck.
    ///
    /// Rejected activations leave the deck and the state untouched.
    pub fn activate(&mut self, deck: &mut Deck, id: CardId) -> Result<MatchEvent, Rejection> {
        if self.stopped {
            return Err(Rejection::RoundOver);
        }
        let card = deck.card(id).ok_or(Rejection::UnknownCard)?;
        if card.is_open() {
            return Err(Rejection::AlreadyOpen);
        }
        if self.input_locked() {
            return Err(Rejection::InputLocked);
        }
        let identity = card.identity;

        match self.state {
            MatchState::Idle => {
                Self::open(deck, id);
                self.state = MatchState::OneOpen(id);
                Ok(MatchEvent::Opened(id))
            }
            MatchState::OneOpen(first) => {
                let first_identity = deck.card(first).map(|c| c.identity);
                if first_identity == Some(identity) {
                    deck.record_match(first, id);
                    self.state = MatchState::Idle;
                    debug!("{} and {} matched ({})", first, id, identity);
                    Ok(MatchEvent::Matched {
                        first,
                        second: id,
                        identity,
                    })
                } else {
                    Self::open(deck, id);
                    self.state = MatchState::Resolving { first, second: id };
                    debug!("{} and {} mismatched", first, id);
                    Ok(MatchEvent::Mismatched { first, second: id })
                }
            }
            MatchState::Resolving { .. } => Err(Rejection::InputLocked),
        }
    }

    /// Close a mismatched pair and unlock input.
    ///
    /// Returns the pair that was closed, or `None` if nothing was resolving.
    pub fn finish_mismatch(&mut self, deck: &mut Deck) -> Option<(CardId, CardId)> {
        let MatchState::Resolving { first, second } = self.state else {
            return None;
        };
        for id in [first, second] {
            if let Some(card) = deck.card_mut(id) {
                card.close();
            }
        }
        self.state = MatchState::Idle;
        Some((first, second))
    }

    fn open(deck: &mut Deck, id: CardId) {
        if let Some(card) = deck.card_mut(id) {
            card.open();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    /// Deck whose cards 0,1 share an identity, as do 2,3.
    fn deck() -> Deck {
        let ids = [Identity::new(10), Identity::new(20)];
        Deck::build(&ids, 2, 2, &mut GameRng::new(1)).unwrap()
    }

    #[test]
    fn test_first_activation_opens() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();

        let event = m.activate(&mut deck, CardId::new(0)).unwrap();

        assert_eq!(event, MatchEvent::Opened(CardId::new(0)));
        assert_eq!(m.awaiting(), Some(CardId::new(0)));
        assert!(deck.card(CardId::new(0)).unwrap().is_open());
    }

    #[test]
    fn test_match() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();

        m.activate(&mut deck, CardId::new(0)).unwrap();
        let event = m.activate(&mut deck, CardId::new(1)).unwrap();

        assert_eq!(
            event,
            MatchEvent::Matched {
                first: CardId::new(0),
                second: CardId::new(1),
                identity: Identity::new(10),
            }
        );
        assert!(m.is_idle());
        assert_eq!(deck.matched_pairs(), 1);
    }

    #[test]
    fn test_mismatch_locks_then_closes() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();

        m.activate(&mut deck, CardId::new(0)).unwrap();
        let event = m.activate(&mut deck, CardId::new(2)).unwrap();
        assert!(matches!(event, MatchEvent::Mismatched { .. }));
        assert!(m.input_locked());
        assert!(deck.card(CardId::new(2)).unwrap().is_open());

        assert_eq!(m.activate(&mut deck, CardId::new(3)), Err(Rejection::InputLocked));
        assert!(deck.card(CardId::new(3)).unwrap().is_closed());

        assert_eq!(
            m.finish_mismatch(&mut deck),
            Some((CardId::new(0), CardId::new(2)))
        );
        assert!(m.is_idle());
        assert_eq!(deck.closed_count(), 4);
        assert_eq!(m.finish_mismatch(&mut deck), None);
    }

    #[test]
    fn test_same_card_twice_does_not_self_match() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();

        m.activate(&mut deck, CardId::new(0)).unwrap();
        assert_eq!(m.activate(&mut deck, CardId::new(0)), Err(Rejection::AlreadyOpen));

        assert_eq!(m.awaiting(), Some(CardId::new(0)));
        assert_eq!(deck.matched_pairs(), 0);
    }

    #[test]
    fn test_open_card_rejected_before_lock() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();

        m.activate(&mut deck, CardId::new(0)).unwrap();
        m.activate(&mut deck, CardId::new(2)).unwrap();
        assert_eq!(m.activate(&mut deck, CardId::new(0)), Err(Rejection::AlreadyOpen));
    }

    #[test]
    fn test_unknown_card() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();
        assert_eq!(m.activate(&mut deck, CardId::new(99)), Err(Rejection::UnknownCard));
        assert!(m.is_idle());
    }

    #[test]
    fn test_stopped_refuses_everything() {
        let mut deck = deck();
        let mut m = MatchCoordinator::new();
        m.stop();
        assert_eq!(m.activate(&mut deck, CardId::new(0)), Err(Rejection::RoundOver));
        assert_eq!(deck.closed_count(), 4);
    }
}
