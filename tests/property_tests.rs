//! Property tests for board invariants.
//!
//! Random input sequences and random reshuffles must never break the
//! pairing, the slot map or the match counters.

use proptest::prelude::*;

use rust_pairs::cards::{CardId, Deck, Identity};
use rust_pairs::core::{GameMode, GameRng, RoundConfig};
use rust_pairs::presenter::NullPresenter;
use rust_pairs::round::Round;
use rust_pairs::rules::MatchState;

fn open_unmatched(round: &Round) -> usize {
    round
        .deck()
        .cards()
        .iter()
        .filter(|c| c.is_open() && !c.matched)
        .count()
}

proptest! {
    /// Matched pairs only ever grow, and the open cards always agree with
    /// the match state.
    #[test]
    fn prop_round_invariants(
        seed in any::<u64>(),
        mode in prop::sample::select(vec![GameMode::Quick, GameMode::Score, GameMode::Shuffle]),
        players in 1u8..=2,
        steps in prop::collection::vec((0u32..12, 0u64..1_500), 0..80),
    ) {
        let config = RoundConfig::new(5, 2)
            .with_identity_count(5)
            .with_mode(mode)
            .with_players(players);
        let mut round = Round::new(config, seed).unwrap();
        let mut presenter = NullPresenter;
        round.present(&mut presenter);

        let mut matched = 0;
        for (id, delay) in steps {
            round.activate(CardId::new(id), &mut presenter);
            round.advance(delay, &mut presenter);

            prop_assert!(round.matched_pairs() >= matched);
            prop_assert!(round.matched_pairs() <= round.total_pairs());
            matched = round.matched_pairs();

            let expected_open = match round.match_state() {
                MatchState::Idle => 0,
                MatchState::OneOpen(_) => 1,
                MatchState::Resolving { .. } => 2,
            };
            prop_assert_eq!(open_unmatched(&round), expected_open);

            let tallies: u32 = round.turns().tallies().iter().map(|(_, &t)| t).sum();
            prop_assert_eq!(tallies as usize, matched);

            if round.is_over() {
                prop_assert_eq!(matched, round.total_pairs());
            }
        }
    }

    /// A reshuffle moves only closed cards, moves at least one of them, and
    /// keeps the slot map consistent.
    #[test]
    fn prop_reshuffle_preserves_board(
        seed in any::<u64>(),
        matched_pairs in prop::collection::vec(any::<bool>(), 8),
        open_card in prop::option::of(0u32..16),
    ) {
        let identities: Vec<Identity> = (0..8).map(Identity::new).collect();
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::build(&identities, 4, 4, &mut rng).unwrap();

        for (pair, &matched) in matched_pairs.iter().enumerate() {
            if matched {
                let first = CardId::new(pair as u32 * 2);
                deck.record_match(first, CardId::new(pair as u32 * 2 + 1));
            }
        }
        if let Some(id) = open_card {
            if let Some(card) = deck.card_mut(CardId::new(id)) {
                card.open();
            }
        }

        let before = deck.cards().to_vec();
        let closed = deck.closed_count();
        let moved = deck.reshuffle(&mut rng);

        for (old, new) in before.iter().zip(deck.cards()) {
            prop_assert_eq!(old.identity, new.identity);
            prop_assert_eq!(old.face, new.face);
            prop_assert_eq!(old.matched, new.matched);
            if !old.is_closed() {
                prop_assert_eq!(old.position, new.position);
            }
            prop_assert_eq!(deck.card_at(new.position), Some(new.id));
        }

        if closed >= 2 {
            prop_assert!(!moved.is_empty());
        } else {
            prop_assert!(moved.is_empty());
        }
        for m in &moved {
            prop_assert_ne!(m.from, m.to);
            prop_assert_eq!(deck.card(m.card).map(|c| c.position), Some(m.to));
        }
    }
}
