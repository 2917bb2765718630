//! Whose turn it is, and how many pairs each player has found.
//!
//! A match keeps the turn with the player who made it. A mismatch hands
//! the turn over. With one player the turn never changes.

use log::info;

use crate::core::player::{PlayerId, PlayerMap};

/// Turn order and match tallies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnCoordinator {
    player_count: usize,
    active: PlayerId,
    tallies: PlayerMap<u32>,
}

impl TurnCoordinator {
    /// Start with the first player active and empty tallies.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            active: PlayerId::FIRST,
            tallies: PlayerMap::with_default(player_count),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn is_two_player(&self) -> bool {
        self.player_count == 2
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// Pairs found by `player`.
    #[must_use]
    pub fn tally(&self, player: PlayerId) -> u32 {
        self.tallies[player]
    }

    #[must_use]
    pub fn tallies(&self) -> &PlayerMap<u32> {
        &self.tallies
    }

    /// Credit a match to the active player and return them.
    pub fn record_match(&mut self) -> PlayerId {
        self.tallies[self.active] += 1;
        self.active
    }

    /// Pass the turn to the other player and return the new active player.
    pub fn switch_turn(&mut self) -> PlayerId {
        let previous = self.active;
        self.active = self.active.next(self.player_count);
        if previous != self.active {
            info!("turn passes from {} to {}", previous, self.active);
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_toggles() {
        let mut turns = TurnCoordinator::new(2);
        assert_eq!(turns.active(), PlayerId::FIRST);
        assert_eq!(turns.switch_turn(), PlayerId::SECOND);
        assert_eq!(turns.switch_turn(), PlayerId::FIRST);
    }

    #[test]
    fn test_match_credits_active_player() {
        let mut turns = TurnCoordinator::new(2);
        turns.record_match();
        turns.switch_turn();
        turns.record_match();
        turns.record_match();

        assert_eq!(turns.tally(PlayerId::FIRST), 1);
        assert_eq!(turns.tally(PlayerId::SECOND), 2);
        assert_eq!(turns.active(), PlayerId::SECOND);
    }

    #[test]
    fn test_single_player_never_switches() {
        let mut turns = TurnCoordinator::new(1);
        assert!(!turns.is_two_player());
        assert_eq!(turns.switch_turn(), PlayerId::FIRST);
        assert_eq!(turns.record_match(), PlayerId::FIRST);
        assert_eq!(turns.tally(PlayerId::FIRST), 1);
    }
}
