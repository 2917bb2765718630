//! Player identification and per-player tallies.
//!
//! ## PlayerId
//!
//! A round is played by one player, or by two players sharing one device.
//! `PlayerId` is 0-based internally and displayed 1-based ("Player 1").
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec` and indexed by `PlayerId`.
//! Used for match tallies, scores and elapsed times.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Maximum number of local players in a round.
pub const MAX_PLAYERS: usize = 2;

/// Player identifier for a local round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who acts first.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The second player in a two-player round.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based number shown to players.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// The player who acts after this one.
    ///
    /// With a single player the turn never leaves them.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        if player_count <= 1 {
            self
        } else {
            PlayerId(((self.index() + 1) % player_count) as u8)
        }
    }

    /// Iterate over all player IDs for a round with `player_count` players.
    ///
    /// ```
    /// use rust_pairs::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// One value per player.
///
/// ```
/// use rust_pairs::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<i64> = PlayerMap::with_default(2);
/// scores[PlayerId::SECOND] += 10;
/// assert_eq!(scores[PlayerId::FIRST], 0);
/// assert_eq!(scores[PlayerId::SECOND], 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per player from `init`.
    ///
    /// Panics unless `player_count` is 1 or 2; configurations are validated
    /// before any map is built.
    pub fn new(player_count: usize, init: impl Fn(PlayerId) -> T) -> Self {
        assert!(
            (1..=MAX_PLAYERS).contains(&player_count),
            "At most 2 players supported"
        );
        Self {
            data: PlayerId::all(player_count).map(init).collect(),
        }
    }

    /// Every entry starts at `T::default()`.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Reset every entry to its default.
    pub fn reset(&mut self)
    where
        T: Default,
    {
        self.data.iter_mut().for_each(|v| *v = T::default());
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_display_is_one_based() {
        assert_eq!(format!("{}", PlayerId::FIRST), "Player 1");
        assert_eq!(format!("{}", PlayerId::SECOND), "Player 2");
        assert_eq!(PlayerId::SECOND.number(), 2);
    }

    #[test]
    fn test_next_toggles_between_two_players() {
        assert_eq!(PlayerId::FIRST.next(2), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.next(2), PlayerId::FIRST);
    }

    #[test]
    fn test_next_single_player_stays() {
        assert_eq!(PlayerId::FIRST.next(1), PlayerId::FIRST);
    }

    #[test]
    fn test_player_map_reset() {
        let mut map: PlayerMap<u32> = PlayerMap::new(2, |p| p.index() as u32 + 5);
        assert_eq!(map[PlayerId::SECOND], 6);

        map.reset();
        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 0);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &0), (PlayerId::SECOND, &1)]);
        assert_eq!(map.player_count(), 2);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "At most 2 players supported")]
    fn test_player_map_too_many_players() {
        let _: PlayerMap<i32> = PlayerMap::with_default(3);
    }
}
