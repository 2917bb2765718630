//! Round results.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// Result of a completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner of a two-player round.
    Winner(PlayerId),
    /// Two-player round with no winner.
    Draw,
    /// One-player round; `cleared` is false if time ran out first.
    Solo { cleared: bool },
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Solo { cleared } => *cleared && player == PlayerId::FIRST,
            GameResult::Draw => false,
        }
    }

    /// Compare two players' values; the larger wins, equal values draw.
    #[must_use]
    pub fn higher_wins(first: i64, second: i64) -> Self {
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::FIRST),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::SECOND),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

/// Why the round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every pair was found.
    BoardCleared,
    /// The time attack countdown reached zero.
    TimeExpired,
    /// A player reached the score attack goal.
    ScoreGoal,
}

/// Everything the round-over dialog needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub result: GameResult,
    pub reason: EndReason,
    /// Text for the round-over dialog.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winner() {
        let result = GameResult::Winner(PlayerId::SECOND);
        assert!(!result.is_winner(PlayerId::FIRST));
        assert!(result.is_winner(PlayerId::SECOND));

        assert!(!GameResult::Draw.is_winner(PlayerId::FIRST));
        assert!(GameResult::Solo { cleared: true }.is_winner(PlayerId::FIRST));
        assert!(!GameResult::Solo { cleared: false }.is_winner(PlayerId::FIRST));
    }

    #[test]
    fn test_higher_wins() {
        assert_eq!(GameResult::higher_wins(3, 1), GameResult::Winner(PlayerId::FIRST));
        assert_eq!(GameResult::higher_wins(1, 3), GameResult::Winner(PlayerId::SECOND));
        assert_eq!(GameResult::higher_wins(2, 2), GameResult::Draw);
    }
}
