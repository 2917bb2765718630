//! Round configuration.
//!
//! The surrounding application supplies one `RoundConfig` when a round
//! starts. It names the card identities, the grid, the game mode and the
//! number of local players. Invalid combinations are rejected by
//! [`RoundConfig::validate`] before any state is created.

use serde::{Deserialize, Serialize};

use super::error::RoundError;
use super::player::MAX_PLAYERS;
use super::timing::{Millis, Timings, DEFAULT_TIME_ATTACK_MS};
use crate::cards::Identity;

/// Game mode selected from the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Plain matching, round ends when the board is cleared.
    #[default]
    Quick,
    /// Countdown race against the clock.
    Time,
    /// Points per match with a streak multiplier.
    Score,
    /// Closed cards are reshuffled every few activations.
    Shuffle,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameMode::Quick => "Quick",
            GameMode::Time => "Time Attack",
            GameMode::Score => "Score Attack",
            GameMode::Shuffle => "Shuffle",
        };
        f.write_str(name)
    }
}

/// Configuration for a single round.
///
/// ```
/// use rust_pairs::core::{GameMode, RoundConfig};
///
/// let config = RoundConfig::new(4, 2)
///     .with_identity_count(4)
///     .with_mode(GameMode::Score)
///     .with_players(2)
///     .with_score_goal(50);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.pair_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Distinct identity values; each becomes one pair of cards.
    pub identities: Vec<Identity>,

    /// Grid width.
    pub columns: usize,

    /// Grid height.
    pub rows: usize,

    /// Selected game mode.
    #[serde(default)]
    pub mode: GameMode,

    /// Number of local players (1 or 2).
    #[serde(default = "default_player_count")]
    pub player_count: u8,

    /// Countdown length for time attack. Defaults to 30 seconds.
    #[serde(default)]
    pub time_attack_duration_ms: Option<Millis>,

    /// Score that ends a score attack round early. `None` means no goal.
    #[serde(default)]
    pub score_goal: Option<i64>,

    /// Delays and intervals.
    #[serde(default)]
    pub timings: Timings,
}

fn default_player_count() -> u8 {
    1
}

impl RoundConfig {
    /// Create a configuration for a `columns` x `rows` grid with no identities.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            identities: Vec::new(),
            columns,
            rows,
            mode: GameMode::default(),
            player_count: default_player_count(),
            time_attack_duration_ms: None,
            score_goal: None,
            timings: Timings::default(),
        }
    }

    /// Use identities `0..count`.
    #[must_use]
    pub fn with_identity_count(mut self, count: usize) -> Self {
        self.identities = (0..count as u32).map(Identity::new).collect();
        self
    }

    /// Use explicit identity values.
    #[must_use]
    pub fn with_identities(mut self, identities: impl IntoIterator<Item = Identity>) -> Self {
        self.identities = identities.into_iter().collect();
        self
    }

    /// Set the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of local players.
    #[must_use]
    pub fn with_players(mut self, count: u8) -> Self {
        self.player_count = count;
        self
    }

    /// Set the time attack countdown.
    #[must_use]
    pub fn with_time_limit(mut self, ms: Millis) -> Self {
        self.time_attack_duration_ms = Some(ms);
        self
    }

    /// Set the score attack goal.
    #[must_use]
    pub fn with_score_goal(mut self, goal: i64) -> Self {
        self.score_goal = Some(goal);
        self
    }

    /// Override the fixed delays.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.identities.len()
    }

    /// Number of players as a count.
    #[must_use]
    pub fn players(&self) -> usize {
        self.player_count as usize
    }

    /// Countdown length, falling back to the default.
    #[must_use]
    pub fn time_limit(&self) -> Millis {
        self.time_attack_duration_ms.unwrap_or(DEFAULT_TIME_ATTACK_MS)
    }

    /// Check the configuration before building a round.
    pub fn validate(&self) -> Result<(), RoundError> {
        let slots = self.columns.checked_mul(self.rows);
        if slots.is_none() || self.identities.len().checked_mul(2) != slots {
            return Err(RoundError::LayoutMismatch {
                identities: self.identities.len(),
                columns: self.columns,
                rows: self.rows,
            });
        }

        let mut seen = rustc_hash::FxHashSet::default();
        if let Some(dup) = self.identities.iter().find(|id| !seen.insert(**id)) {
            return Err(RoundError::DuplicateIdentity(*dup));
        }

        if self.player_count == 0 || self.players() > MAX_PLAYERS {
            return Err(RoundError::InvalidPlayerCount(self.player_count));
        }

        if self.mode == GameMode::Time && self.time_limit() == 0 {
            return Err(RoundError::InvalidDuration);
        }

        if self.mode == GameMode::Time && self.timings.tick_ms == 0 {
            return Err(RoundError::InvalidTiming);
        }

        if self.mode == GameMode::Score && matches!(self.score_goal, Some(goal) if goal <= 0) {
            return Err(RoundError::InvalidScoreGoal);
        }

        Ok(())
    }
}
