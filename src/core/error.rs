//! Error and rejection types.
//!
//! Only round construction can fail. Once a round is running, bad input is
//! rejected silently: the caller gets a [`Rejection`] describing why, the
//! board is unchanged, and nothing is shown to the player.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Identity;

/// Round construction failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The grid cannot hold exactly two cards per identity.
    #[error("layout mismatch: {identities} identities need {} slots, grid is {columns}x{rows}", .identities * 2)]
    LayoutMismatch {
        identities: usize,
        columns: usize,
        rows: usize,
    },

    /// The same identity was listed twice.
    #[error("identity {0} listed more than once")]
    DuplicateIdentity(Identity),

    /// Only one or two local players are supported.
    #[error("player count must be 1 or 2, got {0}")]
    InvalidPlayerCount(u8),

    /// A time attack round needs a positive duration.
    #[error("time attack duration must be positive")]
    InvalidDuration,

    /// A time attack round needs a positive tick interval.
    #[error("time attack tick interval must be positive")]
    InvalidTiming,

    /// A score goal of zero would end the round before it starts.
    #[error("score goal must be positive")]
    InvalidScoreGoal,

    /// The session was exited; there is no round to restart.
    #[error("session already closed")]
    SessionClosed,
}

/// Why an activation was ignored.
///
/// Rejections are not errors: they are logged at debug level and otherwise
/// dropped. Rejected input is never queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The card is already face up.
    AlreadyOpen,
    /// A mismatch is still being resolved.
    InputLocked,
    /// No card with that id exists in this round.
    UnknownCard,
    /// The round has ended.
    RoundOver,
    /// A reshuffle decision is pending.
    ReshufflePending,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::AlreadyOpen => "card already open",
            Rejection::InputLocked => "input locked",
            Rejection::UnknownCard => "unknown card",
            Rejection::RoundOver => "round over",
            Rejection::ReshufflePending => "reshuffle pending",
        };
        f.write_str(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mismatch_message() {
        let err = RoundError::LayoutMismatch {
            identities: 3,
            columns: 2,
            rows: 2,
        };
        assert_eq!(
            err.to_string(),
            "layout mismatch: 3 identities need 6 slots, grid is 2x2"
        );
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(Rejection::InputLocked.to_string(), "input locked");
        assert_eq!(Rejection::UnknownCard.to_string(), "unknown card");
    }
}
