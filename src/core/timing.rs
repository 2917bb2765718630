//! Logical time and the round's fixed delays.
//!
//! The core never reads a wall clock. Time is a count of logical
//! milliseconds advanced by the embedding application.

use serde::{Deserialize, Serialize};

/// Logical milliseconds.
pub type Millis = u64;

/// Default time attack countdown.
pub const DEFAULT_TIME_ATTACK_MS: Millis = 30_000;

/// Fixed delays and intervals used by a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long a mismatched pair stays face up before closing.
    pub mismatch_close_ms: Millis,
    /// Countdown tick interval for time attack.
    pub tick_ms: Millis,
    /// Delay between the shuffle threshold being hit and the reshuffle.
    pub reshuffle_delay_ms: Millis,
    /// Beat between the reshuffle decision and the counter reset.
    pub reshuffle_reset_ms: Millis,
    /// Delay before the round-over dialog is shown.
    pub round_over_dialog_ms: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            mismatch_close_ms: 1_000,
            tick_ms: 100,
            reshuffle_delay_ms: 250 + 1_000,
            reshuffle_reset_ms: 250,
            round_over_dialog_ms: 1_500,
        }
    }
}

/// Format milliseconds as seconds with one decimal, e.g. `12.3`.
///
/// ```
/// use rust_pairs::core::format_seconds;
///
/// assert_eq!(format_seconds(12_345), "12.3");
/// assert_eq!(format_seconds(0), "0.0");
/// ```
#[must_use]
pub fn format_seconds(ms: Millis) -> String {
    format!("{}.{}", ms / 1_000, (ms % 1_000) / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let t = Timings::default();
        assert_eq!(t.mismatch_close_ms, 1_000);
        assert_eq!(t.tick_ms, 100);
        assert_eq!(t.reshuffle_delay_ms, 1_250);
        assert_eq!(t.round_over_dialog_ms, 1_500);
    }

    #[test]
    fn test_format_seconds_truncates() {
        assert_eq!(format_seconds(30_000), "30.0");
        assert_eq!(format_seconds(29_999), "29.9");
        assert_eq!(format_seconds(100), "0.1");
    }

    #[test]
    fn test_timings_partial_json() {
        let t: Timings = serde_json::from_str(r#"{"tick_ms": 50}"#).unwrap();
        assert_eq!(t.tick_ms, 50);
        assert_eq!(t.mismatch_close_ms, 1_000);
    }
}
