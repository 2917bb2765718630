//! Shuffle mode: closed cards trade places every few activations.
//!
//! Every accepted activation counts as an attempt. When the count reaches
//! the threshold a reshuffle decision is scheduled. While it is pending the
//! round refuses activations. At decision time the board is reshuffled
//! only if no card is waiting for its partner and at least two cards are
//! face down. One beat later the counter returns to zero, whether or not
//! anything moved.

use log::info;

use super::{ModeAction, ModeActions, ModeContext};
use crate::rules::{EndReason, GameResult, RoundOutcome};

/// Attempts between reshuffles.
pub const RESHUFFLE_THRESHOLD: u32 = 4;

/// Attempt counter and reshuffle bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleCount {
    attempts_since_reshuffle: u32,
    threshold: u32,
    decision_pending: bool,
    reshuffles: u32,
    total_attempts: u32,
}

impl Default for ShuffleCount {
    fn default() -> Self {
        Self::new(RESHUFFLE_THRESHOLD)
    }
}

impl ShuffleCount {
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            attempts_since_reshuffle: 0,
            threshold,
            decision_pending: false,
            reshuffles: 0,
            total_attempts: 0,
        }
    }

    #[must_use]
    pub fn attempts_since_reshuffle(&self) -> u32 {
        self.attempts_since_reshuffle
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// True between hitting the threshold and the counter reset.
    #[must_use]
    pub fn decision_pending(&self) -> bool {
        self.decision_pending
    }

    /// Reshuffles actually performed this round.
    #[must_use]
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub(super) fn on_activation(&mut self) -> ModeActions {
        self.attempts_since_reshuffle += 1;
        self.total_attempts += 1;

        let mut actions = ModeActions::new();
        if self.attempts_since_reshuffle >= self.threshold && !self.decision_pending {
            self.decision_pending = true;
            actions.push(ModeAction::ScheduleReshuffle);
        }
        actions
    }

    /// Decide whether the pending reshuffle goes ahead.
    pub fn decide(&mut self, idle: bool, closed_cards: usize) -> bool {
        let go = idle && closed_cards >= 2;
        if go {
            self.reshuffles += 1;
            info!("reshuffling {} closed cards", closed_cards);
        } else {
            info!(
                "reshuffle skipped (idle: {}, closed cards: {})",
                idle, closed_cards
            );
        }
        go
    }

    /// Clear the attempt counter after a decision.
    pub fn reset_counter(&mut self) {
        self.attempts_since_reshuffle = 0;
        self.decision_pending = false;
    }

    pub(super) fn on_round_over(&self, ctx: &ModeContext, reason: EndReason) -> RoundOutcome {
        if ctx.turns.is_two_player() {
            return super::tally_outcome(ctx, reason);
        }
        RoundOutcome {
            result: GameResult::Solo { cleared: true },
            reason,
            text: format!(
                "Clear! {} attempts, {} reshuffles",
                self.total_attempts, self.reshuffles
            ),
        }
    }

    pub(super) fn reset(&mut self) {
        *self = Self::new(self.threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_schedules_once() {
        let mut s = ShuffleCount::default();
        for _ in 0..3 {
            assert!(s.on_activation().is_empty());
        }
        assert_eq!(s.on_activation().as_slice(), &[ModeAction::ScheduleReshuffle]);
        assert!(s.decision_pending());

        assert!(s.on_activation().is_empty());
        assert_eq!(s.attempts_since_reshuffle(), 5);
    }

    #[test]
    fn test_decide_requires_idle_and_two_closed() {
        let mut s = ShuffleCount::default();
        assert!(s.decide(true, 2));
        assert!(!s.decide(false, 6));
        assert!(!s.decide(true, 1));
        assert!(!s.decide(true, 0));
        assert_eq!(s.reshuffles(), 1);
    }

    #[test]
    fn test_reset_counter() {
        let mut s = ShuffleCount::default();
        for _ in 0..4 {
            s.on_activation();
        }
        s.reset_counter();
        assert_eq!(s.attempts_since_reshuffle(), 0);
        assert!(!s.decision_pending());
    }

    #[test]
    fn test_reset_keeps_threshold() {
        let mut s = ShuffleCount::new(6);
        s.on_activation();
        s.decide(true, 4);
        s.reset();
        assert_eq!(s, ShuffleCount::new(6));
    }
}
