//! Time attack: clear the board before the countdown runs out.
//!
//! The countdown starts lazily on the first activation of the round, not
//! when the round is built. Every tick recomputes the remaining time from
//! the start reference, so pausing and resuming shifts that reference
//! instead of losing or gaining time.
//!
//! In a two-player round each player's active time is banked when their
//! turn ends; the player with less banked time wins.

use log::{info, warn};

use super::{ModeAction, ModeActions, ModeContext};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::timing::{format_seconds, Millis};
use crate::rules::{EndReason, GameResult, RoundOutcome};

/// Countdown state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeAttack {
    duration_ms: Millis,
    remaining_ms: Millis,
    running: bool,
    /// Start reference, shifted forward by each pause.
    started_at: Option<Millis>,
    paused_at: Option<Millis>,
    /// When the active player's current turn began (pause-adjusted).
    turn_started_at: Millis,
    /// Banked active time per player.
    elapsed: PlayerMap<Millis>,
    /// Total elapsed time when the round ended.
    final_elapsed: Option<Millis>,
}

impl TimeAttack {
    #[must_use]
    pub fn new(duration_ms: Millis, player_count: usize) -> Self {
        Self {
            duration_ms,
            remaining_ms: duration_ms,
            running: false,
            started_at: None,
            paused_at: None,
            turn_started_at: 0,
            elapsed: PlayerMap::with_default(player_count),
            final_elapsed: None,
        }
    }

    #[must_use]
    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }

    /// Time left as of the last tick.
    #[must_use]
    pub fn remaining_ms(&self) -> Millis {
        self.remaining_ms
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Banked active time for `player`.
    #[must_use]
    pub fn player_elapsed(&self, player: PlayerId) -> Millis {
        self.elapsed[player]
    }

    /// Total elapsed time when the round ended.
    #[must_use]
    pub fn final_elapsed(&self) -> Option<Millis> {
        self.final_elapsed
    }

    /// The clock as the countdown sees it: frozen while paused.
    fn effective_now(&self, now: Millis) -> Millis {
        self.paused_at.unwrap_or(now)
    }

    fn elapsed_at(&self, now: Millis) -> Millis {
        self.started_at
            .map_or(0, |start| self.effective_now(now).saturating_sub(start))
    }

    pub(super) fn on_start(&self) -> ModeActions {
        let mut actions = ModeActions::new();
        actions.push(ModeAction::UpdateTimer(format_seconds(self.duration_ms)));
        actions
    }

    pub(super) fn on_activation(&mut self, ctx: &ModeContext) -> ModeActions {
        let mut actions = ModeActions::new();
        if self.started_at.is_none() && self.final_elapsed.is_none() {
            self.started_at = Some(ctx.now);
            self.turn_started_at = ctx.now;
            self.running = true;
            info!("time attack countdown started at {}ms", ctx.now);
            actions.push(ModeAction::StartTicker);
        }
        actions
    }

    /// Bank the outgoing player's time.
    pub(super) fn on_turn_switch(&mut self, ctx: &ModeContext, outgoing: PlayerId) {
        if self.started_at.is_none() {
            return;
        }
        let now = self.effective_now(ctx.now);
        self.elapsed[outgoing] += now.saturating_sub(self.turn_started_at);
        self.turn_started_at = now;
    }

    pub(super) fn on_tick(&mut self, ctx: &ModeContext) -> ModeActions {
        let mut actions = ModeActions::new();
        if !self.running || self.is_paused() {
            return actions;
        }

        self.remaining_ms = self.duration_ms.saturating_sub(self.elapsed_at(ctx.now));
        actions.push(ModeAction::UpdateTimer(format_seconds(self.remaining_ms)));

        if self.remaining_ms == 0 {
            self.running = false;
            actions.push(ModeAction::StopTicker);
            actions.push(ModeAction::EndRound(EndReason::TimeExpired));
        }
        actions
    }

    /// Stop the ticker. Returns false if there was nothing to pause.
    pub fn pause(&mut self, now: Millis) -> bool {
        if !self.running || self.is_paused() {
            warn!("pause ignored: countdown not running");
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Restart the ticker, discounting the paused duration.
    ///
    /// Returns false if the countdown was not paused.
    pub fn resume(&mut self, now: Millis) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            warn!("resume ignored: countdown not paused");
            return false;
        };
        let shift = now.saturating_sub(paused_at);
        if let Some(start) = self.started_at.as_mut() {
            *start += shift;
        }
        self.turn_started_at += shift;
        true
    }

    pub(super) fn on_round_over(
        &mut self,
        ctx: &ModeContext,
        reason: EndReason,
    ) -> RoundOutcome {
        let active = ctx.turns.active();
        self.on_turn_switch(ctx, active);

        let total = self.elapsed_at(ctx.now).min(self.duration_ms);
        self.final_elapsed = Some(total);
        self.remaining_ms = self.duration_ms - total;
        self.running = false;
        self.paused_at = None;

        if ctx.turns.is_two_player() {
            let first = self.elapsed[PlayerId::FIRST];
            let second = self.elapsed[PlayerId::SECOND];
            let result = if first == 0 || second == 0 || first == second {
                GameResult::Draw
            } else if first < second {
                GameResult::Winner(PlayerId::FIRST)
            } else {
                GameResult::Winner(PlayerId::SECOND)
            };
            let headline = match result {
                GameResult::Winner(player) => format!("{} wins!", player),
                _ => "Draw!".to_string(),
            };
            let text = format!(
                "{} {}s vs {}s",
                headline,
                format_seconds(first),
                format_seconds(second)
            );
            return RoundOutcome { result, reason, text };
        }

        let cleared = reason == EndReason::BoardCleared;
        let text = if cleared {
            format!("Clear! {}s", format_seconds(total))
        } else {
            format!("Time up! {}/{} pairs", ctx.matched_pairs, ctx.total_pairs)
        };
        RoundOutcome {
            result: GameResult::Solo { cleared },
            reason,
            text,
        }
    }

    pub(super) fn reset(&mut self) {
        *self = Self::new(self.duration_ms, self.elapsed.player_count());
    }
}
