//! Game modes.
//!
//! A round has exactly one [`ModeManager`], chosen from the configured
//! [`GameMode`]. The round calls into it at fixed points (round start,
//! every accepted activation, matches, turn switches, timer ticks and
//! round over) and carries out the [`ModeAction`]s it returns. Modes never
//! touch the deck, the scheduler or the presenter directly.
//!
//! - [`QuickPlay`]: no extra rules
//! - [`TimeAttack`]: lazy-start countdown, time expiry ends the round
//! - [`ScoreAttack`]: points with a two-player streak multiplier
//! - [`ShuffleCount`]: periodic reshuffle of closed cards

mod score_attack;
mod shuffle_count;
mod time_attack;

pub use score_attack::{ScoreAttack, BASE_POINTS};
pub use shuffle_count::{ShuffleCount, RESHUFFLE_THRESHOLD};
pub use time_attack::TimeAttack;

use smallvec::SmallVec;

use crate::core::config::{GameMode, RoundConfig};
use crate::core::player::PlayerId;
use crate::core::timing::Millis;
use crate::rules::{EndReason, GameResult, RoundOutcome, TurnCoordinator};

/// Something a mode asks the round to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeAction {
    /// Arm the periodic countdown tick.
    StartTicker,
    /// Cancel the countdown tick.
    StopTicker,
    /// Schedule the reshuffle decision.
    ScheduleReshuffle,
    /// Show a player's score.
    UpdateScore(PlayerId, i64),
    /// Show the timer text.
    UpdateTimer(String),
    /// End the round now.
    EndRound(EndReason),
}

/// Actions returned from a single hook; rarely more than three.
pub type ModeActions = SmallVec<[ModeAction; 4]>;

/// Read-only view of the round passed to every hook.
#[derive(Clone, Copy, Debug)]
pub struct ModeContext<'a> {
    pub now: Millis,
    pub turns: &'a TurnCoordinator,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

/// Plain matching with no extra rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuickPlay;

impl QuickPlay {
    fn on_round_over(&self, ctx: &ModeContext, reason: EndReason) -> RoundOutcome {
        if ctx.turns.is_two_player() {
            return tally_outcome(ctx, reason);
        }
        RoundOutcome {
            result: GameResult::Solo { cleared: true },
            reason,
            text: "Clear!".to_string(),
        }
    }
}

/// Two-player outcome decided by pairs found.
fn tally_outcome(ctx: &ModeContext, reason: EndReason) -> RoundOutcome {
    let first = i64::from(ctx.turns.tally(PlayerId::FIRST));
    let second = i64::from(ctx.turns.tally(PlayerId::SECOND));
    let result = GameResult::higher_wins(first, second);
    let headline = match result {
        GameResult::Winner(player) => format!("{} wins!", player),
        _ => "Draw!".to_string(),
    };
    RoundOutcome {
        result,
        reason,
        text: format!("{} {} - {}", headline, first, second),
    }
}

/// Pair counts for every player.
fn tally_actions(ctx: &ModeContext) -> ModeActions {
    ctx.turns
        .tallies()
        .iter()
        .map(|(player, &tally)| ModeAction::UpdateScore(player, i64::from(tally)))
        .collect()
}

/// The active mode of a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeManager {
    Quick(QuickPlay),
    TimeAttack(TimeAttack),
    ScoreAttack(ScoreAttack),
    ShuffleCount(ShuffleCount),
}

impl ModeManager {
    /// Build the manager for a configuration.
    #[must_use]
    pub fn for_config(config: &RoundConfig) -> Self {
        let players = config.players();
        match config.mode {
            GameMode::Quick => ModeManager::Quick(QuickPlay),
            GameMode::Time => ModeManager::TimeAttack(TimeAttack::new(config.time_limit(), players)),
            GameMode::Score => ModeManager::ScoreAttack(ScoreAttack::new(config.score_goal, players)),
            GameMode::Shuffle => ModeManager::ShuffleCount(ShuffleCount::default()),
        }
    }

    /// The mode tag.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        match self {
            ModeManager::Quick(_) => GameMode::Quick,
            ModeManager::TimeAttack(_) => GameMode::Time,
            ModeManager::ScoreAttack(_) => GameMode::Score,
            ModeManager::ShuffleCount(_) => GameMode::Shuffle,
        }
    }

    /// True while the mode refuses new activations.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        matches!(self, ModeManager::ShuffleCount(s) if s.decision_pending())
    }

    /// Initial displays.
    pub fn on_start(&self, ctx: &ModeContext) -> ModeActions {
        match self {
            ModeManager::ScoreAttack(s) => s.on_start(),
            ModeManager::TimeAttack(t) => {
                let mut actions = tally_actions(ctx);
                actions.extend(t.on_start());
                actions
            }
            ModeManager::Quick(_) | ModeManager::ShuffleCount(_) => tally_actions(ctx),
        }
    }

    /// Called for every accepted activation.
    pub fn on_activation(&mut self, ctx: &ModeContext) -> ModeActions {
        match self {
            ModeManager::TimeAttack(t) => t.on_activation(ctx),
            ModeManager::ShuffleCount(s) => s.on_activation(),
            ModeManager::Quick(_) | ModeManager::ScoreAttack(_) => ModeActions::new(),
        }
    }

    /// Called after `player` found a pair.
    pub fn on_match(&mut self, ctx: &ModeContext, player: PlayerId) -> ModeActions {
        match self {
            ModeManager::ScoreAttack(s) => s.on_match(player),
            _ => {
                let tally = i64::from(ctx.turns.tally(player));
                let mut actions = ModeActions::new();
                actions.push(ModeAction::UpdateScore(player, tally));
                actions
            }
        }
    }

    /// Called when a mismatch passes the turn away from `outgoing`.
    pub fn on_turn_switch(&mut self, ctx: &ModeContext, outgoing: PlayerId) {
        match self {
            ModeManager::TimeAttack(t) => t.on_turn_switch(ctx, outgoing),
            ModeManager::ScoreAttack(s) => s.on_turn_switch(),
            ModeManager::Quick(_) | ModeManager::ShuffleCount(_) => {}
        }
    }

    /// Called on every countdown tick.
    pub fn on_tick(&mut self, ctx: &ModeContext) -> ModeActions {
        match self {
            ModeManager::TimeAttack(t) => t.on_tick(ctx),
            _ => ModeActions::new(),
        }
    }

    /// Produce the round result.
    pub fn on_round_over(&mut self, ctx: &ModeContext, reason: EndReason) -> RoundOutcome {
        match self {
            ModeManager::Quick(q) => q.on_round_over(ctx, reason),
            ModeManager::TimeAttack(t) => t.on_round_over(ctx, reason),
            ModeManager::ScoreAttack(s) => s.on_round_over(ctx, reason),
            ModeManager::ShuffleCount(s) => s.on_round_over(ctx, reason),
        }
    }

    /// Return to the state of a freshly built round.
    pub fn reset(&mut self) {
        match self {
            ModeManager::Quick(_) => {}
            ModeManager::TimeAttack(t) => t.reset(),
            ModeManager::ScoreAttack(s) => s.reset(),
            ModeManager::ShuffleCount(s) => s.reset(),
        }
    }

    #[must_use]
    pub fn as_time_attack(&self) -> Option<&TimeAttack> {
        match self {
            ModeManager::TimeAttack(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_time_attack_mut(&mut self) -> Option<&mut TimeAttack> {
        match self {
            ModeManager::TimeAttack(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_score_attack(&self) -> Option<&ScoreAttack> {
        match self {
            ModeManager::ScoreAttack(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_shuffle_count(&self) -> Option<&ShuffleCount> {
        match self {
            ModeManager::ShuffleCount(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shuffle_count_mut(&mut self) -> Option<&mut ShuffleCount> {
        match self {
            ModeManager::ShuffleCount(s) => Some(s),
            _ => None,
        }
    }
}
