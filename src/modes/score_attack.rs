//! Score attack: points per match, with a streak bonus in two-player play.
//!
//! Each match is worth `BASE_POINTS * combo`. In a two-player round the
//! combo grows by one with every consecutive match and drops back to one
//! when a mismatch passes the turn. A single player always scores at a
//! combo of one. The round ends early once anyone reaches the goal.

use log::info;

use super::{ModeAction, ModeActions, ModeContext};
use crate::core::player::{PlayerId, PlayerMap};
use crate::rules::{EndReason, GameResult, RoundOutcome};

/// Points for a match at combo 1.
pub const BASE_POINTS: i64 = 10;

/// Scores and streak state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreAttack {
    goal: Option<i64>,
    scores: PlayerMap<i64>,
    combo: i64,
    two_player: bool,
}

impl ScoreAttack {
    #[must_use]
    pub fn new(goal: Option<i64>, player_count: usize) -> Self {
        Self {
            goal,
            scores: PlayerMap::with_default(player_count),
            combo: 1,
            two_player: player_count == 2,
        }
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> i64 {
        self.scores[player]
    }

    /// Multiplier for the next match.
    #[must_use]
    pub fn combo(&self) -> i64 {
        self.combo
    }

    #[must_use]
    pub fn goal(&self) -> Option<i64> {
        self.goal
    }

    pub(super) fn on_start(&self) -> ModeActions {
        self.scores
            .iter()
            .map(|(player, &score)| ModeAction::UpdateScore(player, score))
            .collect()
    }

    /// Award points for a match and report the points given.
    pub(super) fn award(&mut self, player: PlayerId) -> i64 {
        let points = BASE_POINTS * self.combo;
        self.scores[player] += points;
        // TODO: confirm with product whether solo play should keep a streak bonus.
        self.combo = if self.two_player { self.combo + 1 } else { 1 };
        points
    }

    pub(super) fn on_match(&mut self, player: PlayerId) -> ModeActions {
        let points = self.award(player);
        let score = self.scores[player];
        info!("{} scores {} (total {})", player, points, score);

        let mut actions = ModeActions::new();
        actions.push(ModeAction::UpdateScore(player, score));
        if self.goal.is_some_and(|goal| score >= goal) {
            actions.push(ModeAction::EndRound(EndReason::ScoreGoal));
        }
        actions
    }

    pub(super) fn on_turn_switch(&mut self) {
        self.combo = 1;
    }

    pub(super) fn on_round_over(&self, ctx: &ModeContext, reason: EndReason) -> RoundOutcome {
        if ctx.turns.is_two_player() {
            let first = self.scores[PlayerId::FIRST];
            let second = self.scores[PlayerId::SECOND];
            let result = GameResult::higher_wins(first, second);
            let headline = match result {
                GameResult::Winner(player) => format!("{} wins!", player),
                _ => "Draw!".to_string(),
            };
            return RoundOutcome {
                result,
                reason,
                text: format!("{} {} - {}", headline, first, second),
            };
        }

        RoundOutcome {
            result: GameResult::Solo { cleared: true },
            reason,
            text: format!("Score: {}", self.scores[PlayerId::FIRST]),
        }
    }

    pub(super) fn reset(&mut self) {
        self.scores.reset();
        self.combo = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TurnCoordinator;

    #[test]
    fn test_two_player_streak_then_reset() {
        let mut s = ScoreAttack::new(None, 2);

        let awarded: Vec<_> = (0..3).map(|_| s.award(PlayerId::FIRST)).collect();
        assert_eq!(awarded, vec![10, 20, 30]);
        assert_eq!(s.combo(), 4);

        s.on_turn_switch();
        assert_eq!(s.combo(), 1);
        assert_eq!(s.award(PlayerId::SECOND), 10);
        assert_eq!(s.score(PlayerId::FIRST), 60);
        assert_eq!(s.score(PlayerId::SECOND), 10);
    }

    #[test]
    fn test_single_player_no_streak() {
        let mut s = ScoreAttack::new(None, 1);
        let awarded: Vec<_> = (0..3).map(|_| s.award(PlayerId::FIRST)).collect();
        assert_eq!(awarded, vec![10, 10, 10]);
        assert_eq!(s.combo(), 1);
    }

    #[test]
    fn test_goal_ends_round() {
        let mut s = ScoreAttack::new(Some(30), 2);

        let first = s.on_match(PlayerId::FIRST);
        assert_eq!(first.as_slice(), &[ModeAction::UpdateScore(PlayerId::FIRST, 10)]);

        let second = s.on_match(PlayerId::FIRST);
        assert_eq!(
            second.as_slice(),
            &[
                ModeAction::UpdateScore(PlayerId::FIRST, 30),
                ModeAction::EndRound(EndReason::ScoreGoal),
            ]
        );
    }

    #[test]
    fn test_outcome_text() {
        let turns = TurnCoordinator::new(2);
        let ctx = ModeContext {
            now: 0,
            turns: &turns,
            matched_pairs: 2,
            total_pairs: 2,
        };
        let mut s = ScoreAttack::new(None, 2);
        s.award(PlayerId::SECOND);

        let outcome = s.on_round_over(&ctx, EndReason::BoardCleared);
        assert_eq!(outcome.result, GameResult::Winner(PlayerId::SECOND));
        assert_eq!(outcome.text, "Player 2 wins! 0 - 10");
    }

    #[test]
    fn test_start_shows_zero_scores() {
        let s = ScoreAttack::new(None, 2);
        assert_eq!(
            s.on_start().as_slice(),
            &[
                ModeAction::UpdateScore(PlayerId::FIRST, 0),
                ModeAction::UpdateScore(PlayerId::SECOND, 0),
            ]
        );
    }

    #[test]
    fn test_reset() {
        let mut s = ScoreAttack::new(Some(50), 2);
        s.award(PlayerId::FIRST);
        s.award(PlayerId::FIRST);
        s.reset();
        assert_eq!(s, ScoreAttack::new(Some(50), 2));
    }
}
