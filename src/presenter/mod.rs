//! The boundary between the game core and whatever draws it.
//!
//! The core tells a [`Presenter`] what should be on screen. It never
//! reads anything back. Animation, tweening, text effects and layout are
//! all the presenter's concern.
//!
//! Two implementations ship with the crate:
//!
//! - [`RecordingPresenter`] keeps every command, for tests and replays
//! - [`NullPresenter`] discards everything, for headless simulation

use serde::{Deserialize, Serialize};

use crate::cards::{CardFace, CardId, GridPos};
use crate::core::player::PlayerId;

/// How a card should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardVisual {
    Open,
    Closed,
}

impl From<CardFace> for CardVisual {
    fn from(face: CardFace) -> Self {
        match face {
            CardFace::Open => CardVisual::Open,
            CardFace::Closed => CardVisual::Closed,
        }
    }
}

/// Visual intents issued by a round.
///
/// Every method is a command. Implementations may animate the change
/// however they like; the core has already moved on.
pub trait Presenter {
    /// Show a card face up or face down.
    fn set_card_visual(&mut self, card: CardId, visual: CardVisual);

    /// Move a card to a grid slot (initial layout and reshuffles).
    fn set_card_position(&mut self, card: CardId, position: GridPos);

    /// Show a player's score or pair count.
    fn update_score_display(&mut self, player: PlayerId, value: i64);

    /// Show the timer text.
    fn update_timer_display(&mut self, text: &str);

    /// Show the round-over dialog.
    fn show_round_over_dialog(&mut self, text: &str);

    /// Cosmetic cue played just before a reshuffle.
    fn shake_board(&mut self);

    /// Highlight the player whose turn it is. Ignored by default.
    fn update_turn_display(&mut self, _player: PlayerId) {}
}

/// A recorded presenter call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenterCommand {
    SetCardVisual(CardId, CardVisual),
    SetCardPosition(CardId, GridPos),
    UpdateScore(PlayerId, i64),
    UpdateTimer(String),
    ShowRoundOver(String),
    ShakeBoard,
    UpdateTurn(PlayerId),
}

/// Presenter that records every command in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    commands: Vec<PresenterCommand>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands received so far.
    #[must_use]
    pub fn commands(&self) -> &[PresenterCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<PresenterCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded commands matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&PresenterCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// The last round-over dialog text, if one was shown.
    #[must_use]
    pub fn round_over_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            PresenterCommand::ShowRoundOver(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// The last timer text shown.
    #[must_use]
    pub fn timer_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            PresenterCommand::UpdateTimer(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// The last value shown for `player`'s score.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<i64> {
        self.commands.iter().rev().find_map(|c| match c {
            PresenterCommand::UpdateScore(p, value) if *p == player => Some(*value),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn set_card_visual(&mut self, card: CardId, visual: CardVisual) {
        self.commands.push(PresenterCommand::SetCardVisual(card, visual));
    }

    fn set_card_position(&mut self, card: CardId, position: GridPos) {
        self.commands.push(PresenterCommand::SetCardPosition(card, position));
    }

    fn update_score_display(&mut self, player: PlayerId, value: i64) {
        self.commands.push(PresenterCommand::UpdateScore(player, value));
    }

    fn update_timer_display(&mut self, text: &str) {
        self.commands.push(PresenterCommand::UpdateTimer(text.to_string()));
    }

    fn show_round_over_dialog(&mut self, text: &str) {
        self.commands.push(PresenterCommand::ShowRoundOver(text.to_string()));
    }

    fn shake_board(&mut self) {
        self.commands.push(PresenterCommand::ShakeBoard);
    }

    fn update_turn_display(&mut self, player: PlayerId) {
        self.commands.push(PresenterCommand::UpdateTurn(player));
    }
}

/// Presenter that ignores every command.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn set_card_visual(&mut self, _card: CardId, _visual: CardVisual) {}
    fn set_card_position(&mut self, _card: CardId, _position: GridPos) {}
    fn update_score_display(&mut self, _player: PlayerId, _value: i64) {}
    fn update_timer_display(&mut self, _text: &str) {}
    fn show_round_over_dialog(&mut self, _text: &str) {}
    fn shake_board(&mut self) {}
}
