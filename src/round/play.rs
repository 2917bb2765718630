//! One playthrough, from deck creation to round over.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Deck};
use crate::core::config::RoundConfig;
use crate::core::error::{Rejection, RoundError};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::timing::Millis;
use crate::modes::{ModeAction, ModeActions, ModeContext, ModeManager};
use crate::presenter::{CardVisual, Presenter};
use crate::rules::{EndReason, MatchCoordinator, MatchEvent, MatchState, RoundOutcome, TurnCoordinator};
use crate::schedule::{Scheduler, TimerId};

/// Deferred work owned by a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundTask {
    /// Close the mismatched pair and unlock input.
    CloseMismatch,
    /// Time attack countdown tick.
    Tick,
    /// Decide whether to reshuffle the closed cards.
    ReshuffleDecision,
    /// Clear the shuffle attempt counter.
    ResetShuffleCounter,
    /// Show the round-over dialog.
    ShowRoundOver,
}

/// Result of an activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Accepted(MatchEvent),
    Rejected(Rejection),
}

impl Activation {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Activation::Accepted(_))
    }
}

fn mode_context<'a>(now: Millis, turns: &'a TurnCoordinator, deck: &Deck) -> ModeContext<'a> {
    ModeContext {
        now,
        turns,
        matched_pairs: deck.matched_pairs(),
        total_pairs: deck.total_pairs(),
    }
}

/// A single round: the board, the rules, the mode and its pending tasks.
///
/// All state changes happen synchronously inside [`Round::activate`] and
/// [`Round::advance`]. Delays are tasks in the round's scheduler, and time
/// only moves when the caller advances it.
///
/// ```
/// use rust_pairs::cards::CardId;
/// use rust_pairs::core::RoundConfig;
/// use rust_pairs::presenter::RecordingPresenter;
/// use rust_pairs::round::Round;
///
/// let config = RoundConfig::new(2, 2).with_identity_count(2);
/// let mut round = Round::new(config, 42).unwrap();
/// let mut presenter = RecordingPresenter::new();
/// round.present(&mut presenter);
///
/// // Cards 2n and 2n+1 share an identity.
/// for id in 0..4 {
///     round.activate(CardId::new(id), &mut presenter);
/// }
/// round.advance(1_500, &mut presenter);
///
/// assert!(round.is_over());
/// assert_eq!(presenter.round_over_text(), Some("Clear!"));
/// ```
#[derive(Clone, Debug)]
pub struct Round {
    config: RoundConfig,
    deck: Deck,
    matcher: MatchCoordinator,
    turns: TurnCoordinator,
    mode: ModeManager,
    scheduler: Scheduler<RoundTask>,
    /// Stream used for reshuffles.
    rng: GameRng,
    now: Millis,
    ticker: Option<TimerId>,
    outcome: Option<RoundOutcome>,
    torn_down: bool,
}

impl Round {
    /// Build a round from a seed.
    pub fn new(config: RoundConfig, seed: u64) -> Result<Self, RoundError> {
        Self::with_rng(config, &GameRng::new(seed))
    }

    /// Build a round drawing its layout and reshuffles from `rng`.
    ///
    /// Fails without creating any state if the configuration is invalid.
    pub fn with_rng(config: RoundConfig, rng: &GameRng) -> Result<Self, RoundError> {
        if let Err(err) = config.validate() {
            warn!("round not started: {}", err);
            return Err(err);
        }

        let mut layout = rng.for_context("layout");
        let deck = Deck::build(&config.identities, config.columns, config.rows, &mut layout)?;
        let turns = TurnCoordinator::new(config.players());
        let mode = ModeManager::for_config(&config);

        info!(
            "round started: {} mode, {} player(s), {} pairs on {}x{}",
            config.mode,
            config.player_count,
            deck.total_pairs(),
            config.columns,
            config.rows
        );

        Ok(Self {
            config,
            deck,
            matcher: MatchCoordinator::new(),
            turns,
            mode,
            scheduler: Scheduler::new(),
            rng: rng.for_context("reshuffle"),
            now: 0,
            ticker: None,
            outcome: None,
            torn_down: false,
        })
    }

    /// Start over on a fresh layout with the same configuration.
    ///
    /// Every pending task of the current playthrough is cancelled first.
    pub fn restart(&mut self, rng: &GameRng) -> Result<(), RoundError> {
        self.cancel_all();

        let mut layout = rng.for_context("layout");
        self.deck = Deck::build(
            &self.config.identities,
            self.config.columns,
            self.config.rows,
            &mut layout,
        )?;
        self.rng = rng.for_context("reshuffle");
        self.matcher = MatchCoordinator::new();
        self.turns = TurnCoordinator::new(self.config.players());
        self.mode.reset();
        self.outcome = None;
        self.torn_down = false;

        info!("round restarted");
        Ok(())
    }

    /// Draw the whole board and the initial displays.
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        for card in self.deck.cards() {
            presenter.set_card_position(card.id, card.position);
            presenter.set_card_visual(card.id, card.face.into());
        }
        let actions = self
            .mode
            .on_start(&mode_context(self.now, &self.turns, &self.deck));
        self.apply(actions, presenter);
        if self.turns.is_two_player() {
            presenter.update_turn_display(self.turns.active());
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.card(id)
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.deck.matched_pairs()
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.total_pairs()
    }

    #[must_use]
    pub fn match_state(&self) -> MatchState {
        self.matcher.state()
    }

    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.matcher.input_locked() || self.mode.blocks_input()
    }

    #[must_use]
    pub fn turns(&self) -> &TurnCoordinator {
        &self.turns
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.turns.active()
    }

    #[must_use]
    pub fn mode(&self) -> &ModeManager {
        &self.mode
    }

    /// Logical time of this round.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of tasks waiting in the scheduler.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// True once the round has ended (the dialog may still be pending).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // === Input ===

    fn rejection(&self, id: CardId) -> Option<Rejection> {
        if self.torn_down || self.matcher.is_stopped() {
            return Some(Rejection::RoundOver);
        }
        let Some(card) = self.deck.card(id) else {
            return Some(Rejection::UnknownCard);
        };
        if card.is_open() {
            return Some(Rejection::AlreadyOpen);
        }
        if self.matcher.input_locked() {
            return Some(Rejection::InputLocked);
        }
        if self.mode.blocks_input() {
            return Some(Rejection::ReshufflePending);
        }
        None
    }

    /// Handle the player selecting a card.
    ///
    /// Rejected activations change nothing and are only logged.
    pub fn activate<P: Presenter + ?Sized>(&mut self, id: CardId, presenter: &mut P) -> Activation {
        if let Some(reason) = self.rejection(id) {
            debug!("activation of {} rejected: {}", id, reason);
            return Activation::Rejected(reason);
        }

        let event = match self.matcher.activate(&mut self.deck, id) {
            Ok(event) => event,
            Err(reason) => {
                debug!("activation of {} rejected: {}", id, reason);
                return Activation::Rejected(reason);
            }
        };

        let actions = self
            .mode
            .on_activation(&mode_context(self.now, &self.turns, &self.deck));
        self.apply(actions, presenter);

        match event {
            MatchEvent::Opened(card) => {
                presenter.set_card_visual(card, CardVisual::Open);
            }
            MatchEvent::Matched { second, .. } => {
                presenter.set_card_visual(second, CardVisual::Open);
                let player = self.turns.record_match();
                let actions = self
                    .mode
                    .on_match(&mode_context(self.now, &self.turns, &self.deck), player);
                self.apply(actions, presenter);
                if self.deck.is_cleared() {
                    self.end_round(EndReason::BoardCleared);
                }
            }
            MatchEvent::Mismatched { second, .. } => {
                presenter.set_card_visual(second, CardVisual::Open);
                self.scheduler.after(
                    self.now,
                    self.config.timings.mismatch_close_ms,
                    RoundTask::CloseMismatch,
                );
                if self.turns.is_two_player() {
                    let outgoing = self.turns.active();
                    let incoming = self.turns.switch_turn();
                    self.mode.on_turn_switch(
                        &mode_context(self.now, &self.turns, &self.deck),
                        outgoing,
                    );
                    presenter.update_turn_display(incoming);
                }
            }
        }

        Activation::Accepted(event)
    }

    // === Time ===

    /// Move the round clock forward, running every task that falls due.
    ///
    /// Tasks run in due order with the clock set to their due time.
    pub fn advance<P: Presenter + ?Sized>(&mut self, ms: Millis, presenter: &mut P) {
        let target = self.now + ms;
        while let Some(fired) = self.scheduler.pop_due(target) {
            self.now = fired.due;
            self.run(fired.task, presenter);
        }
        self.now = target;
    }

    /// Pause the time attack countdown. Returns false if nothing was paused.
    pub fn pause_timer(&mut self) -> bool {
        let paused = self
            .mode
            .as_time_attack_mut()
            .is_some_and(|t| t.pause(self.now));
        if paused {
            if let Some(id) = self.ticker.take() {
                self.scheduler.cancel(id);
            }
        }
        paused
    }

    /// Resume a paused countdown. Returns false if it was not paused.
    pub fn resume_timer(&mut self) -> bool {
        let resumed = self
            .mode
            .as_time_attack_mut()
            .is_some_and(|t| t.resume(self.now));
        if resumed && self.ticker.is_none() {
            self.ticker = Some(
                self.scheduler
                    .every(self.now, self.config.timings.tick_ms, RoundTask::Tick),
            );
        }
        resumed
    }

    /// Cancel everything and refuse further input.
    pub fn teardown(&mut self) {
        self.cancel_all();
        self.matcher.stop();
        self.torn_down = true;
        debug!("round torn down at {}ms", self.now);
    }

    fn cancel_all(&mut self) {
        self.scheduler.clear();
        self.ticker = None;
    }

    fn run<P: Presenter + ?Sized>(&mut self, task: RoundTask, presenter: &mut P) {
        match task {
            RoundTask::CloseMismatch => {
                if let Some((first, second)) = self.matcher.finish_mismatch(&mut self.deck) {
                    presenter.set_card_visual(first, CardVisual::Closed);
                    presenter.set_card_visual(second, CardVisual::Closed);
                }
            }
            RoundTask::Tick => {
                let actions = self
                    .mode
                    .on_tick(&mode_context(self.now, &self.turns, &self.deck));
                self.apply(actions, presenter);
            }
            RoundTask::ReshuffleDecision => {
                let idle = self.matcher.is_idle();
                let closed = self.deck.closed_count();
                let Some(shuffle) = self.mode.as_shuffle_count_mut() else {
                    return;
                };
                if shuffle.decide(idle, closed) {
                    presenter.shake_board();
                    for moved in self.deck.reshuffle(&mut self.rng) {
                        presenter.set_card_position(moved.card, moved.to);
                    }
                }
                self.scheduler.after(
                    self.now,
                    self.config.timings.reshuffle_reset_ms,
                    RoundTask::ResetShuffleCounter,
                );
            }
            RoundTask::ResetShuffleCounter => {
                if let Some(shuffle) = self.mode.as_shuffle_count_mut() {
                    shuffle.reset_counter();
                }
            }
            RoundTask::ShowRoundOver => {
                if let Some(outcome) = &self.outcome {
                    presenter.show_round_over_dialog(&outcome.text);
                }
            }
        }
    }

    fn apply<P: Presenter + ?Sized>(&mut self, actions: ModeActions, presenter: &mut P) {
        for action in actions {
            match action {
                ModeAction::StartTicker => {
                    if self.ticker.is_none() {
                        self.ticker = Some(self.scheduler.every(
                            self.now,
                            self.config.timings.tick_ms,
                            RoundTask::Tick,
                        ));
                    }
                }
                ModeAction::StopTicker => {
                    if let Some(id) = self.ticker.take() {
                        self.scheduler.cancel(id);
                    }
                }
                ModeAction::ScheduleReshuffle => {
                    self.scheduler.after(
                        self.now,
                        self.config.timings.reshuffle_delay_ms,
                        RoundTask::ReshuffleDecision,
                    );
                }
                ModeAction::UpdateScore(player, value) => {
                    presenter.update_score_display(player, value);
                }
                ModeAction::UpdateTimer(text) => {
                    presenter.update_timer_display(&text);
                }
                ModeAction::EndRound(reason) => {
                    self.end_round(reason);
                }
            }
        }
    }

    fn end_round(&mut self, reason: EndReason) {
        if self.outcome.is_some() {
            return;
        }
        self.matcher.stop();
        self.ticker = None;
        self.scheduler.cancel_where(|task| {
            matches!(
                task,
                RoundTask::Tick | RoundTask::ReshuffleDecision | RoundTask::ResetShuffleCounter
            )
        });

        let outcome = self
            .mode
            .on_round_over(&mode_context(self.now, &self.turns, &self.deck), reason);
        info!("round over ({:?}): {}", reason, outcome.text);

        self.outcome = Some(outcome);
        self.scheduler.after(
            self.now,
            self.config.timings.round_over_dialog_ms,
            RoundTask::ShowRoundOver,
        );
    }
}
