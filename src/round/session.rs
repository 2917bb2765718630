//! Start, retry and exit around a single round.

use log::info;

use crate::cards::CardId;
use crate::core::config::RoundConfig;
use crate::core::error::{Rejection, RoundError};
use crate::core::rng::GameRng;
use crate::core::timing::Millis;
use crate::presenter::Presenter;
use crate::rules::RoundOutcome;

use super::play::{Activation, Round};

/// A round bound to its presenter.
///
/// Each retry draws a new layout from a stream forked off the session seed,
/// so a session replays identically for the same seed and input sequence.
#[derive(Debug)]
pub struct Session<P> {
    rng: GameRng,
    round: Option<Round>,
    presenter: P,
    rounds_started: u32,
}

impl<P: Presenter> Session<P> {
    /// Validate `config`, build the first round and draw it.
    pub fn start(config: RoundConfig, seed: u64, mut presenter: P) -> Result<Self, RoundError> {
        let mut rng = GameRng::new(seed);
        let mut round = Round::with_rng(config, &rng.fork())?;
        round.present(&mut presenter);

        Ok(Self {
            rng,
            round: Some(round),
            presenter,
            rounds_started: 1,
        })
    }

    /// The current round, if the session has not been exited.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Rounds started so far, retries included.
    #[must_use]
    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    /// Forward a card activation to the round.
    pub fn activate(&mut self, card: CardId) -> Activation {
        match self.round.as_mut() {
            Some(round) => round.activate(card, &mut self.presenter),
            None => Activation::Rejected(Rejection::RoundOver),
        }
    }

    /// Advance the round clock.
    pub fn advance(&mut self, ms: Millis) {
        if let Some(round) = self.round.as_mut() {
            round.advance(ms, &mut self.presenter);
        }
    }

    pub fn pause_timer(&mut self) -> bool {
        self.round.as_mut().is_some_and(Round::pause_timer)
    }

    pub fn resume_timer(&mut self) -> bool {
        self.round.as_mut().is_some_and(Round::resume_timer)
    }

    /// Throw the current round away and deal a new one.
    ///
    /// Nothing scheduled by the previous round can fire afterwards.
    pub fn retry(&mut self) -> Result<(), RoundError> {
        let Some(round) = self.round.as_mut() else {
            return Err(RoundError::SessionClosed);
        };
        round.restart(&self.rng.fork())?;
        round.present(&mut self.presenter);
        self.rounds_started += 1;
        info!("retry: round {}", self.rounds_started);
        Ok(())
    }

    /// Tear the round down and close the session.
    ///
    /// Returns the outcome if the round had finished.
    pub fn exit(&mut self) -> Option<RoundOutcome> {
        let mut round = self.round.take()?;
        round.teardown();
        info!("session closed after {} round(s)", self.rounds_started);
        round.outcome().cloned()
    }

    /// Consume the session, returning its presenter.
    pub fn into_presenter(mut self) -> P {
        self.exit();
        self.presenter
    }
}
