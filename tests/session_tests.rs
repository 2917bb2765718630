//! Session integration tests: start, retry and exit.

use rust_pairs::cards::CardId;
use rust_pairs::core::{GameMode, PlayerId, Rejection, RoundConfig, RoundError};
use rust_pairs::presenter::{NullPresenter, PresenterCommand, RecordingPresenter};
use rust_pairs::round::{Activation, Session};
use rust_pairs::rules::MatchState;

fn card(id: u32) -> CardId {
    CardId::new(id)
}

fn session(config: RoundConfig) -> Session<RecordingPresenter> {
    Session::start(config, 77, RecordingPresenter::new()).unwrap()
}

/// Test that an invalid configuration never produces a session.
#[test]
fn test_start_validates() {
    let config = RoundConfig::new(3, 3).with_identity_count(4);
    let result = Session::start(config, 1, NullPresenter);
    assert!(matches!(result, Err(RoundError::LayoutMismatch { .. })));
}

/// Test that a retry discards every task of the previous round.
#[test]
fn test_retry_cancels_stale_tasks() {
    let mut session = session(RoundConfig::new(2, 2).with_identity_count(2));

    session.activate(card(0));
    session.activate(card(2));
    assert_eq!(session.round().unwrap().pending_tasks(), 1);

    session.retry().unwrap();
    let round = session.round().unwrap();
    assert_eq!(round.pending_tasks(), 0);
    assert_eq!(round.match_state(), MatchState::Idle);
    assert_eq!(round.deck().closed_count(), 4);
    assert_eq!(session.rounds_started(), 2);

    session.presenter_mut().take();
    session.advance(5_000);
    assert!(session.presenter().commands().is_empty());
}

/// Test that a retried time attack round starts a fresh countdown.
#[test]
fn test_retry_resets_countdown() {
    let config = RoundConfig::new(2, 2)
        .with_identity_count(2)
        .with_mode(GameMode::Time)
        .with_time_limit(2_000);
    let mut session = session(config);

    session.activate(card(0));
    session.advance(1_000);
    assert_eq!(session.presenter().timer_text(), Some("1.0"));

    session.retry().unwrap();
    assert_eq!(session.presenter().timer_text(), Some("2.0"));

    session.advance(3_000);
    assert!(!session.round().unwrap().is_over());
    assert_eq!(session.presenter().timer_text(), Some("2.0"));
}

/// Test that a retried score round starts from zero.
#[test]
fn test_retry_resets_scores() {
    let config = RoundConfig::new(3, 2)
        .with_identity_count(3)
        .with_mode(GameMode::Score)
        .with_players(2);
    let mut session = session(config);

    session.activate(card(0));
    session.activate(card(1));
    assert_eq!(session.presenter().score(PlayerId::FIRST), Some(10));

    session.retry().unwrap();
    assert_eq!(session.presenter().score(PlayerId::FIRST), Some(0));
    assert_eq!(session.presenter().score(PlayerId::SECOND), Some(0));
    assert_eq!(session.round().unwrap().active_player(), PlayerId::FIRST);
}

/// Test that exit returns the outcome and closes the session.
#[test]
fn test_exit_closes_session() {
    let mut session = session(RoundConfig::new(2, 1).with_identity_count(1));

    session.activate(card(0));
    session.activate(card(1));

    let outcome = session.exit().unwrap();
    assert_eq!(outcome.text, "Clear!");
    assert!(session.round().is_none());

    assert_eq!(session.activate(card(0)), Activation::Rejected(Rejection::RoundOver));
    assert_eq!(session.retry(), Err(RoundError::SessionClosed));
    assert!(session.exit().is_none());

    // The dialog was scheduled but the round is gone.
    session.advance(2_000);
    assert_eq!(session.presenter().round_over_text(), None);
}

/// Test that exiting an unfinished round reports no outcome.
#[test]
fn test_exit_mid_round() {
    let mut session = session(RoundConfig::new(2, 2).with_identity_count(2));
    session.activate(card(0));
    assert!(session.exit().is_none());
}

/// Test that two sessions with the same seed deal the same boards, retries included.
#[test]
fn test_sessions_replay() {
    let config = RoundConfig::new(4, 4).with_identity_count(8);
    let mut a = Session::start(config.clone(), 5, RecordingPresenter::new()).unwrap();
    let mut b = Session::start(config, 5, RecordingPresenter::new()).unwrap();

    a.retry().unwrap();
    b.retry().unwrap();

    let positions = |p: &RecordingPresenter| {
        p.commands()
            .iter()
            .filter(|c| matches!(c, PresenterCommand::SetCardPosition(..)))
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(positions(a.presenter()), positions(b.presenter()));
    assert_eq!(positions(&a.into_presenter()).len(), 32);
}
