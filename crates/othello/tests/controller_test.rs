//! Turn state machine scenarios, driven through the event stream.

use std::time::Duration;

use othello::{GameController, GameEvent, Phase, StartError};
use othello_core::{Color, Layout, MoveRejection, Pos, StoneCounts};
use tokio::sync::mpsc;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

async fn next_event(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> GameEvent {
    tokio::time::timeout(EVENT_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for a game event")
        .expect("event channel closed")
}

fn controller(
    layout: &Layout,
) -> (GameController, mpsc::UnboundedReceiver<GameEvent>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let controller = GameController::new(layout, event_tx).with_ai_delay(Duration::ZERO);
    (controller, event_rx)
}

#[tokio::test]
async fn turns_alternate_between_black_and_white() {
    let layout = Layout::standard(8).unwrap();
    let (mut game, mut events) = controller(&layout);
    let inputs = game.start("human", "human").unwrap();
    assert!(game.is_playing());

    let black_tx = inputs.black.unwrap();
    let white_tx = inputs.white.unwrap();
    let task = tokio::spawn(async move { game.run().await });

    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));
    black_tx.send(Pos::new(2, 3)).unwrap();

    match next_event(&mut events).await {
        GameEvent::MoveApplied { pos, color, flips } => {
            assert_eq!(pos, Pos::new(2, 3));
            assert_eq!(color, Color::Black);
            assert_eq!(flips.rays(), &[vec![Pos::new(3, 3)]]);
        }
        other => panic!("expected MoveApplied, got {other:?}"),
    }
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::StoneCounts(StoneCounts { black: 4, white: 1 })
    );
    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::White));

    white_tx.send(Pos::new(2, 2)).unwrap();
    match next_event(&mut events).await {
        GameEvent::MoveApplied { color, .. } => assert_eq!(color, Color::White),
        other => panic!("expected MoveApplied, got {other:?}"),
    }

    task.abort();
}

#[tokio::test]
async fn illegal_human_move_keeps_the_same_player_active() {
    let layout = Layout::standard(8).unwrap();
    let (mut game, mut events) = controller(&layout);
    let inputs = game.start("human", "human").unwrap();

    let black_tx = inputs.black.unwrap();
    let task = tokio::spawn(async move { game.run().await });

    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));

    // Occupied cell, then out of range, then no capture: each is reported
    // and the turn does not advance.
    black_tx.send(Pos::new(3, 3)).unwrap();
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::IllegalMove {
            pos: Pos::new(3, 3),
            color: Color::Black,
            reason: MoveRejection::Occupied,
        }
    );

    black_tx.send(Pos::new(42, 0)).unwrap();
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::IllegalMove {
            pos: Pos::new(42, 0),
            color: Color::Black,
            reason: MoveRejection::OutOfBounds,
        }
    );

    black_tx.send(Pos::new(2, 3)).unwrap();
    match next_event(&mut events).await {
        GameEvent::MoveApplied { color, .. } => assert_eq!(color, Color::Black),
        other => panic!("expected MoveApplied, got {other:?}"),
    }

    task.abort();
}

/// White keeps stones but has nowhere to play after Black's move, while
/// Black can still move: White passes and Black is re-activated without
/// the game ending.
#[tokio::test]
async fn pass_reactivates_the_mover_without_ending_the_game() {
    // Row 0 gives Black an opening capture; the cluster on row 2 leaves
    // White without any legal reply while Black can still play (2,2).
    let layout = Layout::from_grid(&[
        vec![0, 2, 1, 0, 0, 0],
        vec![0; 6],
        vec![0, 0, 0, 2, 1, 2],
        vec![0; 6],
        vec![0; 6],
        vec![0; 6],
    ])
    .unwrap();
    let (mut game, mut events) = controller(&layout);
    let inputs = game.start("human", "human").unwrap();

    let black_tx = inputs.black.unwrap();
    let task = tokio::spawn(async move { game.run().await });

    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));
    black_tx.send(Pos::new(0, 0)).unwrap();

    match next_event(&mut events).await {
        GameEvent::MoveApplied { pos, .. } => assert_eq!(pos, Pos::new(0, 0)),
        other => panic!("expected MoveApplied, got {other:?}"),
    }
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::StoneCounts(StoneCounts { black: 4, white: 2 })
    );
    assert_eq!(next_event(&mut events).await, GameEvent::Passed(Color::White));
    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));

    task.abort();
}

/// Capturing the last white stone ends the game immediately, with empty
/// cells still on the board.
#[tokio::test]
async fn wipeout_finishes_the_game_before_the_board_fills() {
    let layout = Layout::from_grid(&[
        vec![1, 2, 0, 0],
        vec![0; 4],
        vec![0; 4],
        vec![0; 4],
    ])
    .unwrap();
    let (mut game, mut events) = controller(&layout);
    let inputs = game.start("human", "human").unwrap();

    let black_tx = inputs.black.unwrap();
    let task = tokio::spawn(async move { game.run().await });

    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));
    black_tx.send(Pos::new(2, 0)).unwrap();

    match next_event(&mut events).await {
        GameEvent::MoveApplied { pos, .. } => assert_eq!(pos, Pos::new(2, 0)),
        other => panic!("expected MoveApplied, got {other:?}"),
    }
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::StoneCounts(StoneCounts { black: 3, white: 0 })
    );
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::Finished(StoneCounts { black: 3, white: 0 })
    );

    // run() returns cleanly once finished.
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn random_ai_plays_only_legal_moves() {
    let layout = Layout::standard(8).unwrap();
    let legal = othello_core::Board::new(&layout).legal_positions(Color::Black);

    let (mut game, mut events) = controller(&layout);
    let inputs = game.start("random", "human").unwrap();
    assert!(inputs.black.is_none());
    assert!(inputs.white.is_some());

    let task = tokio::spawn(async move { game.run().await });

    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));
    match next_event(&mut events).await {
        GameEvent::MoveApplied { pos, color, .. } => {
            assert_eq!(color, Color::Black);
            assert!(legal.contains(&pos), "AI played {pos} outside the legal set");
        }
        other => panic!("expected MoveApplied, got {other:?}"),
    }

    task.abort();
}

#[tokio::test]
async fn two_random_players_finish_a_small_game() {
    let layout = Layout::standard(4).unwrap();
    let (mut game, mut events) = controller(&layout);
    game.start("random", "random").unwrap();

    let task = tokio::spawn(async move { game.run().await });

    loop {
        match next_event(&mut events).await {
            GameEvent::Finished(counts) => {
                assert!(counts.total() <= 16);
                break;
            }
            GameEvent::IllegalMove { pos, color, .. } => {
                panic!("random AI proposed illegal move {pos} for {color}")
            }
            _ => {}
        }
    }

    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn unknown_player_kind_leaves_the_session_not_started() {
    let layout = Layout::standard(8).unwrap();
    let (mut game, _events) = controller(&layout);

    match game.start("minimax", "human").unwrap_err() {
        StartError::UnknownPlayerType(err) => assert_eq!(err.name, "minimax"),
        other => panic!("expected UnknownPlayerType, got {other:?}"),
    }
    assert_eq!(game.phase(), Phase::NotStarted);
    assert!(!game.is_playing());
}

/// A coordinate delivered before the first turn begins (scripted or piped
/// input) is consumed by that turn, not discarded.
#[tokio::test]
async fn coordinates_queued_before_the_first_turn_are_not_lost() {
    let layout = Layout::standard(8).unwrap();
    let (mut game, mut events) = controller(&layout);
    let inputs = game.start("human", "human").unwrap();

    // Queued before run() is even spawned.
    inputs.black.unwrap().send(Pos::new(2, 3)).unwrap();
    let task = tokio::spawn(async move { game.run().await });

    assert_eq!(next_event(&mut events).await, GameEvent::TurnStarted(Color::Black));
    match next_event(&mut events).await {
        GameEvent::MoveApplied { pos, color, .. } => {
            assert_eq!(pos, Pos::new(2, 3));
            assert_eq!(color, Color::Black);
        }
        other => panic!("expected MoveApplied, got {other:?}"),
    }

    task.abort();
}

#[tokio::test]
async fn starting_twice_is_rejected_without_touching_the_game() {
    let layout = Layout::standard(8).unwrap();
    let (mut game, _events) = controller(&layout);
    let inputs = game.start("human", "human").unwrap();
    let black_tx = inputs.black.unwrap();

    let err = game.start("random", "random").unwrap_err();

    assert_eq!(err, StartError::AlreadyStarted);
    assert_eq!(game.phase(), Phase::AwaitingMove(Color::Black));
    assert!(game.is_playing());
    // The original players were not rebuilt: Black's channel is still open.
    assert!(!black_tx.is_closed());
}

#[tokio::test]
async fn reset_restores_layout_counts_and_stops_play() {
    let layout = Layout::standard(8).unwrap();
    let (mut game, mut events) = controller(&layout);
    game.start("human", "human").unwrap();
    assert!(game.is_playing());

    let fresh = Layout::from_grid(&[
        vec![1, 0, 2],
        vec![0, 0, 0],
        vec![2, 0, 1],
    ])
    .unwrap();
    game.reset(&fresh).unwrap();

    assert!(!game.is_playing());
    assert_eq!(game.phase(), Phase::NotStarted);
    assert_eq!(
        next_event(&mut events).await,
        GameEvent::StoneCounts(StoneCounts { black: 2, white: 2 })
    );
    assert_eq!(next_event(&mut events).await, GameEvent::WasReset);
    assert_eq!(game.board().stone_counts().total(), 4);
}
