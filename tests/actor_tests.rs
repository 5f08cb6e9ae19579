use battleship_solo::{
    spawn_session, Board, GameApi, GameConfig, GameSession, GameStatus, GuessOutcome, Hint,
    ManualClock, Orientation, SessionError,
};
use rand::{rngs::SmallRng, SeedableRng};

fn one_ship_session() -> GameSession<ManualClock> {
    let mut board = Board::new(5).unwrap();
    board.place(2, 1, Orientation::Horizontal, 3).unwrap();
    let config = GameConfig {
        ship_count: 1,
        ..GameConfig::default()
    };
    GameSession::with_board(config, board, SmallRng::seed_from_u64(5), ManualClock::new()).unwrap()
}

#[tokio::test]
async fn handle_drives_a_game_to_a_win() {
    let mut handle = spawn_session(one_ship_session());

    assert_eq!(
        handle.guess(2, 1).await.unwrap().outcome,
        GuessOutcome::Hit { sunk: false }
    );
    assert_eq!(
        handle.guess(0, 0).await.unwrap().outcome,
        GuessOutcome::Miss
    );
    match handle.hint().await.unwrap() {
        Hint::Ship(cell) => assert!(cell == (2, 2) || cell == (2, 3)),
        Hint::NoShipsLeft => panic!("ships remain"),
    }
    handle.guess(2, 2).await.unwrap();
    assert_eq!(handle.guess(2, 3).await.unwrap().outcome, GuessOutcome::Win);

    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.status, GameStatus::Won);
    assert_eq!(snap.turns_left, 6);
    assert_eq!(
        handle.guess(4, 4).await.unwrap_err(),
        SessionError::GameAlreadyOver
    );
}

#[tokio::test]
async fn concurrent_guesses_are_applied_one_at_a_time() {
    let handle = spawn_session(one_ship_session());

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let mut h = handle.clone();
        tasks.push(tokio::spawn(async move { h.guess(2, 2).await.unwrap().outcome }));
    }
    let mut outcomes = Vec::new();
    for t in tasks {
        outcomes.push(t.await.unwrap());
    }

    let hits = outcomes
        .iter()
        .filter(|o| matches!(o, GuessOutcome::Hit { .. }))
        .count();
    assert_eq!(hits, 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|&&o| o == GuessOutcome::AlreadyGuessed)
            .count(),
        7
    );
}

#[tokio::test]
async fn reset_through_the_handle_starts_over() {
    let mut handle = spawn_session(one_ship_session());
    handle.guess(0, 0).await.unwrap();
    handle.reset().await.unwrap();

    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.status, GameStatus::InProgress);
    assert_eq!(snap.turns_left, 7);
    assert!(snap.view.iter().flatten().all(|c| !c.is_guessed()));
}

#[tokio::test]
async fn requests_fail_after_shutdown() {
    let mut handle = spawn_session(one_ship_session());
    handle.shutdown().await;

    assert_eq!(handle.guess(0, 0).await.unwrap_err(), SessionError::Closed);
    assert!(handle.is_closed());
    assert_eq!(handle.snapshot().await.unwrap_err(), SessionError::Closed);
}
