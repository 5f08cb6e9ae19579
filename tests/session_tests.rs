use std::time::Duration;

use battleship_solo::{
    Board, GameConfig, GameSession, GameStatus, GuessOutcome, Hint, ManualClock, Orientation,
    SessionError,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn config(ship_count: usize, turn_budget: u32) -> GameConfig {
    GameConfig {
        size: 5,
        ship_count,
        ship_length: 3,
        turn_budget,
    }
}

/// One ship at A1-C1 on a 5×5 board.
fn top_left_session(turn_budget: u32) -> GameSession<ManualClock> {
    let mut board = Board::new(5).unwrap();
    board.place(0, 0, Orientation::Horizontal, 3).unwrap();
    GameSession::with_board(
        config(1, turn_budget),
        board,
        SmallRng::seed_from_u64(0),
        ManualClock::new(),
    )
    .unwrap()
}

#[test]
fn three_hits_on_a_single_ship_win() {
    let mut session = top_left_session(7);

    let first = session.guess(0, 0).unwrap();
    assert_eq!(first.outcome, GuessOutcome::Hit { sunk: false });
    assert!(!first.sunk());
    assert_eq!(session.guess(0, 1).unwrap().outcome, GuessOutcome::Hit { sunk: false });

    let last = session.guess(0, 2).unwrap();
    assert_eq!(last.outcome, GuessOutcome::Win);
    assert!(last.sunk());
    assert_eq!(last.turns_left, 7);
    assert!(last.remaining_ships.is_empty());
    assert_eq!(session.status(), GameStatus::Won);
}

#[test]
fn single_turn_miss_loses_and_reveals_the_ship() {
    let mut session = top_left_session(1);
    let out = session.guess(3, 3).unwrap();
    assert_eq!(out.outcome, GuessOutcome::Loss);
    assert_eq!(out.turns_left, 0);
    assert_eq!(out.remaining_ships, vec![(0, 0), (0, 1), (0, 2)]);
    assert_eq!(session.status(), GameStatus::Lost);
}

#[test]
fn loss_lists_only_unhit_cells() {
    let mut session = top_left_session(1);
    session.guess(0, 1).unwrap();
    let out = session.guess(4, 4).unwrap();
    assert_eq!(out.remaining_ships, vec![(0, 0), (0, 2)]);
}

#[test]
fn repeated_guess_costs_no_turn() {
    let mut session = top_left_session(2);
    assert_eq!(session.guess(2, 2).unwrap().outcome, GuessOutcome::Miss);
    assert_eq!(session.turns_left(), 1);

    let again = session.guess(2, 2).unwrap();
    assert_eq!(again.outcome, GuessOutcome::AlreadyGuessed);
    assert_eq!(again.turns_left, 1);

    session.guess(0, 0).unwrap();
    assert_eq!(session.guess(0, 0).unwrap().outcome, GuessOutcome::AlreadyGuessed);
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn finished_games_reject_guesses() {
    let mut won = top_left_session(7);
    for c in 0..3 {
        won.guess(0, c).unwrap();
    }
    assert_eq!(won.guess(4, 4).unwrap_err(), SessionError::GameAlreadyOver);

    let mut lost = top_left_session(1);
    lost.guess(4, 4).unwrap();
    assert_eq!(lost.guess(0, 0).unwrap_err(), SessionError::GameAlreadyOver);
    assert_eq!(lost.turns_left(), 0);
}

#[test]
fn hint_points_at_a_remaining_ship_cell() {
    let mut session = top_left_session(7);
    session.guess(0, 0).unwrap();
    for _ in 0..20 {
        match session.hint() {
            Hint::Ship(cell) => assert!(cell == (0, 1) || cell == (0, 2)),
            Hint::NoShipsLeft => panic!("ships remain"),
        }
    }
    assert_eq!(session.turns_left(), 7);
}

#[test]
fn hint_after_everything_is_sunk() {
    let mut session = top_left_session(7);
    for c in 0..3 {
        session.guess(0, c).unwrap();
    }
    assert_eq!(session.hint(), Hint::NoShipsLeft);
}

#[test]
fn elapsed_time_follows_the_clock() {
    let clock = ManualClock::new();
    let mut board = Board::new(5).unwrap();
    board.place(0, 0, Orientation::Horizontal, 3).unwrap();
    let mut session =
        GameSession::with_board(config(1, 7), board, SmallRng::seed_from_u64(0), clock.clone())
            .unwrap();

    assert_eq!(session.elapsed_secs(), 0);
    clock.advance(Duration::from_secs(4));
    assert_eq!(session.elapsed_secs(), 4);
    assert_eq!(session.guess(3, 3).unwrap().elapsed_secs, 4);
    clock.advance(Duration::from_millis(2900));
    assert_eq!(session.elapsed_secs(), 6);
}

#[test]
fn random_sessions_use_the_configured_fleet() {
    let session = GameSession::new(
        GameConfig::default(),
        SmallRng::seed_from_u64(99),
        ManualClock::new(),
    )
    .unwrap();
    assert_eq!(session.board().ship_cell_count(), 9);
    assert_eq!(session.board().ships().len(), 3);
    assert_eq!(session.turns_left(), 7);
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn invalid_config_is_rejected() {
    let err = GameSession::new(
        GameConfig {
            ship_count: 20,
            ..GameConfig::default()
        },
        SmallRng::seed_from_u64(1),
        ManualClock::new(),
    )
    .unwrap_err();
    assert!(matches!(err, SessionError::InvalidConfig(_)));
}

#[test]
fn overflowing_fleet_is_an_error_not_a_panic() {
    let err = GameSession::new(
        GameConfig {
            ship_count: usize::MAX,
            ..GameConfig::default()
        },
        SmallRng::seed_from_u64(1),
        ManualClock::new(),
    )
    .unwrap_err();
    assert_eq!(err, SessionError::InvalidConfig("ships do not fit on the board"));

    let err = GameSession::new(
        GameConfig {
            size: usize::MAX,
            ..GameConfig::default()
        },
        SmallRng::seed_from_u64(1),
        ManualClock::new(),
    )
    .unwrap_err();
    assert!(matches!(err, SessionError::InvalidConfig(_)));
}
