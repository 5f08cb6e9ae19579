//! A single-player game: one hidden board, a turn budget and a running clock.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{self, place_ships, Board};
use crate::clock::Clock;
use crate::common::{BoardError, Cell, Coord, GuessResult};
use crate::config::GameConfig;

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// What a single guess did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessOutcome {
    /// The cell was guessed before; no turn was used.
    AlreadyGuessed,
    /// A ship segment was hit and ships remain.
    Hit { sunk: bool },
    /// Open water; one turn was used.
    Miss,
    /// The last ship segment was hit.
    Win,
    /// The last turn was spent on a miss.
    Loss,
}

/// A guess outcome together with the game state a presentation layer shows
/// alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOutcome {
    pub outcome: GuessOutcome,
    pub turns_left: u32,
    pub elapsed_secs: u64,
    /// Un-hit ship cells, filled only on `Loss`.
    pub remaining_ships: Vec<Coord>,
}

impl SessionOutcome {
    /// Whether this guess finished off a ship.
    pub fn sunk(&self) -> bool {
        matches!(
            self.outcome,
            GuessOutcome::Hit { sunk: true } | GuessOutcome::Win
        )
    }
}

/// Answer to a hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Hint {
    /// A cell still holding an unguessed ship segment.
    Ship(Coord),
    NoShipsLeft,
}

/// Point-in-time view of a session, safe to hand to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub turns_left: u32,
    pub elapsed_secs: u64,
    pub view: Vec<Vec<Cell>>,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        board::render_view(f, &self.view)
    }
}

/// Errors returned by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Guess coordinates lie outside the board.
    OutOfRange { row: usize, col: usize },
    /// The game already ended in a win or a loss.
    GameAlreadyOver,
    /// No turns remain.
    NoTurnsLeft,
    /// The configuration cannot produce a playable board.
    InvalidConfig(&'static str),
    /// Board construction or placement failed.
    Board(BoardError),
    /// The task owning the session has stopped.
    Closed,
}

impl From<BoardError> for SessionError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfRange { row, col } => SessionError::OutOfRange { row, col },
            other => SessionError::Board(other),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::OutOfRange { row, col } => {
                write!(f, "Guess ({}, {}) is outside the board", row, col)
            }
            SessionError::GameAlreadyOver => write!(f, "The game is already over"),
            SessionError::NoTurnsLeft => write!(f, "No more turns left"),
            SessionError::InvalidConfig(reason) => write!(f, "Invalid game config: {}", reason),
            SessionError::Board(e) => write!(f, "Board error: {}", e),
            SessionError::Closed => write!(f, "Session is closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}

/// Receives the elapsed time of every won game.
pub trait ScoreRecorder: Send + Sync {
    fn record(&mut self, elapsed_secs: u64);
}

/// Core game logic: the hidden board, the turn budget and the clock.
pub struct GameSession<C: Clock> {
    config: GameConfig,
    board: Board,
    turns_left: u32,
    status: GameStatus,
    clock: C,
    finished_after: Option<Duration>,
    rng: SmallRng,
    recorder: Option<Box<dyn ScoreRecorder>>,
}

impl<C: Clock> GameSession<C> {
    /// Start a game on a freshly placed random board.
    pub fn new(config: GameConfig, mut rng: SmallRng, clock: C) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;
        let board = place_ships(&mut rng, config.size, config.ship_count, config.ship_length)?;
        Self::with_board(config, board, rng, clock)
    }

    /// Start a game on a board whose ships are already placed.
    ///
    /// The board's fleet must match `config`; `reset` places new fleets from it.
    pub fn with_board(
        config: GameConfig,
        board: Board,
        rng: SmallRng,
        mut clock: C,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;
        if board.size() != config.size {
            return Err(SessionError::InvalidConfig(
                "board size does not match the configured size",
            ));
        }
        if board.ships().len() != config.ship_count
            || board.ships().iter().any(|s| s.length() != config.ship_length)
        {
            return Err(SessionError::InvalidConfig(
                "board fleet does not match the configured ships",
            ));
        }
        clock.restart();
        debug!(
            "new session: {}x{} board, {} ship cells, {} turns",
            config.size,
            config.size,
            board.ship_cell_count(),
            config.turn_budget
        );
        Ok(Self {
            config,
            board,
            turns_left: config.turn_budget,
            status: GameStatus::InProgress,
            clock,
            finished_after: None,
            rng,
            recorder: None,
        })
    }

    /// Send the elapsed time of a win to `recorder`.
    pub fn with_recorder(mut self, recorder: impl ScoreRecorder + 'static) -> Self {
        self.recorder = Some(Box::new(recorder));
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn turns_left(&self) -> u32 {
        self.turns_left
    }

    /// Time since the game started, frozen once it ends.
    pub fn elapsed(&self) -> Duration {
        self.finished_after.unwrap_or_else(|| self.clock.elapsed())
    }

    /// Whole seconds since the game started.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Fire at (row, col).
    ///
    /// Only misses use up a turn; guessing a cell twice is reported as
    /// `AlreadyGuessed` and costs nothing.
    pub fn guess(&mut self, row: usize, col: usize) -> Result<SessionOutcome, SessionError> {
        if self.is_over() {
            return Err(SessionError::GameAlreadyOver);
        }
        if self.turns_left == 0 {
            return Err(SessionError::NoTurnsLeft);
        }

        let outcome = match self.board.resolve_guess(row, col)? {
            GuessResult::AlreadyGuessed => GuessOutcome::AlreadyGuessed,
            GuessResult::Hit { all_sunk: true, .. } => {
                self.finish(GameStatus::Won);
                GuessOutcome::Win
            }
            GuessResult::Hit { sunk, .. } => GuessOutcome::Hit { sunk },
            GuessResult::Miss => {
                self.turns_left -= 1;
                if self.turns_left == 0 {
                    self.finish(GameStatus::Lost);
                    GuessOutcome::Loss
                } else {
                    GuessOutcome::Miss
                }
            }
        };

        let remaining_ships = if outcome == GuessOutcome::Loss {
            self.board.remaining_ship_cells()
        } else {
            Vec::new()
        };
        Ok(SessionOutcome {
            outcome,
            turns_left: self.turns_left,
            elapsed_secs: self.elapsed_secs(),
            remaining_ships,
        })
    }

    /// Point at one random cell still holding a ship segment.
    pub fn hint(&mut self) -> Hint {
        let cells = self.board.remaining_ship_cells();
        if cells.is_empty() {
            return Hint::NoShipsLeft;
        }
        Hint::Ship(cells[self.rng.random_range(0..cells.len())])
    }

    /// Throw the current game away and start over with the same config.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.board = place_ships(
            &mut self.rng,
            self.config.size,
            self.config.ship_count,
            self.config.ship_length,
        )?;
        self.turns_left = self.config.turn_budget;
        self.status = GameStatus::InProgress;
        self.finished_after = None;
        self.clock.restart();
        debug!("session reset");
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            turns_left: self.turns_left,
            elapsed_secs: self.elapsed_secs(),
            view: self.board.player_view(),
        }
    }

    fn finish(&mut self, status: GameStatus) {
        let elapsed = self.clock.elapsed();
        self.status = status;
        self.finished_after = Some(elapsed);
        info!("game {:?} after {} seconds", status, elapsed.as_secs());
        if status == GameStatus::Won {
            if let Some(recorder) = self.recorder.as_mut() {
                recorder.record(elapsed.as_secs());
            }
        }
    }
}

#[cfg(feature = "std")]
impl GameSession<crate::clock::SystemClock> {
    /// Start a game on the wall clock with an OS-seeded random source.
    pub fn start(config: GameConfig) -> Result<Self, SessionError> {
        use rand::SeedableRng;
        let rng = SmallRng::from_rng(&mut rand::rng());
        Self::new(config, rng, crate::clock::SystemClock::new())
    }
}

impl<C: Clock> fmt::Debug for GameSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("turns_left", &self.turns_left)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ship::Orientation;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicU64, Ordering};
    use rand::SeedableRng;

    fn one_ship_session(turn_budget: u32, clock: ManualClock) -> GameSession<ManualClock> {
        let config = GameConfig {
            ship_count: 1,
            turn_budget,
            ..GameConfig::default()
        };
        let mut board = Board::new(5).unwrap();
        board.place(0, 0, Orientation::Horizontal, 3).unwrap();
        GameSession::with_board(config, board, SmallRng::seed_from_u64(1), clock).unwrap()
    }

    struct LastScore(Arc<AtomicU64>);

    impl ScoreRecorder for LastScore {
        fn record(&mut self, elapsed_secs: u64) {
            self.0.store(elapsed_secs, Ordering::SeqCst);
        }
    }

    #[test]
    fn win_freezes_clock_and_records_score() {
        let clock = ManualClock::new();
        let recorded = Arc::new(AtomicU64::new(u64::MAX));
        let mut session =
            one_ship_session(7, clock.clone()).with_recorder(LastScore(recorded.clone()));

        session.guess(0, 0).unwrap();
        clock.advance(Duration::from_secs(12));
        session.guess(0, 1).unwrap();
        let out = session.guess(0, 2).unwrap();
        assert_eq!(out.outcome, GuessOutcome::Win);
        assert_eq!(out.elapsed_secs, 12);
        assert_eq!(recorded.load(Ordering::SeqCst), 12);

        clock.advance(Duration::from_secs(30));
        assert_eq!(session.elapsed_secs(), 12);
    }

    #[test]
    fn loss_is_not_recorded() {
        let recorded = Arc::new(AtomicU64::new(u64::MAX));
        let mut session =
            one_ship_session(1, ManualClock::new()).with_recorder(LastScore(recorded.clone()));
        assert_eq!(session.guess(4, 4).unwrap().outcome, GuessOutcome::Loss);
        assert_eq!(recorded.load(Ordering::SeqCst), u64::MAX);
    }

    #[test]
    fn out_of_range_guess_changes_nothing() {
        let mut session = one_ship_session(7, ManualClock::new());
        assert_eq!(
            session.guess(5, 0).unwrap_err(),
            SessionError::OutOfRange { row: 5, col: 0 }
        );
        assert_eq!(session.turns_left(), 7);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn reset_restores_budget_and_clock() {
        let clock = ManualClock::new();
        let mut session = one_ship_session(1, clock.clone());
        clock.advance(Duration::from_secs(5));
        session.guess(4, 4).unwrap();
        assert!(session.is_over());

        session.reset().unwrap();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.turns_left(), 1);
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.board().ship_cell_count(), 3);
    }

    #[test]
    fn snapshot_hides_ships() {
        let mut session = one_ship_session(7, ManualClock::new());
        session.guess(0, 0).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.view[0][0], Cell::Hit);
        assert_eq!(snap.view[0][1], Cell::Unknown);
        assert_eq!(snap.view.len(), 5);
        assert_eq!(snap.view, session.board().player_view());
    }

    #[test]
    fn board_fleet_must_match_config() {
        let mut board = Board::new(5).unwrap();
        board.place(0, 0, Orientation::Horizontal, 2).unwrap();
        let config = GameConfig {
            ship_count: 1,
            ..GameConfig::default()
        };
        let err = GameSession::with_board(
            config,
            board.clone(),
            SmallRng::seed_from_u64(0),
            ManualClock::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidConfig("board fleet does not match the configured ships")
        );

        // right length, wrong count
        board.place(2, 0, Orientation::Horizontal, 2).unwrap();
        let config = GameConfig {
            ship_length: 2,
            ..config
        };
        assert!(GameSession::with_board(
            config,
            board.clone(),
            SmallRng::seed_from_u64(0),
            ManualClock::new(),
        )
        .is_err());

        let config = GameConfig {
            ship_count: 2,
            ..config
        };
        let mut session =
            GameSession::with_board(config, board, SmallRng::seed_from_u64(0), ManualClock::new())
                .unwrap();
        session.reset().unwrap();
        assert_eq!(session.board().ships().len(), 2);
        assert!(session.board().ships().iter().all(|s| s.length() == 2));
    }

    #[test]
    fn mismatched_board_is_rejected() {
        let board = Board::new(4).unwrap();
        let err = GameSession::with_board(
            GameConfig::default(),
            board,
            SmallRng::seed_from_u64(0),
            ManualClock::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfig(_)));
    }
}
