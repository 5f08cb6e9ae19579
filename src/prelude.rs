//! Commonly used types and utilities for ease of import.

pub use crate::{
    place_ships, Board, Cell, Clock, Coord, GameConfig, GameSession, GameStatus, GuessOutcome,
    Hint, ManualClock, Orientation, ScoreRecorder, SessionError, SessionOutcome,
};

#[cfg(feature = "std")]
pub use crate::{spawn_session, GameApi, ScoreLedger, Scores, SessionHandle, SystemClock};
