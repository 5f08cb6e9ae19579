//! Common types for the board engine: cells, guess results and board errors.

use crate::bitboard::BitBoardError;

/// A `(row, col)` position on the board, zero-based.
pub type Coord = (usize, usize);

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Not guessed and holds no ship, or a ship hidden from the player's view.
    Unknown,
    /// Holds an unguessed ship segment. Never part of the player's view.
    Ship,
    /// Guessed, was a ship segment.
    Hit,
    /// Guessed, was open water.
    Miss,
}

impl Cell {
    /// Whether the cell has already been guessed.
    pub fn is_guessed(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }

    /// What the player is allowed to see of this cell.
    pub fn for_player(self) -> Cell {
        match self {
            Cell::Ship => Cell::Unknown,
            other => other,
        }
    }
}

/// Result of resolving a guess against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// The cell was already guessed; nothing changed.
    AlreadyGuessed,
    /// Guess hit a ship segment.
    Hit {
        /// The ship owning the segment has no segments left.
        sunk: bool,
        /// No ship segment remains anywhere on the board.
        all_sunk: bool,
    },
    /// Guess missed all ships.
    Miss,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Coordinates lie outside the board.
    OutOfRange { row: usize, col: usize },
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship would extend past the board edge.
    ShipOutOfBounds,
    /// No free slot is left for a ship of the requested length.
    UnableToPlaceShip,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => BoardError::OutOfRange { row, col },
            other => BoardError::BitBoardError(other),
        }
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::OutOfRange { row, col } => {
                write!(f, "Coordinates ({}, {}) are outside the board", row, col)
            }
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
