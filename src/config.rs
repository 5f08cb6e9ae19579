use crate::bitboard::BitBoard;
use crate::board::Word;

pub const BOARD_SIZE: usize = 5;
pub const NUM_SHIPS: usize = 3;
pub const SHIP_LENGTH: usize = 3;
pub const TURN_BUDGET: u32 = 7;

/// Number of scores kept in the high-score ledger.
pub const MAX_SCORES: usize = 5;

/// Default file backing the high-score ledger, relative to the working directory.
pub const SCORES_FILE: &str = "high_scores.json";

/// Rejected random samples tolerated per ship before placement falls back to
/// enumerating every open slot.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Parameters fixed for the lifetime of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub size: usize,
    pub ship_count: usize,
    pub ship_length: usize,
    pub turn_budget: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            ship_count: NUM_SHIPS,
            ship_length: SHIP_LENGTH,
            turn_budget: TURN_BUDGET,
        }
    }
}

impl GameConfig {
    /// Total number of ship segments on the board, `None` on overflow.
    pub fn total_ship_cells(&self) -> Option<usize> {
        self.ship_count.checked_mul(self.ship_length)
    }

    /// Check the configuration can produce a playable board.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.size == 0 {
            return Err("board size must be at least 1");
        }
        if self.size > BitBoard::<Word>::max_size() {
            return Err("board size does not fit the board storage");
        }
        if self.ship_length == 0 {
            return Err("ship length must be at least 1");
        }
        if self.ship_length > self.size {
            return Err("ship length exceeds board size");
        }
        // size is bounded above, so size * size cannot overflow here
        match self.total_ship_cells() {
            Some(cells) if cells <= self.size * self.size => {}
            _ => return Err("ships do not fit on the board"),
        }
        if self.turn_budget == 0 {
            return Err("turn budget must be at least 1");
        }
        Ok(())
    }
}
