//! Game board state: ship placement, hits and misses stored as bitboards.

use alloc::vec::Vec;
use core::fmt;

use log::debug;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Cell, Coord, GuessResult};
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::ship::{Orientation, Ship};

/// Storage word backing every board; bounds the side length to 11.
pub type Word = u128;

type BB = BitBoard<Word>;

/// A square board holding ships plus the record of every guess made on it.
///
/// A cell's state is derived from three masks: a hit bit means `Hit`, a miss
/// bit `Miss`, a ship bit `Ship`, anything else `Unknown`.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    ships: Vec<Ship<Word>>,
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// Create an empty `size×size` board (no ships placed).
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let empty = BB::new(size)?;
        Ok(Board {
            size,
            ships: Vec::new(),
            ship_map: empty,
            hits: empty,
            misses: empty,
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship<Word>] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    /// Cells guessed that held a ship.
    pub fn hits(&self) -> BB {
        self.hits
    }

    /// Cells guessed that held nothing.
    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Full state of the cell at (row, col), ships included.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        Ok(if self.hits.get(row, col)? {
            Cell::Hit
        } else if self.misses.get(row, col)? {
            Cell::Miss
        } else if self.ship_map.get(row, col)? {
            Cell::Ship
        } else {
            Cell::Unknown
        })
    }

    /// Rows of cells as the player may see them: unguessed ships stay `Unknown`.
    pub fn player_view(&self) -> Vec<Vec<Cell>> {
        (0..self.size)
            .map(|r| {
                (0..self.size)
                    .map(|c| self.cell(r, c).map(Cell::for_player).unwrap_or(Cell::Unknown))
                    .collect()
            })
            .collect()
    }

    /// Whether a ship of `length` fits at (row, col) over `Unknown` cells only.
    pub fn can_place(&self, row: usize, col: usize, orientation: Orientation, length: usize) -> bool {
        match Ship::<Word>::new(orientation, row, col, length, self.size) {
            Ok(ship) => (ship.mask() & self.taken()).is_empty(),
            Err(_) => false,
        }
    }

    /// Place a ship of `length` cells at (row, col) with `orientation`.
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        orientation: Orientation,
        length: usize,
    ) -> Result<(), BoardError> {
        let ship = Ship::<Word>::new(orientation, row, col, length, self.size)?;
        let mask = ship.mask();
        // ensure no overlap with ships or already guessed cells
        if !(self.taken() & mask).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map |= mask;
        self.ships.push(ship);
        debug!("placed {:?}", ship);
        Ok(())
    }

    /// Every (row, col, orientation) where a ship of `length` could go.
    pub fn open_slots(&self, length: usize) -> Vec<(usize, usize, Orientation)> {
        let mut slots = Vec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                for orient in Orientation::ALL {
                    if self.can_place(r, c, orient, length) {
                        slots.push((r, c, orient));
                    }
                }
            }
        }
        slots
    }

    /// Returns a random non‐overlapping (row, col, Orientation) for a ship of `length`.
    ///
    /// Samples a start cell and a direction uniformly and rejects placements
    /// that leave the board or touch a taken cell. After
    /// `MAX_PLACEMENT_ATTEMPTS` rejections it picks uniformly among the open
    /// slots instead, failing only when there are none.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        if self.size == 0 {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let r = rng.random_range(0..self.size);
            let c = rng.random_range(0..self.size);
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            if self.can_place(r, c, orient, length) {
                return Ok((r, c, orient));
            }
        }
        debug!(
            "rejection sampling gave up after {} attempts, enumerating slots",
            MAX_PLACEMENT_ATTEMPTS
        );
        let slots = self.open_slots(length);
        if slots.is_empty() {
            return Err(BoardError::UnableToPlaceShip);
        }
        Ok(slots[rng.random_range(0..slots.len())])
    }

    /// Process a guess at (row, col), marking hits/misses and reporting result.
    pub fn resolve_guess(&mut self, row: usize, col: usize) -> Result<GuessResult, BoardError> {
        let result = match self.cell(row, col)? {
            Cell::Hit | Cell::Miss => GuessResult::AlreadyGuessed,
            Cell::Ship => {
                self.hits.set(row, col)?;
                let sunk = self
                    .ships
                    .iter()
                    .find(|s| s.contains(row, col))
                    .is_some_and(|s| s.is_sunk(&self.hits));
                GuessResult::Hit {
                    sunk,
                    all_sunk: self.all_sunk(),
                }
            }
            Cell::Unknown => {
                self.misses.set(row, col)?;
                GuessResult::Miss
            }
        };
        debug!("guess ({}, {}) -> {:?}", row, col, result);
        Ok(result)
    }

    /// Unguessed ship cells, in row-major order.
    pub fn remaining_ship_cells(&self) -> Vec<Coord> {
        self.remaining().iter_set_bits().collect()
    }

    /// Number of unguessed ship cells.
    pub fn ship_cell_count(&self) -> usize {
        self.remaining().count_ones()
    }

    /// Returns `true` when no `Ship` cell is left anywhere on the board.
    pub fn all_sunk(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Number of ships with every segment hit.
    pub fn sunk_ships(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk(&self.hits)).count()
    }

    fn remaining(&self) -> BB {
        self.ship_map & !self.hits
    }

    fn taken(&self) -> BB {
        self.ship_map | self.hits | self.misses
    }
}

/// Build a `size×size` board and place `ship_count` straight ships of
/// `ship_length` cells at random.
///
/// Keep `ship_count * ship_length` comfortably below `size²`: dense layouts
/// exhaust rejection sampling and may leave no open slot for later ships.
pub fn place_ships<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    ship_count: usize,
    ship_length: usize,
) -> Result<Board, BoardError> {
    let mut board = Board::new(size)?;
    for _ in 0..ship_count {
        let (r, c, orient) = board.random_placement(rng, ship_length)?;
        board.place(r, c, orient, ship_length)?;
    }
    Ok(board)
}

/// Renders the player view: column letters across, 1-based rows down.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_view(f, &self.player_view())
    }
}

pub(crate) fn render_view(f: &mut fmt::Formatter<'_>, view: &[Vec<Cell>]) -> fmt::Result {
    write!(f, "   ")?;
    for c in 0..view.len() {
        write!(f, " {}", (b'A' + c as u8) as char)?;
    }
    for (r, row) in view.iter().enumerate() {
        write!(f, "\n{:2} ", r + 1)?;
        for cell in row {
            let ch = match cell {
                Cell::Hit => 'X',
                Cell::Miss => 'o',
                _ => '.',
            };
            write!(f, " {}", ch)?;
        }
    }
    Ok(())
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.hits, self.misses, self.ships
        )
    }
}
