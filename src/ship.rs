//! Ship definitions and placement geometry using our `BitBoard`.

use core::fmt;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Coord};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends rightward from its origin.
    Horizontal,
    /// Extends downward from its origin.
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Cell `i` segments away from `(row, col)` in this direction.
    #[inline]
    pub fn offset(self, row: usize, col: usize, i: usize) -> Coord {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// A straight ship placed on a `size×size` board.
///
/// Ships never change shape after placement; whether a ship is sunk is
/// answered against the board's hit mask.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship<T>
where
    T: PrimInt + Unsigned + Zero,
{
    orientation: Orientation,
    row: usize,
    col: usize,
    length: usize,
    mask: BitBoard<T>,
}

impl<T> Ship<T>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Place a ship of `length` cells at (`row`, `col`) with `orientation`
    /// on a board of side `size`.
    pub fn new(
        orientation: Orientation,
        row: usize,
        col: usize,
        length: usize,
        size: usize,
    ) -> Result<Self, BoardError> {
        if row >= size || col >= size {
            return Err(BoardError::OutOfRange { row, col });
        }
        // Ensure placement fits within size×size
        if length == 0 || length > size {
            return Err(BoardError::ShipOutOfBounds);
        }
        let (end_row, end_col) = orientation.offset(row, col, length - 1);
        if end_row >= size || end_col >= size {
            return Err(BoardError::ShipOutOfBounds);
        }

        let mut mask = BitBoard::<T>::new(size)?;
        for i in 0..length {
            let (r, c) = orientation.offset(row, col, i);
            mask.set(r, c)?;
        }

        Ok(Ship {
            orientation,
            row,
            col,
            length,
            mask,
        })
    }

    /// Whether the ship covers (`row`, `col`).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// Cells covered by the ship, from its origin outward.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length).map(move |i| self.orientation.offset(self.row, self.col, i))
    }

    /// A ship is sunk once every one of its cells is in `hits`.
    pub fn is_sunk(&self, hits: &BitBoard<T>) -> bool {
        (self.mask & *hits) == self.mask
    }

    /// Number of this ship's cells not yet in `hits`.
    pub fn remaining(&self, hits: &BitBoard<T>) -> usize {
        self.length - (self.mask & *hits).count_ones()
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> Coord {
        (self.row, self.col)
    }

    /// Orientation of the ship.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of cells the ship covers.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BitBoard<T> {
        self.mask
    }
}

impl<T> fmt::Debug for Ship<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ origin: ({}, {}), orientation: {:?}, length: {} }}",
            self.row, self.col, self.orientation, self.length,
        )
    }
}
