//! Board representation for Renju

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Symbol used by the flat board serialization
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::Empty => '.',
            Stone::Black => 'B',
            Stone::White => 'W',
        }
    }

    #[inline]
    pub fn from_symbol(symbol: char) -> Option<Stone> {
        match symbol {
            '.' => Some(Stone::Empty),
            'B' => Some(Stone::Black),
            'W' => Some(Stone::White),
            _ => None,
        }
    }
}

/// Seat color of a player. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    #[inline]
    pub fn stone(self) -> Stone {
        match self {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        color.stone()
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor from a row/column pair
    #[inline]
    pub fn from_coord(row: usize, col: usize) -> Result<Self, BoardError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self::new(row as u8, col as u8))
        } else {
            Err(BoardError::OutOfRange(row.saturating_mul(BOARD_SIZE).saturating_add(col)))
        }
    }

    /// Checked constructor from a flat cell index (`row * 15 + col`)
    #[inline]
    pub fn try_from_index(idx: usize) -> Result<Self, BoardError> {
        if idx < TOTAL_CELLS {
            Ok(Self::from_index(idx))
        } else {
            Err(BoardError::OutOfRange(idx))
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < TOTAL_CELLS);
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    /// `(row, col)` of this position
    #[inline]
    pub fn to_coord(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Step `steps` cells along `(dr, dc)`, or `None` when that leaves the board
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, steps: i32) -> Option<Pos> {
        let r = self.row as i32 + dr * steps;
        let c = self.col as i32 + dc * steps;
        if Pos::is_valid(r, c) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
