//! Immutable board snapshot

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::{Color, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::{BoardError, ParseBoardError};

/// Snapshot of all 225 cells.
///
/// Boards are values: `place` never touches `self` and returns a new
/// snapshot that differs in exactly one cell. The serialized form is the
/// flat row-major string of 225 symbols (`.`, `B`, `W`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
}

impl Board {
    /// All-empty board
    pub const fn empty() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Get stone at a flat cell index
    #[inline]
    pub fn get(&self, idx: usize) -> Result<Stone, BoardError> {
        Pos::try_from_index(idx).map(|pos| self.stone_at(pos))
    }

    /// Get stone at position
    #[inline]
    pub fn stone_at(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// New board with a `color` stone at `idx`.
    ///
    /// Fails with `OutOfRange` for an index off the board and with
    /// `CellOccupied` when the target cell already holds a stone.
    pub fn place(&self, idx: usize, color: Color) -> Result<Board, BoardError> {
        let pos = Pos::try_from_index(idx)?;
        if !self.is_empty(pos) {
            return Err(BoardError::CellOccupied(idx));
        }
        let mut next = *self;
        match color {
            Color::Black => next.black.set(pos),
            Color::White => next.white.set(pos),
        }
        debug_assert!(next.black.is_disjoint(&next.white));
        Ok(next)
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// True once every cell holds a stone
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Stone> + '_ {
        (0..TOTAL_CELLS).map(|idx| self.stone_at(Pos::from_index(idx)))
    }

    /// Flat 225-symbol representation
    pub fn serialize(&self) -> String {
        self.cells().map(Stone::symbol).collect()
    }

    /// Parse the flat 225-symbol representation
    pub fn deserialize(s: &str) -> Result<Board, ParseBoardError> {
        let len = s.chars().count();
        if len != TOTAL_CELLS {
            return Err(ParseBoardError::InvalidLength(len));
        }
        let mut board = Board::empty();
        for (index, symbol) in s.chars().enumerate() {
            let pos = Pos::from_index(index);
            match Stone::from_symbol(symbol) {
                Some(Stone::Black) => board.black.set(pos),
                Some(Stone::White) => board.white.set(pos),
                Some(Stone::Empty) => {}
                None => return Err(ParseBoardError::InvalidSymbol { index, symbol }),
            }
        }
        Ok(board)
    }

    /// Multi-line grid rendering with row/column labels (for logs and the CLI)
    pub fn to_grid(&self) -> String {
        let mut out = String::from("   ");
        for c in 0..BOARD_SIZE {
            out.push_str(&format!("{:2}", c));
        }
        out.push('\n');
        for r in 0..BOARD_SIZE {
            out.push_str(&format!("{:2} ", r));
            for c in 0..BOARD_SIZE {
                out.push(' ');
                out.push(self.stone_at(Pos::new(r as u8, c as u8)).symbol());
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::deserialize(s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.serialize()
    }
}

impl TryFrom<String> for Board {
    type Error = ParseBoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Board::deserialize(&s)
    }
}
