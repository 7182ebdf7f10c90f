//! Line scanning shared by the win and forbidden-move checks
//!
//! Two views of the board through a cell along one axis:
//! - [`run_length`]: contiguous same-color stones through the cell
//! - [`scan_line`]: the whole bounded line, edge to edge, with the cell marked

use std::ops::Range;

use crate::board::{Board, Pos, Stone, BOARD_SIZE};

/// The four line axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// Unit step `(dr, dc)` along this axis
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Length of the contiguous run of `stone` through `pos` along `dir`.
///
/// The cell at `pos` counts as `stone` whatever it holds, so this can be
/// asked both before and after the stone is placed.
pub fn run_length(board: &Board, pos: Pos, stone: Stone, dir: Direction) -> usize {
    let (dr, dc) = dir.delta();
    let mut count = 1;
    for sign in [1, -1] {
        let mut step = 1;
        while let Some(next) = pos.offset(dr * sign, dc * sign, step) {
            if board.stone_at(next) != stone {
                break;
            }
            count += 1;
            step += 1;
        }
    }
    count
}

/// Every cell along one axis through a point, from board edge to board edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// First cell of the line (on the board edge)
    start: Pos,
    dir: Direction,
    cells: Vec<Stone>,
    /// Index of the scanned cell within `cells`
    origin: usize,
}

impl Line {
    #[inline]
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    #[inline]
    pub fn origin(&self) -> usize {
        self.origin
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Board position of the `i`-th cell of the line
    #[inline]
    pub fn pos_at(&self, i: usize) -> Pos {
        let (dr, dc) = self.dir.delta();
        Pos::new(
            (self.start.row as i32 + dr * i as i32) as u8,
            (self.start.col as i32 + dc * i as i32) as u8,
        )
    }

    /// Contiguous run of `stone` around index `at`, treating `at` itself as `stone`
    pub fn run_around(&self, at: usize, stone: Stone) -> Range<usize> {
        run_in(&self.cells, at, stone)
    }
}

/// Contiguous run of `stone` around `at` in `cells`, counting `cells[at]` as `stone`
pub(crate) fn run_in(cells: &[Stone], at: usize, stone: Stone) -> Range<usize> {
    let mut lo = at;
    while lo > 0 && cells[lo - 1] == stone {
        lo -= 1;
    }
    let mut hi = at + 1;
    while hi < cells.len() && cells[hi] == stone {
        hi += 1;
    }
    lo..hi
}

/// Extract the full line through `pos` along `dir`.
///
/// Only on-board cells are included, so a diagonal through a corner is
/// a single cell and a row is always 15 cells.
pub fn scan_line(board: &Board, pos: Pos, dir: Direction) -> Line {
    let (dr, dc) = dir.delta();

    let mut back = 0;
    while pos.offset(-dr, -dc, back + 1).is_some() {
        back += 1;
    }
    let start = pos.offset(-dr, -dc, back).unwrap_or(pos);

    let mut cells = Vec::with_capacity(BOARD_SIZE);
    let mut step = 0;
    while let Some(cell) = start.offset(dr, dc, step) {
        cells.push(board.stone_at(cell));
        step += 1;
    }

    Line {
        start,
        dir,
        cells,
        origin: back as usize,
    }
}
