//! Renju forbidden move rules for Black
//!
//! Checked on the tentative board that already holds the candidate stone,
//! in this order (first hit wins):
//! 1. Overline: six or more in a row
//! 2. Double-four: two or more fours through the stone
//! 3. Double-three: two or more open threes through the stone
//!
//! White has no restrictions.
//!
//! Shapes are found by scanning the bounded line of each direction. A four
//! or three is identified by the set of stones it is made of, so a shape
//! reachable through several completion points (`.BBBB.` can be finished on
//! either side) is counted once.

use std::fmt;
use std::ops::Range;

use crate::board::{Board, Color, Pos, Stone};

use super::line::{run_in, run_length, scan_line, Direction, Line};

/// Why a Black move is forbidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenReason {
    Overline,
    DoubleFour,
    DoubleThree,
}

impl ForbiddenReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ForbiddenReason::Overline => "overline",
            ForbiddenReason::DoubleFour => "double-four",
            ForbiddenReason::DoubleThree => "double-three",
        }
    }
}

impl fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of line indices (a line has at most 15 cells)
type StoneSet = u16;

fn stone_set(run: Range<usize>, except: usize) -> StoneSet {
    run.filter(|&i| i != except).fold(0, |set: StoneSet, i| set | (1 << i))
}

fn empty_cells(cells: &[Stone]) -> impl Iterator<Item = usize> + '_ {
    cells
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == Stone::Empty)
        .map(|(i, _)| i)
}

/// If a Black stone at the empty cell `at` completes an exact five that
/// includes `origin`, the four stones that five was built from.
fn five_completed_at(cells: &[Stone], origin: usize, at: usize) -> Option<StoneSet> {
    let run = run_in(cells, at, Stone::Black);
    if run.len() == 5 && run.contains(&origin) {
        Some(stone_set(run, at))
    } else {
        None
    }
}

/// If `cells` (with `at` already filled) holds a straight four `.BBBB.`
/// through both `origin` and `at`, where each end completes an exact five,
/// the three stones it was extended from.
fn straight_four_at(cells: &[Stone], origin: usize, at: usize) -> Option<StoneSet> {
    let run = run_in(cells, at, Stone::Black);
    if run.len() != 4 || !run.contains(&origin) {
        return None;
    }
    if run.start == 0 || run.end >= cells.len() {
        return None;
    }
    let completes_five =
        |end: usize| cells[end] == Stone::Empty && run_in(cells, end, Stone::Black).len() == 5;
    if completes_five(run.start - 1) && completes_five(run.end) {
        Some(stone_set(run, at))
    } else {
        None
    }
}

/// Distinct fours through the line's origin
fn fours_in_line(line: &Line) -> Vec<StoneSet> {
    let cells = line.cells();
    let mut fours: Vec<StoneSet> = Vec::new();
    for at in empty_cells(cells) {
        if let Some(set) = five_completed_at(cells, line.origin(), at) {
            if !fours.contains(&set) {
                fours.push(set);
            }
        }
    }
    fours
}

/// Distinct open threes through the line's origin
fn threes_in_line(line: &Line) -> Vec<StoneSet> {
    let mut cells = line.cells().to_vec();
    let empties: Vec<usize> = empty_cells(line.cells()).collect();
    let mut threes: Vec<StoneSet> = Vec::new();
    for at in empties {
        cells[at] = Stone::Black;
        if let Some(set) = straight_four_at(&cells, line.origin(), at) {
            if !threes.contains(&set) {
                threes.push(set);
            }
        }
        cells[at] = Stone::Empty;
    }
    threes
}

/// Six or more Black stones in a row through `pos`
pub fn is_overline(board: &Board, pos: Pos) -> bool {
    Direction::ALL
        .iter()
        .any(|&dir| run_length(board, pos, Stone::Black, dir) > 5)
}

/// Number of fours through the Black stone at `pos`, over all directions.
///
/// A four is any four stones that one more Black stone turns into an exact
/// five: `.BBBB.`, `BBBB.`, `BBB.B`, `BB.BB` and so on.
pub fn count_fours(board: &Board, pos: Pos) -> usize {
    Direction::ALL
        .iter()
        .map(|&dir| fours_in_line(&scan_line(board, pos, dir)).len())
        .sum()
}

/// Number of open threes through the Black stone at `pos`, over all directions.
///
/// An open three is three stones (`BBB` or `BB.B`) that one more stone turns
/// into a straight four `.BBBB.` with both ends completing an exact five.
pub fn count_open_threes(board: &Board, pos: Pos) -> usize {
    Direction::ALL
        .iter()
        .map(|&dir| threes_in_line(&scan_line(board, pos, dir)).len())
        .sum()
}

/// Check the stone of `color` at `pos` against the Renju restrictions.
///
/// `board` must already contain the stone. Returns `None` when the move is
/// allowed. White is never restricted.
pub fn check_forbidden(board: &Board, pos: Pos, color: Color) -> Option<ForbiddenReason> {
    if color == Color::White {
        return None;
    }
    if is_overline(board, pos) {
        return Some(ForbiddenReason::Overline);
    }
    if count_fours(board, pos) >= 2 {
        return Some(ForbiddenReason::DoubleFour);
    }
    if count_open_threes(board, pos) >= 2 {
        return Some(ForbiddenReason::DoubleThree);
    }
    None
}
