//! Win condition checking for Renju
//!
//! Win conditions are asymmetric:
//! - Black wins only with exactly five in a row (six or more is an overline)
//! - White wins with five or more in a row

use crate::board::{Board, Color, Pos};

use super::line::{run_length, scan_line, Direction};

/// Whether `len` contiguous stones of `color` is a winning run
#[inline]
fn is_winning_run(len: usize, color: Color) -> bool {
    match color {
        Color::Black => len == 5,
        Color::White => len >= 5,
    }
}

/// Check whether the stone of `color` just placed at `pos` wins.
///
/// Only the four lines through `pos` are inspected.
pub fn is_win(board: &Board, pos: Pos, color: Color) -> bool {
    Direction::ALL
        .iter()
        .any(|&dir| is_winning_run(run_length(board, pos, color.stone(), dir), color))
}

/// Find the cells of the winning run through `pos`, if the move wins.
///
/// Returns the whole run, so White's overline yields six or more cells.
pub fn find_winning_line(board: &Board, pos: Pos, color: Color) -> Option<Vec<Pos>> {
    Direction::ALL.iter().find_map(|&dir| {
        let line = scan_line(board, pos, dir);
        let run = line.run_around(line.origin(), color.stone());
        if is_winning_run(run.len(), color) {
            Some(run.map(|i| line.pos_at(i)).collect())
        } else {
            None
        }
    })
}
