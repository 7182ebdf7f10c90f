//! Game rules for Renju
//!
//! This module implements the rule set:
//! - Line scanning through a placed stone
//! - Win conditions (exact five for Black, five or more for White)
//! - Forbidden moves for Black (overline, double-four, double-three)

pub mod forbidden;
pub mod line;
pub mod win;

// Re-exports for convenient access
pub use forbidden::{check_forbidden, count_fours, count_open_threes, is_overline, ForbiddenReason};
pub use line::{run_length, scan_line, Direction, Line};
pub use win::{find_winning_line, is_win};
