//! Match state owned by the coordinator

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::error::SeatError;

/// Identifier of a match (the room it is played in)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque actor identity, resolved by an external identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two seats of a match, each bound to at most one actor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    #[serde(rename = "B")]
    pub black: Option<PlayerId>,
    #[serde(rename = "W")]
    pub white: Option<PlayerId>,
}

impl Seats {
    /// Seat color held by `actor`, if any
    pub fn color_of(&self, actor: &PlayerId) -> Option<Color> {
        if self.black.as_ref() == Some(actor) {
            Some(Color::Black)
        } else if self.white.as_ref() == Some(actor) {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn player(&self, color: Color) -> Option<&PlayerId> {
        match color {
            Color::Black => self.black.as_ref(),
            Color::White => self.white.as_ref(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.black.is_some() && self.white.is_some()
    }
}

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Waiting for the second player
    Waiting,
    /// Both seats filled, moves accepted
    Playing,
    /// Terminal: outcome recorded, no further moves
    Finished,
}

/// Result of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "B")]
    BlackWins,
    #[serde(rename = "W")]
    WhiteWins,
    #[serde(rename = "draw")]
    Draw,
}

impl Outcome {
    pub fn win_for(color: Color) -> Outcome {
        match color {
            Color::Black => Outcome::BlackWins,
            Color::White => Outcome::WhiteWins,
        }
    }

    /// Winning color, `None` for a draw
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::BlackWins => Some(Color::Black),
            Outcome::WhiteWins => Some(Color::White),
            Outcome::Draw => None,
        }
    }
}

/// A committed stone placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Flat cell index (`row * 15 + col`)
    pub cell: usize,
    pub color: Color,
    /// 1-based, strictly increasing
    pub seq: u32,
}

/// Snapshot of one match.
///
/// Only the coordinator produces new snapshots; everyone else reads them.
/// `moves` is the append-only log that `board` can be rebuilt from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) moves: Vec<Move>,
    pub(crate) status: MatchStatus,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) seats: Seats,
    /// Cells of the winning run once a move wins
    pub(crate) winning_line: Option<Vec<usize>>,
}

impl MatchState {
    /// A fresh match with the Black seat taken, waiting for an opponent
    pub fn new(black: PlayerId) -> Self {
        Self {
            board: Board::empty(),
            turn: Color::Black,
            moves: Vec::new(),
            status: MatchStatus::Waiting,
            outcome: None,
            seats: Seats {
                black: Some(black),
                white: None,
            },
            winning_line: None,
        }
    }

    /// Snapshot with the White seat filled and play started
    pub fn seat_white(&self, white: PlayerId) -> Result<MatchState, SeatError> {
        if self.seats.color_of(&white).is_some() {
            return Err(SeatError::AlreadySeated);
        }
        if self.status == MatchStatus::Finished {
            return Err(SeatError::NotWaiting);
        }
        if self.seats.white.is_some() {
            return Err(SeatError::MatchFull);
        }
        let mut next = self.clone();
        next.seats.white = Some(white);
        next.status = MatchStatus::Playing;
        Ok(next)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Color expected to move next
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    pub fn winning_line(&self) -> Option<&[usize]> {
        self.winning_line.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }
}
