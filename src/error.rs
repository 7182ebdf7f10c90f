//! Error types
//!
//! Every variant here is a local, recoverable rejection. A rejected move or
//! seat request leaves the stored match untouched.

use thiserror::Error;

use crate::game::MatchId;
use crate::rules::ForbiddenReason;

/// Indexing and placement failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),
}

/// Failures parsing the flat board representation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("board must have 225 cells, got {0}")]
    InvalidLength(usize),

    #[error("invalid symbol {symbol:?} at cell {index}")]
    InvalidSymbol { index: usize, symbol: char },
}

/// Why a move request was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("cell {0} is outside the board")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("actor holds neither seat")]
    NotAPlayer,

    #[error("not your turn")]
    NotYourTurn,

    #[error("game is not active")]
    GameNotActive,

    #[error("forbidden move: {0}")]
    ForbiddenMove(ForbiddenReason),
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfRange(idx) => MoveError::OutOfRange(idx),
            BoardError::CellOccupied(idx) => MoveError::CellOccupied(idx),
        }
    }
}

/// Why a seat request was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatError {
    #[error("both seats are taken")]
    MatchFull,

    #[error("player already holds a seat in this match")]
    AlreadySeated,

    #[error("match is not waiting for players")]
    NotWaiting,
}

/// Why a review of a finished match was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("no winner to review a drawn match")]
    NoWinner,

    #[error("only the winner can review")]
    NotWinner,

    #[error("review too long: {0} characters")]
    TooLong(usize),
}

/// Failures reported by a state store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The snapshot changed since it was read (concurrent modification)
    #[error("snapshot changed since it was read")]
    Conflict,

    #[error("match {0} not found")]
    NotFound(MatchId),

    #[error("match {0} already exists")]
    AlreadyExists(MatchId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced to callers of the coordinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error(transparent)]
    Rejected(#[from] MoveError),

    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error("match {0} not found")]
    NotFound(MatchId),

    #[error("match {0} already exists")]
    AlreadyExists(MatchId),

    #[error("match store unavailable: {0}")]
    Unavailable(String),
}

impl CoordinatorError {
    /// The rule rejection carried by this error, if any
    pub fn as_rejection(&self) -> Option<&MoveError> {
        match self {
            CoordinatorError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
