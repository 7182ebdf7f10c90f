//! Renju rule engine and move coordination
//!
//! Two-player Renju on a 15x15 board:
//! - Five in a row wins; for Black it must be exactly five
//! - Black may not play an overline (six or more), a double-four or a
//!   double-three; White is unrestricted and wins with five or more
//! - Every move is arbitrated by a single coordinator that reads the match
//!   snapshot, evaluates the move against it and commits only if nobody
//!   else committed in between
//!
//! # Architecture
//!
//! - [`board`]: immutable board snapshots backed by bitboards
//! - [`rules`]: line scanning, win detection and forbidden-move detection
//! - [`game`]: match state, versioned stores, the coordinator and archives
//! - [`config`]: coordinator settings from the environment
//! - [`error`]: rejection and failure types
//!
//! # Quick Start
//!
//! ```
//! use renju::{CoordinatorError, InMemoryStore, MatchId, MoveCoordinator, MoveError, PlayerId};
//!
//! let coordinator = MoveCoordinator::new(InMemoryStore::new());
//! let room = MatchId::new("room-1");
//! let (alice, bob) = (PlayerId::new("alice"), PlayerId::new("bob"));
//!
//! coordinator.create_match(room.clone(), alice.clone()).unwrap();
//! coordinator.join_match(&room, bob.clone()).unwrap();
//!
//! // Black opens in the center
//! let state = coordinator.apply_move(&room, &alice, 112).unwrap();
//! assert_eq!(state.moves().len(), 1);
//!
//! // Out of turn
//! assert_eq!(
//!     coordinator.apply_move(&room, &alice, 113),
//!     Err(CoordinatorError::Rejected(MoveError::NotYourTurn)),
//! );
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;

// Re-exports for convenience
pub use board::{Board, Color, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
pub use config::CoordinatorConfig;
pub use error::{
    BoardError, CoordinatorError, MoveError, ParseBoardError, ReviewError, SeatError, StoreError,
};
pub use game::{
    replay, InMemoryStore, MatchId, MatchRecord, MatchState, MatchStatus, MatchStore,
    MoveCoordinator, Outcome, PlayerId,
};
pub use rules::ForbiddenReason;
