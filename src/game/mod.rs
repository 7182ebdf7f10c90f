//! Match lifecycle and move coordination
//!
//! - [`state`]: match snapshots, seats and outcomes
//! - [`store`]: versioned compare-and-commit storage
//! - [`coordinator`]: the move arbitration loop
//! - [`record`]: archive entries and replay

pub mod coordinator;
pub mod record;
pub mod state;
pub mod store;


pub use coordinator::MoveCoordinator;
pub use record::{replay, MatchRecord};
pub use state::{MatchId, MatchState, MatchStatus, Move, Outcome, PlayerId, Seats};
pub use store::{InMemoryStore, MatchStore, Version, Versioned};
