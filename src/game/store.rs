//! State store contract and an in-memory implementation
//!
//! The coordinator only needs two primitives from a store: read the current
//! snapshot together with a version token, and write a new snapshot on the
//! condition that the version has not moved since that read.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::state::{MatchId, MatchState};
use crate::error::StoreError;

/// Version token handed out with every read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version(u64);

impl Version {
    pub const INITIAL: Version = Version(1);

    #[inline]
    pub fn next(self) -> Version {
        Version(self.0 + 1)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A value paired with the version it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: Version,
    pub value: T,
}

/// Compare-and-commit storage for match snapshots
pub trait MatchStore: Send + Sync {
    /// Read the current snapshot with its version token
    fn load(&self, id: &MatchId) -> Result<Versioned<MatchState>, StoreError>;

    /// Store a new match. Fails with `AlreadyExists` if the id is taken.
    fn insert(&self, id: &MatchId, state: MatchState) -> Result<Version, StoreError>;

    /// Replace the snapshot if its version is still `expected`,
    /// otherwise fail with `Conflict` and leave the stored snapshot alone.
    fn commit(
        &self,
        id: &MatchId,
        expected: Version,
        state: MatchState,
    ) -> Result<Version, StoreError>;
}

/// Process-local store guarded by a reader-writer lock
#[derive(Debug, Default)]
pub struct InMemoryStore {
    matches: RwLock<HashMap<MatchId, Versioned<MatchState>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored matches
    pub fn len(&self) -> Result<usize, StoreError> {
        let matches = self.matches.read().map_err(poisoned)?;
        Ok(matches.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("match table lock poisoned".to_string())
}

impl MatchStore for InMemoryStore {
    fn load(&self, id: &MatchId) -> Result<Versioned<MatchState>, StoreError> {
        let matches = self.matches.read().map_err(poisoned)?;
        matches
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn insert(&self, id: &MatchId, state: MatchState) -> Result<Version, StoreError> {
        let mut matches = self.matches.write().map_err(poisoned)?;
        if matches.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.clone()));
        }
        matches.insert(
            id.clone(),
            Versioned {
                version: Version::INITIAL,
                value: state,
            },
        );
        Ok(Version::INITIAL)
    }

    fn commit(
        &self,
        id: &MatchId,
        expected: Version,
        state: MatchState,
    ) -> Result<Version, StoreError> {
        let mut matches = self.matches.write().map_err(poisoned)?;
        let slot = matches
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if slot.version != expected {
            return Err(StoreError::Conflict);
        }
        slot.version = slot.version.next();
        slot.value = state;
        Ok(slot.version)
    }
}
