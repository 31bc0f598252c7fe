//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use chrono::{DateTime, Utc};
use crate::domain::{DomainResult, IdeasState};

/// Local key-value persistence (the device storage collaborator)
pub trait KeyValueStore {
    /// Read the blob stored under `key`
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;
}

/// Whole-state persistence for the idea store
pub trait StateRepository {
    /// Load the persisted state.
    ///
    /// Never fails: missing or unreadable data yields an empty state that
    /// still contains the "All" folder.
    fn load(&self, now: DateTime<Utc>) -> IdeasState;

    /// Persist the full state
    fn save(&self, state: &IdeasState) -> DomainResult<()>;
}
