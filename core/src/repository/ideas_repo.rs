//! Ideas Repository
//!
//! Stores the whole `IdeasState` as one JSON blob under a fixed key.

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::traits::{KeyValueStore, StateRepository};
use crate::domain::{DomainError, DomainResult, IdeasState};

/// Storage key of the idea organizer blob
pub const DEFAULT_STORAGE_KEY: &str = "joggle_ideas_state_v1";

pub struct IdeasRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> IdeasRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> StateRepository for IdeasRepository<S> {
    fn load(&self, now: DateTime<Utc>) -> IdeasState {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored ideas state under {}, starting empty", self.key);
                return IdeasState::empty(now);
            }
            Err(e) => {
                warn!("Failed to read ideas state, starting empty: {}", e);
                return IdeasState::empty(now);
            }
        };

        match serde_json::from_str::<IdeasState>(&raw) {
            Ok(mut state) => {
                for note in state.repair(now) {
                    warn!("Repaired stored ideas state: {}", note);
                }
                state
            }
            Err(e) => {
                warn!("Discarding malformed ideas state: {}", e);
                IdeasState::empty(now)
            }
        }
    }

    fn save(&self, state: &IdeasState) -> DomainResult<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize ideas state: {}", e)))?;
        self.store.set(&self.key, &json)
    }
}
