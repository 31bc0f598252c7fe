//! Joggle Core
//!
//! Layered architecture:
//! - domain: Core entities and invariants
//! - repository: Local persistence abstractions and implementations
//! - store: Idea organizer and focus task list state
//!
//! Drag reordering lives in the `reorder-dnd` crate; logging in
//! `rolling-logger`.

use std::fs;

pub mod config;
pub mod domain;
pub mod repository;
pub mod store;

pub use config::AppConfig;
pub use reorder_dnd::{DragCursor, DragSession, DropTarget, HoverAction};

use domain::{DomainError, DomainResult};
use repository::{IdeasRepository, SqliteKvStore};
use store::IdeaStore;

/// Idea store backed by the on-device SQLite key-value table
pub type AppIdeaStore = IdeaStore<IdeasRepository<SqliteKvStore>>;

/// Prepare the data dir, start logging and load the idea store
pub fn open(config: &AppConfig) -> DomainResult<AppIdeaStore> {
    fs::create_dir_all(&config.data_dir).map_err(|e| {
        DomainError::Storage(format!(
            "Failed to create {}: {}",
            config.data_dir.display(),
            e
        ))
    })?;

    if config.log_to_file {
        // Logging is best effort; the app works without it
        if let Err(e) = rolling_logger::init_logger(config.log_dir(), &config.app_name) {
            eprintln!("[{}] Logger not started: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
        }
    }

    let kv = SqliteKvStore::open(&config.db_path())?;
    let repo = IdeasRepository::with_key(kv, &config.storage_key);
    let store = IdeaStore::open(repo);
    log::info!("Opened {}", config.db_path().display());
    Ok(store)
}
