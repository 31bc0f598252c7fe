//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod memory;
mod ideas_repo;


pub use traits::{KeyValueStore, StateRepository};
pub use db::{init_db, SqliteKvStore};
pub use memory::MemoryKvStore;
pub use ideas_repo::{IdeasRepository, DEFAULT_STORAGE_KEY};
