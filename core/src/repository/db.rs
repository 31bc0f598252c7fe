//! Database Connection and Setup
//!
//! SQLite-backed key-value table used as local device storage.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

fn storage_err(e: rusqlite::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Open the database at `db_path` and run migrations
pub fn init_db(db_path: &Path) -> DomainResult<Connection> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Storage(format!("Failed to open db: {}", e)))?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(storage_err)?;
    Ok(())
}

pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(db_path: &Path) -> DomainResult<Self> {
        Ok(Self::new(init_db(db_path)?))
    }

    pub fn in_memory() -> DomainResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        run_migrations(&conn)?;
        Ok(Self::new(conn))
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(storage_err)
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)",
                params![key, value, chrono::Utc::now().timestamp_millis()],
            )
            .map_err(storage_err)?;
        Ok(())
    }
}
