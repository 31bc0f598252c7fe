//! App Configuration
//!
//! Where data and logs live and which storage key holds the idea blob.
//! Read from an optional JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::repository::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Used for the log file name
    pub app_name: String,
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub db_file: String,
    pub storage_key: String,
    /// Start the rolling file logger on open
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Joggle".to_string(),
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("joggle"),
            db_file: "joggle.db".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Config rooted at `data_dir`, other fields default
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Read `path`; a missing or malformed file gives the defaults
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed config {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.db_path().ends_with("joggle/joggle.db"));
        assert!(config.log_to_file);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_dir":"/tmp/joggle-test","log_to_file":false}"#).unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/joggle-test"));
        assert!(!config.log_to_file);
        assert_eq!(config.db_file, "joggle.db");
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/joggle-test/logs"));
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(&dir.path().join("absent.json")), AppConfig::default());

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }
}
