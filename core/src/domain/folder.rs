//! Folder Entity
//!
//! Folders group ideas. Membership order is display order, newest first.
//! The virtual "All" folder never stores ideas; its content is computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed id of the virtual aggregate folder
pub const ALL_FOLDER_ID: &str = "all";
/// Fixed name of the virtual aggregate folder
pub const ALL_FOLDER_NAME: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Member idea ids, most recently created or moved first
    #[serde(default)]
    pub idea_ids: Vec<String>,
}

impl Folder {
    pub fn new(id: String, name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            idea_ids: Vec::new(),
        }
    }

    /// The virtual "All" folder
    pub fn all(now: DateTime<Utc>) -> Self {
        Self::new(ALL_FOLDER_ID.to_string(), ALL_FOLDER_NAME, now)
    }

    pub fn is_virtual_id(id: &str) -> bool {
        id == ALL_FOLDER_ID
    }

    pub fn is_virtual(&self) -> bool {
        Self::is_virtual_id(&self.id)
    }

    pub fn contains(&self, idea_id: &str) -> bool {
        self.idea_ids.iter().any(|id| id == idea_id)
    }

    /// Put an idea at the front, dropping any earlier occurrence
    pub fn prepend(&mut self, idea_id: &str) {
        self.idea_ids.retain(|id| id != idea_id);
        self.idea_ids.insert(0, idea_id.to_string());
    }

    /// Returns true if the idea was listed
    pub fn remove(&mut self, idea_id: &str) -> bool {
        let before = self.idea_ids.len();
        self.idea_ids.retain(|id| id != idea_id);
        self.idea_ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_folder() {
        let all = Folder::all(Utc::now());
        assert!(all.is_virtual());
        assert_eq!(all.name, ALL_FOLDER_NAME);
        assert!(all.idea_ids.is_empty());
    }

    #[test]
    fn test_prepend_and_remove() {
        let mut folder = Folder::new("folder_1".to_string(), "Work", Utc::now());
        folder.prepend("a");
        folder.prepend("b");
        folder.prepend("a");
        assert_eq!(folder.idea_ids, vec!["a", "b"]);
        assert!(folder.contains("b"));

        assert!(folder.remove("b"));
        assert!(!folder.remove("b"));
        assert_eq!(folder.idea_ids, vec!["a"]);
    }

    #[test]
    fn test_missing_idea_ids_defaults_to_empty() {
        let json = r#"{"id":"f","name":"Work","createdAt":"2024-05-01T09:00:00Z","updatedAt":"2024-05-01T09:00:00Z"}"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert!(folder.idea_ids.is_empty());
    }
}
