//! Idea Entity
//!
//! A captured idea. Owned by exactly one real folder at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when an idea is saved with a blank title
pub const UNTITLED_IDEA: &str = "Untitled idea";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Unique identifier
    pub id: String,
    pub title: String,
    /// Free text body, may be empty
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    pub fn new(id: String, title: &str, content: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: Self::normalize_title(title),
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Trimmed title, or the placeholder when nothing is left
    pub fn normalize_title(title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            UNTITLED_IDEA.to_string()
        } else {
            title.to_string()
        }
    }

    pub fn edit(&mut self, title: &str, content: &str, now: DateTime<Utc>) {
        self.title = Self::normalize_title(title);
        self.content = content.trim().to_string();
        self.updated_at = now;
    }
}
