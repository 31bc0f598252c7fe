//! Task Entity
//!
//! A focus-list task. Completed tasks are locked: they are shown after the
//! open ones and never take part in drag reordering.

use serde::{Deserialize, Serialize};

/// Task priority, shown as a colour bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    /// Project / category name, e.g. "Work"
    pub project: String,
    pub priority: Priority,
    /// Free-form due hint, e.g. "Before 6pm"
    pub time_label: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: u32, title: &str, project: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            project: project.to_string(),
            priority: Priority::default(),
            time_label: String::new(),
            completed: false,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_time_label(mut self, label: &str) -> Self {
        self.time_label = label.to_string();
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}
