//! Ideas State
//!
//! The whole persisted idea organizer: folders (virtual "All" first) and
//! the idea map. Membership of "All" is derived on read, never stored.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};
use super::folder::Folder;
use super::idea::Idea;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeasState {
    pub folders: Vec<Folder>,
    pub ideas: BTreeMap<String, Idea>,
}

impl IdeasState {
    /// Fresh state holding only the "All" folder
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            folders: vec![Folder::all(now)],
            ideas: BTreeMap::new(),
        }
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn folder_mut(&mut self, id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// Folders that own ideas, in display order
    pub fn real_folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.iter().filter(|f| !f.is_virtual())
    }

    /// Real folder currently listing the idea
    pub fn owner_of(&self, idea_id: &str) -> Option<&Folder> {
        self.real_folders().find(|f| f.contains(idea_id))
    }

    /// Union of all real folders' ids, in folder discovery order
    pub fn all_idea_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.real_folders()
            .flat_map(|f| f.idea_ids.iter())
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Ideas shown for a folder. Dangling ids are skipped; an unknown
    /// folder lists nothing.
    pub fn ideas_in(&self, folder_id: &str) -> Vec<&Idea> {
        let ids: Vec<&str> = if Folder::is_virtual_id(folder_id) {
            self.all_idea_ids()
        } else {
            match self.folder(folder_id) {
                Some(folder) => folder.idea_ids.iter().map(String::as_str).collect(),
                None => return Vec::new(),
            }
        };
        ids.into_iter().filter_map(|id| self.ideas.get(id)).collect()
    }

    /// Badge count; for "All" the sum over real folders
    pub fn idea_count(&self, folder_id: &str) -> usize {
        if Folder::is_virtual_id(folder_id) {
            self.real_folders().map(|f| f.idea_ids.len()).sum()
        } else {
            self.folder(folder_id).map(|f| f.idea_ids.len()).unwrap_or(0)
        }
    }

    /// Check the structural invariants
    pub fn verify(&self) -> DomainResult<()> {
        let virtual_count = self.folders.iter().filter(|f| f.is_virtual()).count();
        if virtual_count != 1 {
            return Err(DomainError::InvalidInput(format!(
                "expected exactly one All folder, found {}",
                virtual_count
            )));
        }
        match self.folders.first() {
            Some(first) if first.is_virtual() => {
                if !first.idea_ids.is_empty() {
                    return Err(DomainError::InvalidInput("All folder stores idea ids".into()));
                }
            }
            _ => return Err(DomainError::InvalidInput("All folder is not first".into())),
        }

        let mut folder_ids = HashSet::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for folder in self.real_folders() {
            if !folder_ids.insert(folder.id.as_str()) {
                return Err(DomainError::Conflict(format!("duplicate folder {}", folder.id)));
            }
            for id in &folder.idea_ids {
                if !self.ideas.contains_key(id) {
                    return Err(DomainError::NotFound(format!(
                        "idea {} listed in folder {}",
                        id, folder.id
                    )));
                }
                if let Some(previous) = owners.insert(id.as_str(), folder.id.as_str()) {
                    return Err(DomainError::Conflict(format!(
                        "idea {} listed in {} and {}",
                        id, previous, folder.id
                    )));
                }
            }
        }

        if let Some(orphan) = self.ideas.keys().find(|id| !owners.contains_key(id.as_str())) {
            return Err(DomainError::Conflict(format!("idea {} has no folder", orphan)));
        }
        Ok(())
    }

    /// Restore the invariants on state that parsed but is inconsistent.
    /// Returns one note per kind of repair made.
    pub fn repair(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let mut notes = Vec::new();

        let before = self.folders.len();
        let mut seen = HashSet::new();
        self.folders.retain(|f| seen.insert(f.id.clone()));
        if self.folders.len() != before {
            notes.push(format!("dropped {} duplicate folders", before - self.folders.len()));
        }

        match self.folders.iter().position(|f| f.is_virtual()) {
            Some(0) => {}
            Some(pos) => {
                let all = self.folders.remove(pos);
                self.folders.insert(0, all);
                notes.push("moved All folder first".to_string());
            }
            None => {
                self.folders.insert(0, Folder::all(now));
                notes.push("inserted missing All folder".to_string());
            }
        }
        if !self.folders[0].idea_ids.is_empty() {
            self.folders[0].idea_ids.clear();
            notes.push("cleared ids stored on All folder".to_string());
        }

        // Keys are authoritative for idea ids
        for (key, idea) in self.ideas.iter_mut() {
            if idea.id != *key {
                idea.id = key.clone();
            }
        }

        let ideas = &self.ideas;
        let mut owned: HashSet<String> = HashSet::new();
        let mut dropped_refs = 0;
        for folder in self.folders.iter_mut().skip(1) {
            let before = folder.idea_ids.len();
            folder
                .idea_ids
                .retain(|id| ideas.contains_key(id) && owned.insert(id.clone()));
            dropped_refs += before - folder.idea_ids.len();
        }
        if dropped_refs > 0 {
            notes.push(format!("dropped {} dangling or duplicate memberships", dropped_refs));
        }

        let before = self.ideas.len();
        self.ideas.retain(|id, _| owned.contains(id));
        if self.ideas.len() != before {
            notes.push(format!("dropped {} unreachable ideas", before - self.ideas.len()));
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ALL_FOLDER_ID;

    fn state_with(folders: &[(&str, &[&str])]) -> IdeasState {
        let now = Utc::now();
        let mut state = IdeasState::empty(now);
        for (folder_id, ids) in folders {
            let mut folder = Folder::new(folder_id.to_string(), folder_id, now);
            for id in ids.iter() {
                folder.idea_ids.push(id.to_string());
                state
                    .ideas
                    .insert(id.to_string(), Idea::new(id.to_string(), id, "", now));
            }
            state.folders.push(folder);
        }
        state
    }

    #[test]
    fn test_empty_state_is_valid() {
        let state = IdeasState::empty(Utc::now());
        assert_eq!(state.folders.len(), 1);
        assert!(state.folders[0].is_virtual());
        assert!(state.verify().is_ok());
    }

    #[test]
    fn test_all_view_unions_in_folder_order() {
        let state = state_with(&[("work", &["a", "b"]), ("home", &["c"])]);
        let titles: Vec<&str> = state.ideas_in(ALL_FOLDER_ID).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(state.idea_count(ALL_FOLDER_ID), 3);
        assert_eq!(state.idea_count("work"), 2);
        assert_eq!(state.idea_count("missing"), 0);
    }

    #[test]
    fn test_dangling_ids_are_filtered() {
        let mut state = state_with(&[("work", &["a"])]);
        state.folder_mut("work").unwrap().idea_ids.push("ghost".to_string());
        assert_eq!(state.ideas_in("work").len(), 1);
        assert!(matches!(state.verify(), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_verify_detects_shared_idea() {
        let mut state = state_with(&[("work", &["a"]), ("home", &[])]);
        state.folder_mut("home").unwrap().idea_ids.push("a".to_string());
        assert!(matches!(state.verify(), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_verify_detects_orphan() {
        let mut state = state_with(&[("work", &["a"])]);
        let now = Utc::now();
        state.ideas.insert("lost".to_string(), Idea::new("lost".to_string(), "lost", "", now));
        assert!(matches!(state.verify(), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_repair_restores_invariants() {
        let now = Utc::now();
        let mut state = state_with(&[("work", &["a", "b"]), ("home", &["c"])]);
        // All folder moved last and polluted, plus a shared, a dangling and an orphan id
        let all = state.folders.remove(0);
        state.folders.push(all);
        state.folders[2].idea_ids.push("a".to_string());
        state.folder_mut("home").unwrap().idea_ids.push("a".to_string());
        state.folder_mut("work").unwrap().idea_ids.push("ghost".to_string());
        state.ideas.insert("lost".to_string(), Idea::new("lost".to_string(), "lost", "", now));
        state.folders.push(Folder::new("work".to_string(), "dup", now));

        let notes = state.repair(now);

        assert!(!notes.is_empty());
        assert!(state.verify().is_ok());
        assert_eq!(state.folders.len(), 3);
        assert_eq!(state.folder("work").unwrap().idea_ids, vec!["a", "b"]);
        assert_eq!(state.folder("home").unwrap().idea_ids, vec!["c"]);
        assert!(!state.ideas.contains_key("lost"));
    }

    #[test]
    fn test_repair_on_valid_state_is_silent() {
        let mut state = state_with(&[("work", &["a"])]);
        let before = state.clone();
        assert!(state.repair(Utc::now()).is_empty());
        assert_eq!(state, before);
    }
}
