//! Idea Store
//!
//! Folder and idea CRUD over an injected repository. Every mutation that
//! changes something persists the whole state; rejected input and unknown
//! ids are no-ops that report `false` / `None` instead of errors.

use log::{debug, info, warn};
use reorder_dnd::DropTarget;

use super::clock::{Clock, SystemClock};
use super::ids::{IdGenerator, RandomIdGenerator};
use crate::domain::{DomainError, DomainResult, Folder, Idea, IdeasState};
use crate::repository::StateRepository;

/// Attempts before giving up on a colliding id generator
const MAX_ID_ATTEMPTS: usize = 16;

pub struct IdeaStore<R: StateRepository> {
    state: IdeasState,
    repo: R,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<R: StateRepository> IdeaStore<R> {
    /// Load the persisted state with the wall clock and random ids
    pub fn open(repo: R) -> Self {
        Self::open_with(repo, Box::new(SystemClock), Box::new(RandomIdGenerator::new()))
    }

    pub fn open_with(repo: R, clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        let mut state = repo.load(clock.now());
        for note in state.repair(clock.now()) {
            warn!("Repaired loaded ideas state: {}", note);
        }
        info!(
            "Idea store loaded: {} folders, {} ideas",
            state.real_folders().count(),
            state.ideas.len()
        );
        Self { state, repo, clock, ids }
    }

    pub fn state(&self) -> &IdeasState {
        &self.state
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All folders, virtual "All" first
    pub fn folders(&self) -> &[Folder] {
        &self.state.folders
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.state.folder(id)
    }

    pub fn idea(&self, id: &str) -> Option<&Idea> {
        self.state.ideas.get(id)
    }

    /// Save the current state again, e.g. after a failed write
    pub fn persist(&self) -> DomainResult<()> {
        self.repo.save(&self.state)
    }

    fn commit(&self, op: &str) -> DomainResult<()> {
        self.repo.save(&self.state).map_err(|e| {
            warn!("{}: state changed but was not saved: {}", op, e);
            e
        })
    }

    fn fresh_id(&mut self, prefix: &str) -> DomainResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id(prefix);
            let taken = Folder::is_virtual_id(&id)
                || self.state.ideas.contains_key(&id)
                || self.state.folder(&id).is_some();
            if !taken {
                return Ok(id);
            }
        }
        Err(DomainError::Internal(format!("could not generate a unique {} id", prefix)))
    }

    // ========================================================================
    // Folders
    // ========================================================================

    /// Append a new empty folder. Blank names are refused.
    pub fn create_folder(&mut self, name: &str) -> DomainResult<Option<Folder>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("create_folder: blank name ignored");
            return Ok(None);
        }

        let id = self.fresh_id("folder")?;
        let folder = Folder::new(id, name, self.clock.now());
        self.state.folders.push(folder.clone());
        self.commit("create_folder")?;
        Ok(Some(folder))
    }

    pub fn rename_folder(&mut self, id: &str, name: &str) -> DomainResult<bool> {
        let name = name.trim();
        if Folder::is_virtual_id(id) || name.is_empty() {
            return Ok(false);
        }

        let now = self.clock.now();
        let Some(folder) = self.state.folder_mut(id) else {
            return Ok(false);
        };
        folder.name = name.to_string();
        folder.updated_at = now;
        self.commit("rename_folder")?;
        Ok(true)
    }

    /// Remove a folder together with every idea it holds
    pub fn delete_folder(&mut self, id: &str) -> DomainResult<bool> {
        if Folder::is_virtual_id(id) {
            return Ok(false);
        }
        let Some(pos) = self.state.folders.iter().position(|f| f.id == id) else {
            return Ok(false);
        };

        let folder = self.state.folders.remove(pos);
        for idea_id in &folder.idea_ids {
            self.state.ideas.remove(idea_id);
        }
        debug!("delete_folder {}: removed {} ideas", id, folder.idea_ids.len());
        self.commit("delete_folder")?;
        Ok(true)
    }

    // ========================================================================
    // Ideas
    // ========================================================================

    /// Where a new idea goes when created from the "All" view
    pub fn default_destination(&self) -> Option<&Folder> {
        self.state.real_folders().next()
    }

    /// Create an idea at the top of a folder.
    ///
    /// `folder_id` is the folder being viewed. From the "All" view the
    /// caller has to pass a real `destination`; otherwise nothing happens.
    pub fn create_idea(
        &mut self,
        folder_id: &str,
        destination: Option<&str>,
        title: &str,
        content: &str,
    ) -> DomainResult<Option<Idea>> {
        let target = if Folder::is_virtual_id(folder_id) {
            match destination {
                Some(dest) => dest,
                None => {
                    debug!("create_idea: no destination for the All view");
                    return Ok(None);
                }
            }
        } else {
            folder_id
        };
        if Folder::is_virtual_id(target) || self.state.folder(target).is_none() {
            return Ok(None);
        }

        let id = self.fresh_id("idea")?;
        let now = self.clock.now();
        let idea = Idea::new(id.clone(), title, content, now);
        if let Some(folder) = self.state.folder_mut(target) {
            folder.prepend(&id);
            folder.updated_at = now;
        }
        self.state.ideas.insert(id, idea.clone());
        self.commit("create_idea")?;
        Ok(Some(idea))
    }

    /// Edit title and content; folder membership is left alone
    pub fn update_idea(&mut self, id: &str, title: &str, content: &str) -> DomainResult<bool> {
        let now = self.clock.now();
        let Some(idea) = self.state.ideas.get_mut(id) else {
            return Ok(false);
        };
        idea.edit(title, content, now);
        self.commit("update_idea")?;
        Ok(true)
    }

    pub fn delete_idea(&mut self, id: &str) -> DomainResult<bool> {
        let existed = self.state.ideas.remove(id).is_some();
        let mut listed = false;
        for folder in self.state.folders.iter_mut().filter(|f| !f.is_virtual()) {
            listed |= folder.remove(id);
        }
        if !existed && !listed {
            return Ok(false);
        }
        self.commit("delete_idea")?;
        Ok(true)
    }

    /// Move an idea to the top of another real folder.
    ///
    /// Moving into "All", into an unknown folder, or into the folder that
    /// already holds the idea does nothing.
    pub fn move_idea(&mut self, id: &str, target_folder_id: &str) -> DomainResult<bool> {
        if Folder::is_virtual_id(target_folder_id) || !self.state.ideas.contains_key(id) {
            return Ok(false);
        }
        match self.state.folder(target_folder_id) {
            Some(target) if !target.contains(id) => {}
            _ => return Ok(false),
        }

        let now = self.clock.now();
        for folder in self.state.folders.iter_mut().filter(|f| !f.is_virtual()) {
            if folder.id == target_folder_id {
                folder.prepend(id);
                folder.updated_at = now;
            } else {
                folder.remove(id);
            }
        }
        self.commit("move_idea")?;
        Ok(true)
    }

    /// Whether an idea may be dropped on this folder
    pub fn can_drop_into(&self, folder_id: &str) -> bool {
        !Folder::is_virtual_id(folder_id) && self.state.folder(folder_id).is_some()
    }

    /// Apply a finished drag of an idea card
    pub fn handle_drop(&mut self, idea_id: &str, target: &DropTarget<String>) -> DomainResult<bool> {
        match target {
            DropTarget::Container(folder_id) if self.can_drop_into(folder_id) => {
                self.move_idea(idea_id, folder_id)
            }
            _ => Ok(false),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn list_ideas_in(&self, folder_id: &str) -> Vec<&Idea> {
        self.state.ideas_in(folder_id)
    }

    pub fn idea_count(&self, folder_id: &str) -> usize {
        self.state.idea_count(folder_id)
    }
}
