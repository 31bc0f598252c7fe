//! Focus Task List
//!
//! Canonical order is all open tasks first, then completed ones. Drag
//! reordering only ever runs over the open sub-list; completed tasks stay
//! trailing and locked.

use std::collections::BTreeMap;

use reorder_dnd::{DragCursor, HoverAction};
use serde::{Deserialize, Serialize};

use crate::domain::Task;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut list = Self { tasks };
        list.canonicalize();
        list
    }

    /// Tasks in canonical order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn incomplete(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    pub fn incomplete_ids(&self) -> Vec<u32> {
        self.tasks.iter().filter(|t| !t.completed).map(|t| t.id).collect()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
        self.canonicalize();
    }

    /// Flip completion. Returns false for an unknown id.
    pub fn toggle(&mut self, id: u32) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.canonicalize();
        true
    }

    /// Commit a move inside the open sub-list
    pub fn move_incomplete(&mut self, drag_index: usize, hover_index: usize) -> bool {
        let (mut open, done) = self.split();
        if drag_index >= open.len() || hover_index >= open.len() || drag_index == hover_index {
            return false;
        }
        reorder_dnd::move_in_place(&mut open, drag_index, hover_index);
        self.merge(open, done);
        true
    }

    /// Cursor for dragging a task. Completed tasks cannot be dragged.
    pub fn begin_drag(&self, id: u32) -> Option<DragCursor<u32>> {
        let index = self.incomplete_ids().iter().position(|t| *t == id)?;
        Some(DragCursor::new(id, index))
    }

    /// One hover frame over the open task at `hover_index`
    pub fn hover(
        &mut self,
        cursor: &mut DragCursor<u32>,
        hover_index: usize,
        pointer_y: f64,
        hovered_height: f64,
    ) -> HoverAction {
        let (mut open, done) = self.split();
        let action = reorder_dnd::hover(cursor, &mut open, hover_index, pointer_y, hovered_height);
        if action.is_commit() {
            self.merge(open, done);
        }
        action
    }

    /// Re-align the cursor with the committed order when the gesture ends
    pub fn settle(&self, cursor: &mut DragCursor<u32>) -> Option<usize> {
        cursor.resync(&self.incomplete_ids())
    }

    /// Number of tasks per project
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            *counts.entry(task.project.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn split(&self) -> (Vec<Task>, Vec<Task>) {
        self.tasks.iter().cloned().partition(|t| !t.completed)
    }

    fn merge(&mut self, open: Vec<Task>, done: Vec<Task>) {
        self.tasks = open;
        self.tasks.extend(done);
    }

    fn canonicalize(&mut self) {
        let (open, done) = self.split();
        self.merge(open, done);
    }
}
