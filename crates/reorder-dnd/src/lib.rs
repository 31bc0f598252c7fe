//! Reorder DragDrop Utilities
//!
//! Framework-agnostic drag-and-drop reordering for vertical lists.
//! Uses a movement threshold to distinguish click from drag, and the
//! hovered item's vertical midpoint to decide when a swap commits.

use log::debug;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget<Id> {
    /// Drop on an item of the same list (reorder)
    Item(Id),
    /// Drop into a container, e.g. a folder
    Container(Id),
}

/// Result of a single hover frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverAction {
    /// Nothing to do this frame
    #[default]
    Noop,
    /// Dragged item goes in front of the hovered one (dragging upward)
    MoveBefore,
    /// Dragged item goes behind the hovered one (dragging downward)
    MoveAfter,
}

impl HoverAction {
    pub fn is_commit(&self) -> bool {
        !matches!(self, HoverAction::Noop)
    }
}

/// Decide what a hover frame does.
///
/// `pointer_y` is relative to the top of the hovered item. A swap only
/// commits once the pointer has crossed half of the hovered item's height,
/// which keeps two overlapping neighbours from swapping back and forth.
pub fn compute_hover_action(
    drag_index: usize,
    hover_index: usize,
    pointer_y: f64,
    hovered_height: f64,
) -> HoverAction {
    // Don't replace items with themselves
    if drag_index == hover_index {
        return HoverAction::Noop;
    }

    let midpoint_y = hovered_height / 2.0;

    // Dragging downwards: wait until the pointer is below 50%
    if drag_index < hover_index && pointer_y < midpoint_y {
        return HoverAction::Noop;
    }

    // Dragging upwards: wait until the pointer is above 50%
    if drag_index > hover_index && pointer_y > midpoint_y {
        return HoverAction::Noop;
    }

    if drag_index < hover_index {
        HoverAction::MoveAfter
    } else {
        HoverAction::MoveBefore
    }
}

/// Move the element at `from` to `to` in place.
///
/// Stable: every other element keeps its relative order. An out-of-range
/// `from` leaves the list untouched; `to` is clamped to the list end.
pub fn move_in_place<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

/// Pure variant of [`move_in_place`]: returns the reordered copy.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    move_in_place(&mut out, from, to);
    out
}

/// Transient payload for one drag gesture.
///
/// Owned by the caller for the lifetime of a single gesture and never
/// persisted. `index` is advisory: it is updated on every committed hover
/// so later frames compare against the new position, and must be
/// resynchronised with [`DragCursor::resync`] when the gesture settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragCursor<Id> {
    pub item_id: Id,
    pub index: usize,
}

impl<Id: PartialEq> DragCursor<Id> {
    pub fn new(item_id: Id, index: usize) -> Self {
        Self { item_id, index }
    }

    /// Recompute `index` from the authoritative order.
    /// Returns `None` (index untouched) if the item is no longer listed.
    pub fn resync(&mut self, ids: &[Id]) -> Option<usize> {
        let pos = ids.iter().position(|id| *id == self.item_id)?;
        self.index = pos;
        Some(pos)
    }
}

/// Apply one hover frame to `items`.
///
/// Commits at most one move, and only inside the commit branch; on commit
/// the cursor's index follows the dragged item to `hover_index`.
pub fn hover<T, Id>(
    cursor: &mut DragCursor<Id>,
    items: &mut Vec<T>,
    hover_index: usize,
    pointer_y: f64,
    hovered_height: f64,
) -> HoverAction {
    if cursor.index >= items.len() || hover_index >= items.len() {
        return HoverAction::Noop;
    }

    let action = compute_hover_action(cursor.index, hover_index, pointer_y, hovered_height);
    if action.is_commit() {
        debug!("reorder: {} -> {} ({:?})", cursor.index, hover_index, action);
        move_in_place(items, cursor.index, hover_index);
        cursor.index = hover_index;
    }
    action
}

/// Pointer-down that has not become a drag yet
#[derive(Clone, Debug, PartialEq)]
pub struct PendingDrag<Id> {
    pub item_id: Id,
    pub start_x: f64,
    pub start_y: f64,
}

impl<Id> PendingDrag<Id> {
    pub fn new(item_id: Id, start_x: f64, start_y: f64) -> Self {
        Self { item_id, start_x, start_y }
    }

    /// True once the pointer moved far enough to count as a drag
    pub fn should_start(&self, x: f64, y: f64) -> bool {
        let dx = (x - self.start_x).abs();
        let dy = (y - self.start_y).abs();
        dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
    }

    /// Promote to an active drag at the item's current list position
    pub fn start(self, index: usize) -> DragCursor<Id> {
        DragCursor { item_id: self.item_id, index }
    }
}

/// Gesture state for one drag source.
///
/// Mirrors the pointer lifecycle: down → (move past threshold) → dragging
/// → enter/leave targets → up. Releasing without a target cancels.
#[derive(Clone, Debug)]
pub enum DragSession<Id> {
    Idle,
    Pending(PendingDrag<Id>),
    Dragging {
        cursor: DragCursor<Id>,
        target: Option<DropTarget<Id>>,
    },
}

impl<Id> Default for DragSession<Id> {
    fn default() -> Self {
        DragSession::Idle
    }
}

impl<Id: Clone + PartialEq> DragSession<Id> {
    pub fn pointer_down(&mut self, item_id: Id, x: f64, y: f64) {
        *self = DragSession::Pending(PendingDrag::new(item_id, x, y));
    }

    /// Returns true when this move turned a pending press into a drag.
    /// `index` is the pressed item's current position in its list.
    pub fn pointer_move(&mut self, x: f64, y: f64, index: usize) -> bool {
        let pending = match self {
            DragSession::Pending(pending) if pending.should_start(x, y) => pending.clone(),
            _ => return false,
        };
        *self = DragSession::Dragging {
            cursor: pending.start(index),
            target: None,
        };
        true
    }

    pub fn enter_target(&mut self, target: DropTarget<Id>) {
        if let DragSession::Dragging { cursor, target: current } = self {
            // Don't allow dropping on self
            if target == DropTarget::Item(cursor.item_id.clone()) {
                return;
            }
            *current = Some(target);
        }
    }

    pub fn leave_target(&mut self) {
        if let DragSession::Dragging { target, .. } = self {
            *target = None;
        }
    }

    pub fn cursor_mut(&mut self) -> Option<&mut DragCursor<Id>> {
        match self {
            DragSession::Dragging { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    /// End the gesture. Yields `(dragged_id, target)` only when a real
    /// drag ended over a target; otherwise the payload is discarded.
    pub fn pointer_up(&mut self) -> Option<(Id, DropTarget<Id>)> {
        match std::mem::take(self) {
            DragSession::Dragging { cursor, target: Some(target) } => Some((cursor.item_id, target)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_index_is_noop() {
        assert_eq!(compute_hover_action(2, 2, 100.0, 40.0), HoverAction::Noop);
    }

    #[test]
    fn test_downward_waits_for_midpoint() {
        assert_eq!(compute_hover_action(0, 1, 10.0, 40.0), HoverAction::Noop);
        assert_eq!(compute_hover_action(0, 1, 19.9, 40.0), HoverAction::Noop);
        assert_eq!(compute_hover_action(0, 1, 25.0, 40.0), HoverAction::MoveAfter);
    }

    #[test]
    fn test_upward_waits_for_midpoint() {
        assert_eq!(compute_hover_action(3, 1, 30.0, 40.0), HoverAction::Noop);
        assert_eq!(compute_hover_action(3, 1, 5.0, 40.0), HoverAction::MoveBefore);
    }

    #[test]
    fn test_drag_first_past_second() {
        let mut list = vec!["A", "B", "C", "D"];
        let mut cursor = DragCursor::new("A", 0);

        let action = hover(&mut cursor, &mut list, 1, 30.0, 40.0);

        assert_eq!(action, HoverAction::MoveAfter);
        assert_eq!(list, vec!["B", "A", "C", "D"]);
        assert_eq!(cursor.index, 1);

        // Same frame again: cursor now sits on the hovered index
        assert_eq!(hover(&mut cursor, &mut list, 1, 30.0, 40.0), HoverAction::Noop);
        assert_eq!(list, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_hover_out_of_range_is_noop() {
        let mut list = vec![1, 2];
        let mut cursor = DragCursor::new(1, 0);
        assert_eq!(hover(&mut cursor, &mut list, 5, 30.0, 40.0), HoverAction::Noop);
        assert_eq!(list, vec![1, 2]);
    }

    #[test]
    fn test_move_item_is_pure() {
        let list = vec![1, 2, 3, 4];
        let moved = move_item(&list, 3, 0);
        assert_eq!(moved, vec![4, 1, 2, 3]);
        assert_eq!(list, vec![1, 2, 3, 4]);
        assert_eq!(move_item(&list, 9, 0), list);
        assert_eq!(move_item(&list, 0, 9), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_resync() {
        let mut cursor = DragCursor::new(7u32, 0);
        assert_eq!(cursor.resync(&[3, 5, 7]), Some(2));
        assert_eq!(cursor.index, 2);
        assert_eq!(cursor.resync(&[3, 5]), None);
        assert_eq!(cursor.index, 2);
    }

    #[test]
    fn test_pending_threshold() {
        let pending = PendingDrag::new(1u32, 100.0, 100.0);
        assert!(!pending.should_start(103.0, 104.0));
        assert!(pending.should_start(106.0, 100.0));
        assert!(pending.should_start(100.0, 94.0));
    }

    #[test]
    fn test_session_click_does_not_drop() {
        let mut session = DragSession::default();
        session.pointer_down(1u32, 0.0, 0.0);
        assert!(!session.pointer_move(2.0, 2.0, 0));
        session.enter_target(DropTarget::Container(9));
        assert_eq!(session.pointer_up(), None);
        assert!(matches!(session, DragSession::Idle));
    }

    #[test]
    fn test_session_drop_on_container() {
        let mut session = DragSession::default();
        session.pointer_down(1u32, 0.0, 0.0);
        assert!(session.pointer_move(0.0, 20.0, 3));
        assert!(session.is_dragging());
        assert_eq!(session.cursor_mut().map(|c| c.index), Some(3));

        session.enter_target(DropTarget::Item(1));
        session.enter_target(DropTarget::Container(9));
        assert_eq!(session.pointer_up(), Some((1, DropTarget::Container(9))));
    }

    #[test]
    fn test_session_cancel_outside_target() {
        let mut session = DragSession::default();
        session.pointer_down("a", 0.0, 0.0);
        session.pointer_move(0.0, 50.0, 0);
        session.enter_target(DropTarget::Container("work"));
        session.leave_target();
        assert_eq!(session.pointer_up(), None);
    }

    proptest! {
        #[test]
        fn prop_commit_is_stable_permutation(
            len in 2usize..16,
            from_seed in any::<usize>(),
            to_seed in any::<usize>(),
        ) {
            let from = from_seed % len;
            let to = to_seed % len;
            prop_assume!(from != to);

            let original: Vec<usize> = (0..len).collect();
            let mut list = original.clone();
            let mut cursor = DragCursor::new(from, from);
            // Pointer past the threshold in either direction
            let pointer_y = if from < to { 39.0 } else { 1.0 };

            prop_assert!(hover(&mut cursor, &mut list, to, pointer_y, 40.0).is_commit());
            prop_assert_eq!(list[to], from);
            prop_assert_eq!(cursor.index, to);

            let mut sorted = list.clone();
            sorted.sort_unstable();
            prop_assert_eq!(&sorted, &original);

            let rest: Vec<usize> = list.iter().copied().filter(|x| *x != from).collect();
            let expected: Vec<usize> = original.iter().copied().filter(|x| *x != from).collect();
            prop_assert_eq!(rest, expected);
        }

        #[test]
        fn prop_downward_above_midpoint_never_commits(
            drag in 0usize..32,
            gap in 1usize..32,
            height in 1.0f64..200.0,
            frac in 0.0f64..0.499,
        ) {
            let action = compute_hover_action(drag, drag + gap, height * frac, height);
            prop_assert_eq!(action, HoverAction::Noop);
        }
    }
}
