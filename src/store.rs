//! Orderable List Store
//!
//! Working copy of one admin list plus its sync bookkeeping. Mutations are
//! applied immediately (optimistically); `begin_save`/`finish_save` bracket
//! the persistence call so a slow save can complete after newer edits.

use list_dragdrop::DropResult;

use crate::models::{OrderEntry, Orderable};
use crate::ordering::{self, Direction};
use crate::sync::{FailurePolicy, SyncOutcome};

/// Whether the in-memory order matches the backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Synced,
    /// Changed locally, not yet sent
    Dirty,
    Saving,
    /// Last save failed; the local order is kept but unsynced
    Failed(String),
}

/// A save in flight: the payload sent, the order it was built from and the
/// revision it was taken at
#[derive(Debug, Clone)]
pub struct PendingSave<T: Orderable> {
    revision: u64,
    snapshot: Vec<T>,
    pub payload: Vec<OrderEntry<T::Id>>,
}

impl<T: Orderable> PendingSave<T> {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Debug, Clone)]
pub struct OrderedList<T: Orderable> {
    items: Vec<T>,
    /// Last order known to be persisted
    confirmed: Vec<T>,
    /// Revision `confirmed` was taken at
    confirmed_revision: u64,
    initialized: bool,
    revision: u64,
    state: SyncState,
}

impl<T: Orderable> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Orderable> OrderedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            confirmed: Vec::new(),
            confirmed_revision: 0,
            initialized: false,
            revision: 0,
            state: SyncState::Synced,
        }
    }

    /// Load the list once. Later calls are ignored and return false, so
    /// re-rendering with the same source data does not clobber local edits.
    pub fn initialize(&mut self, items: Vec<T>) -> bool {
        if self.initialized {
            log::debug!("List already initialized, ignoring {} items", items.len());
            return false;
        }
        self.reset(items);
        true
    }

    /// Replace the list with freshly loaded items, discarding local edits.
    ///
    /// Items are sorted by position and renumbered 0-based, so 1-based or
    /// gapped source data is normalized here.
    pub fn reset(&mut self, mut items: Vec<T>) {
        ordering::sort_by_position(&mut items);
        ordering::renumber(&mut items);
        self.confirmed = items.clone();
        self.items = items;
        self.initialized = true;
        self.revision += 1;
        self.confirmed_revision = self.revision;
        self.state = SyncState::Synced;
    }

    /// Items in display order
    pub fn get_ordered(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Bumped on every change of the working order
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.state
    }

    pub fn is_synced(&self) -> bool {
        self.state == SyncState::Synced
    }

    /// Array index of the item with `id`
    pub fn index_of(&self, id: T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn move_item(&mut self, index: usize, direction: Direction) -> bool {
        let changed = ordering::move_item(&mut self.items, index, direction);
        if changed {
            self.touch();
        }
        changed
    }

    pub fn drag_reorder(&mut self, source: usize, destination: Option<usize>) -> bool {
        let changed = ordering::drag_reorder(&mut self.items, source, destination);
        if changed {
            self.touch();
        }
        changed
    }

    /// Apply the result of a pointer drag
    pub fn apply_drop(&mut self, drop: DropResult) -> bool {
        self.drag_reorder(drop.source, drop.destination)
    }

    /// Add at the end
    pub fn append(&mut self, item: T) {
        ordering::append(&mut self.items, item);
        self.touch();
    }

    /// Remove and renumber the remaining items
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let removed = ordering::remove_at(&mut self.items, index);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn order_payload(&self) -> Vec<OrderEntry<T::Id>> {
        ordering::order_payload(&self.items)
    }

    /// Snapshot the payload to send and mark the list as saving
    pub fn begin_save(&mut self) -> PendingSave<T> {
        self.state = SyncState::Saving;
        PendingSave {
            revision: self.revision,
            snapshot: self.items.clone(),
            payload: self.order_payload(),
        }
    }

    /// Record the result of a save started with `begin_save`.
    ///
    /// A result for an older revision never overrides newer local edits:
    /// success leaves the list dirty, failure never rolls back. Any success
    /// makes the saved order the rollback target, unless a newer save was
    /// already confirmed.
    pub fn finish_save(
        &mut self,
        pending: PendingSave<T>,
        result: Result<(), String>,
        policy: FailurePolicy,
    ) -> SyncOutcome {
        let current = pending.revision == self.revision;
        let newer_save_in_flight = !current && self.state == SyncState::Saving;

        if result.is_ok() && pending.revision >= self.confirmed_revision {
            self.confirmed = pending.snapshot;
            self.confirmed_revision = pending.revision;
        }

        match result {
            Ok(()) if current => {
                self.state = SyncState::Synced;
                SyncOutcome::Saved
            }
            Ok(()) => {
                if !newer_save_in_flight {
                    self.state = SyncState::Dirty;
                }
                SyncOutcome::Superseded
            }
            Err(e) if current && policy == FailurePolicy::Rollback => {
                self.rollback();
                SyncOutcome::RolledBack(e)
            }
            Err(e) => {
                if !newer_save_in_flight {
                    self.state = SyncState::Failed(e.clone());
                }
                SyncOutcome::Failed(e)
            }
        }
    }

    /// Restore the last persisted order
    pub fn rollback(&mut self) {
        self.items = self.confirmed.clone();
        self.revision += 1;
        self.confirmed_revision = self.revision;
        self.state = SyncState::Synced;
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.state = SyncState::Dirty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::tests::{rows, Row};

    fn ids(list: &OrderedList<Row>) -> Vec<u32> {
        list.get_ordered().iter().map(|r| r.id).collect()
    }

    fn loaded(ids: &[u32]) -> OrderedList<Row> {
        let mut list = OrderedList::new();
        list.initialize(rows(ids));
        list
    }

    #[test]
    fn test_initialize_sorts_and_normalizes() {
        let mut list = OrderedList::new();
        // 1-based, unsorted
        assert!(list.initialize(vec![
            Row { id: 3, pos: 3 },
            Row { id: 1, pos: 1 },
            Row { id: 2, pos: 2 },
        ]));
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert_eq!(list.order_payload()[0], OrderEntry::new(1, 0));
        assert!(list.is_synced());
    }

    #[test]
    fn test_initialize_only_once() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(1, Direction::Up);

        assert!(!list.initialize(rows(&[1, 2, 3])));
        assert_eq!(ids(&list), vec![2, 1, 3]);

        list.reset(rows(&[1, 2, 3]));
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_mutations_mark_dirty() {
        let mut list = loaded(&[1, 2, 3]);
        let rev = list.revision();

        assert!(!list.move_item(0, Direction::Up));
        assert_eq!(list.revision(), rev);
        assert!(list.is_synced());

        assert!(list.drag_reorder(0, Some(2)));
        assert_eq!(ids(&list), vec![2, 3, 1]);
        assert_eq!(list.sync_state(), &SyncState::Dirty);
        assert!(list.revision() > rev);
    }

    #[test]
    fn test_apply_drop() {
        let mut list = loaded(&[1, 2, 3]);
        assert!(!list.apply_drop(DropResult { source: 0, destination: None }));
        assert!(list.apply_drop(DropResult { source: 2, destination: Some(0) }));
        assert_eq!(ids(&list), vec![3, 1, 2]);
    }

    #[test]
    fn test_pointer_drag_into_zone() {
        use list_dragdrop::{DragTracker, DropTarget};

        let mut list = loaded(&[1, 2, 3, 4]);
        let mut tracker = DragTracker::new();
        tracker.pointer_down(0, 10, 10);
        assert!(tracker.pointer_move(10, 40));
        // gap between rows 2 and 3
        tracker.enter(DropTarget::Zone(3));

        let drop = tracker.pointer_up().unwrap();
        assert!(list.apply_drop(drop));
        assert_eq!(ids(&list), vec![2, 3, 1, 4]);
        assert!(tracker.take_drag_just_ended());
    }

    #[test]
    fn test_append_remove_stay_dense() {
        let mut list = loaded(&[1, 2]);
        list.append(Row { id: 9, pos: 0 });
        assert_eq!(list.get_ordered()[2].pos, 2);
        assert_eq!(list.remove(0).map(|r| r.id), Some(1));
        assert!(ordering::is_dense(list.get_ordered()));
        assert_eq!(list.index_of(9), Some(1));
        assert!(list.remove(5).is_none());
    }

    #[test]
    fn test_save_success() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(2, Direction::Up);

        let pending = list.begin_save();
        assert_eq!(list.sync_state(), &SyncState::Saving);
        let outcome = list.finish_save(pending, Ok(()), FailurePolicy::Rollback);
        assert_eq!(outcome, SyncOutcome::Saved);
        assert!(list.is_synced());

        // the saved order is now the rollback target
        list.move_item(0, Direction::Down);
        list.rollback();
        assert_eq!(ids(&list), vec![1, 3, 2]);
    }

    #[test]
    fn test_failed_save_keeps_optimistic_order() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(1, Direction::Up);

        let pending = list.begin_save();
        let outcome = list.finish_save(pending, Err("offline".into()), FailurePolicy::KeepDirty);
        assert_eq!(outcome, SyncOutcome::Failed("offline".into()));
        assert_eq!(ids(&list), vec![2, 1, 3]);
        assert_eq!(list.sync_state(), &SyncState::Failed("offline".into()));
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut list = loaded(&[1, 2, 3]);
        list.drag_reorder(0, Some(2));

        let pending = list.begin_save();
        let outcome = list.finish_save(pending, Err("500".into()), FailurePolicy::Rollback);
        assert_eq!(outcome, SyncOutcome::RolledBack("500".into()));
        assert_eq!(ids(&list), vec![1, 2, 3]);
        assert!(list.is_synced());
    }

    #[test]
    fn test_stale_save_does_not_mark_synced() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(1, Direction::Up);
        let first = list.begin_save();

        // user keeps editing while the first save is in flight
        list.move_item(2, Direction::Up);
        assert_ne!(first.payload, list.order_payload());

        let outcome = list.finish_save(first, Ok(()), FailurePolicy::KeepDirty);
        assert_eq!(outcome, SyncOutcome::Superseded);
        assert_eq!(list.sync_state(), &SyncState::Dirty);
    }

    #[test]
    fn test_rollback_after_superseded_save() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(1, Direction::Up);
        let first = list.begin_save();
        list.move_item(2, Direction::Up);

        // the store now holds [2, 1, 3]
        assert_eq!(
            list.finish_save(first, Ok(()), FailurePolicy::Rollback),
            SyncOutcome::Superseded
        );

        let second = list.begin_save();
        let outcome = list.finish_save(second, Err("500".into()), FailurePolicy::Rollback);
        assert_eq!(outcome, SyncOutcome::RolledBack("500".into()));
        assert_eq!(ids(&list), vec![2, 1, 3]);
        assert!(list.is_synced());
    }

    #[test]
    fn test_late_older_success_keeps_newer_confirmation() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(1, Direction::Up);
        let first = list.begin_save();
        list.move_item(2, Direction::Up);
        let second = list.begin_save();

        assert_eq!(
            list.finish_save(second, Ok(()), FailurePolicy::Rollback),
            SyncOutcome::Saved
        );
        list.finish_save(first, Ok(()), FailurePolicy::Rollback);

        list.move_item(0, Direction::Down);
        list.rollback();
        assert_eq!(ids(&list), vec![2, 3, 1]);
    }

    #[test]
    fn test_stale_failure_never_rolls_back() {
        let mut list = loaded(&[1, 2, 3]);
        list.move_item(1, Direction::Up);
        let first = list.begin_save();
        list.move_item(2, Direction::Up);
        let second = list.begin_save();

        let outcome = list.finish_save(first, Err("timeout".into()), FailurePolicy::Rollback);
        assert_eq!(outcome, SyncOutcome::Failed("timeout".into()));
        assert_eq!(ids(&list), vec![2, 3, 1]);
        // the newer save is still pending
        assert_eq!(list.sync_state(), &SyncState::Saving);

        assert_eq!(
            list.finish_save(second, Ok(()), FailurePolicy::Rollback),
            SyncOutcome::Saved
        );
    }
}
