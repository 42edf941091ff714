//! Persistence Sync
//!
//! `ListController` ties an `OrderedList` to its `OrderStore`: every reorder
//! is applied locally first, then pushed as one batch. A failed save never
//! surfaces as an error to the caller; it becomes a toast and a sync state.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use list_dragdrop::DropResult;

use crate::commands::OrderStore;
use crate::context::Toasts;
use crate::models::Orderable;
use crate::ordering::Direction;
use crate::store::OrderedList;

/// When a reorder is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Right after each change
    #[default]
    Auto,
    /// Only on an explicit `save`
    Manual,
}

/// What happens to the local order when a save fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep the optimistic order and flag the list as unsynced
    #[default]
    KeepDirty,
    /// Restore the last persisted order
    Rollback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncOptions {
    #[serde(default)]
    pub save_mode: SaveMode,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The operation changed nothing
    Unchanged,
    /// Changed locally; waiting for a manual save
    Deferred,
    Saved,
    /// Saved, but the list changed again meanwhile
    Superseded,
    /// Save failed; local order kept
    Failed(String),
    /// Save failed; local order restored
    RolledBack(String),
}

impl SyncOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, SyncOutcome::Failed(_) | SyncOutcome::RolledBack(_))
    }
}

pub struct ListController<T: Orderable> {
    label: String,
    list: OrderedList<T>,
    store: Arc<dyn OrderStore<T>>,
    toasts: Toasts,
    options: SyncOptions,
}

impl<T: Orderable> ListController<T> {
    pub fn new(
        label: impl Into<String>,
        store: Arc<dyn OrderStore<T>>,
        toasts: Toasts,
        options: SyncOptions,
    ) -> Self {
        Self {
            label: label.into(),
            list: OrderedList::new(),
            store,
            toasts,
            options,
        }
    }

    pub fn list(&self) -> &OrderedList<T> {
        &self.list
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Fetch from the store, replacing local state. Returns false (and
    /// raises a toast) when the store is unreachable.
    pub async fn load(&mut self) -> bool {
        match self.store.load().await {
            Ok(items) => {
                log::debug!("Loaded {} {} items", items.len(), self.label);
                self.list.reset(items);
                true
            }
            Err(e) => {
                self.toasts.error(format!("Failed to load {}: {}", self.label, e));
                false
            }
        }
    }

    pub async fn move_item(&mut self, index: usize, direction: Direction) -> SyncOutcome {
        let changed = self.list.move_item(index, direction);
        self.after_change(changed).await
    }

    pub async fn drag_reorder(&mut self, source: usize, destination: Option<usize>) -> SyncOutcome {
        let changed = self.list.drag_reorder(source, destination);
        self.after_change(changed).await
    }

    pub async fn apply_drop(&mut self, drop: DropResult) -> SyncOutcome {
        let changed = self.list.apply_drop(drop);
        self.after_change(changed).await
    }

    /// Push the full current order. No retry on failure.
    pub async fn save(&mut self) -> SyncOutcome {
        let pending = self.list.begin_save();
        let result = self.store.save_order(&pending.payload).await;
        let outcome = self
            .list
            .finish_save(pending, result, self.options.failure_policy);

        match &outcome {
            SyncOutcome::Saved => self.toasts.success(format!("{} order saved", self.label)),
            SyncOutcome::Failed(e) => self
                .toasts
                .error(format!("Failed to save {} order: {}", self.label, e)),
            SyncOutcome::RolledBack(e) => self.toasts.error(format!(
                "Failed to save {} order, changes reverted: {}",
                self.label, e
            )),
            _ => {}
        }
        outcome
    }

    async fn after_change(&mut self, changed: bool) -> SyncOutcome {
        if !changed {
            return SyncOutcome::Unchanged;
        }
        match self.options.save_mode {
            SaveMode::Auto => self.save().await,
            SaveMode::Manual => SyncOutcome::Deferred,
        }
    }
}
