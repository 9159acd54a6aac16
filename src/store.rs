//! Board Store
//!
//! Reactive wrapper around [`BoardState`] using Leptos reactive_stores.
//! Views read from it; only the controller writes to it.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::{BoardState, Column};
use crate::models::{BoardSnapshot, ColumnId, Task, TaskId};

/// Type alias for the store
pub type AppStore = Store<BoardState>;

pub fn create_board_store() -> AppStore {
    Store::new(BoardState::new())
}

// ========================
// Store Helper Functions
// ========================

/// Replace the whole board from a fetched snapshot
pub fn store_replace_all(store: &AppStore, snapshot: BoardSnapshot) {
    store.write().replace_all(snapshot);
}

/// Append a confirmed task to a column
pub fn store_append_task(store: &AppStore, column: ColumnId, task: Task) {
    store.write().append_task(column, task);
}

/// Remove a task from a column by ID
pub fn store_remove_task(store: &AppStore, column: ColumnId, task_id: &TaskId) -> bool {
    // Skip the write (and the notification) when there is nothing to remove
    let present = store.with_untracked(|board| {
        board.column(column).tasks.iter().any(|task| &task.id == task_id)
    });
    present && store.write().remove_task(column, task_id)
}

/// Move a task between columns
pub fn store_move_task(store: &AppStore, from: ColumnId, to: ColumnId, task: Task) -> bool {
    if from == to {
        return false;
    }
    store.write().move_task(from, to, task)
}

/// Snapshot of one column (tracked)
pub fn store_column(store: &AppStore, column: ColumnId) -> Column {
    store.with(|board| board.column(column).clone())
}

pub fn store_total_tasks(store: &AppStore) -> usize {
    store.with(BoardState::total_tasks)
}
