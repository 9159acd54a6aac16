//! Board State
//!
//! In-memory mirror of the remote board. Every mutation here is applied only
//! after the matching remote call has been confirmed.

use reactive_stores::Store;

use crate::models::{BoardSnapshot, ColumnId, Task, TaskId};

/// One fixed column and its ordered tasks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn empty(id: ColumnId) -> Self {
        Self { id, tasks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The whole board. All three columns always exist, possibly empty.
#[derive(Clone, Debug, PartialEq, Eq, Store)]
pub struct BoardState {
    pub todo: Column,
    pub in_progress: Column,
    pub done: Column,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            todo: Column::empty(ColumnId::Todo),
            in_progress: Column::empty(ColumnId::InProgress),
            done: Column::empty(ColumnId::Done),
        }
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        match id {
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }

    fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        match id {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }

    /// Columns in display order
    pub fn columns(&self) -> [&Column; 3] {
        [&self.todo, &self.in_progress, &self.done]
    }

    pub fn total_tasks(&self) -> usize {
        self.columns().iter().map(|column| column.len()).sum()
    }

    /// Replace the whole board. Columns absent from the snapshot become empty.
    pub fn replace_all(&mut self, mut snapshot: BoardSnapshot) {
        for id in ColumnId::ALL {
            self.column_mut(id).tasks = snapshot.take(id);
        }
    }

    /// Append `task` to the end of `column`.
    pub fn append_task(&mut self, column: ColumnId, task: Task) {
        self.column_mut(column).tasks.push(task);
    }

    /// Remove the task with `task_id` from `column`.
    ///
    /// Returns `false` (and changes nothing) when no such task exists.
    pub fn remove_task(&mut self, column: ColumnId, task_id: &TaskId) -> bool {
        let tasks = &mut self.column_mut(column).tasks;
        let before = tasks.len();
        tasks.retain(|task| &task.id != task_id);
        tasks.len() != before
    }

    pub fn contains(&self, column: ColumnId, task_id: &TaskId) -> bool {
        self.column(column).tasks.iter().any(|task| &task.id == task_id)
    }

    /// Move `task` (matched by id) from `from` to the end of `to`.
    ///
    /// Changes nothing and returns `false` when `from == to`, when `from` does
    /// not hold the task, or when `to` already does. The appended value is
    /// `task` as given, so callers pass the server's copy when they have one.
    pub fn move_task(&mut self, from: ColumnId, to: ColumnId, task: Task) -> bool {
        if from == to || self.contains(to, &task.id) {
            return false;
        }
        if !self.remove_task(from, &task.id) {
            return false;
        }
        self.append_task(to, task);
        true
    }
}
