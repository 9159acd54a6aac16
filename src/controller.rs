//! Board Controller
//!
//! Sole owner of the board store, the drag tracker and the user notice.
//! Every mutation is write-through: the gateway call goes first and the
//! store changes only if it succeeded. Errors are logged and surfaced as a
//! notice, never propagated into the view.

use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_dragdrop::{create_dnd_signals, DndSignals, DropResolution};
use tracing::{debug, error, info, warn};

use crate::error::GatewayError;
use crate::gateway::TaskGateway;
use crate::models::{ColumnId, NewTask, Task, TaskId};
use crate::store::{
    create_board_store, store_append_task, store_move_task, store_remove_task, store_replace_all,
    store_total_tasks, AppStore,
};

/// Why an operation did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Title empty after trimming
    BlankTitle,
    /// Drop with no drag in progress
    NoDragSession,
    /// Dropped onto the column it came from
    SameColumn,
    /// Another delete/move for this task is still in flight
    TaskBusy(TaskId),
    /// The dragged task is no longer in its origin column
    NotOnBoard(TaskId),
}

#[derive(Debug)]
pub enum Outcome {
    /// Confirmed remotely and applied to the store
    Applied,
    Skipped(SkipReason),
    /// Rejected remotely; the store was not touched
    Failed(GatewayError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// User-visible message about the last problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

pub struct BoardController<G> {
    gateway: Rc<G>,
    store: AppStore,
    dnd: DndSignals<ColumnId, Task>,
    /// Task ids with a delete or move awaiting the server
    in_flight: RwSignal<HashSet<TaskId>>,
    notice: RwSignal<Option<Notice>>,
}

impl<G> Clone for BoardController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
            store: self.store,
            dnd: self.dnd,
            in_flight: self.in_flight,
            notice: self.notice,
        }
    }
}

impl<G: TaskGateway + 'static> BoardController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Rc::new(gateway),
            store: create_board_store(),
            dnd: create_dnd_signals(),
            in_flight: RwSignal::new(HashSet::new()),
            notice: RwSignal::new(None),
        }
    }

    pub fn store(&self) -> AppStore {
        self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn dnd(&self) -> DndSignals<ColumnId, Task> {
        self.dnd
    }

    pub fn notice(&self) -> ReadSignal<Option<Notice>> {
        self.notice.read_only()
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Whether a delete or move for `task_id` is pending (tracked)
    pub fn is_busy(&self, task_id: &TaskId) -> bool {
        self.in_flight.with(|set| set.contains(task_id))
    }

    // ========================
    // Reconciliation
    // ========================

    /// Replace the board with the server's state
    pub async fn load(&self) -> Outcome {
        match self.gateway.fetch_all().await {
            Ok(snapshot) => {
                store_replace_all(&self.store, snapshot);
                info!(tasks = store_total_tasks(&self.store), "board loaded");
                Outcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    /// Create a task and append the server's copy to `column`
    pub async fn create_task(&self, column: ColumnId, draft: NewTask) -> Outcome {
        if !draft.has_title() {
            debug!(%column, "ignoring task with blank title");
            return Outcome::Skipped(SkipReason::BlankTitle);
        }

        match self.gateway.create(column, &draft).await {
            Ok(task) => {
                debug!(%column, task_id = %task.id, "task created");
                store_append_task(&self.store, column, task);
                Outcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn delete_task(&self, column: ColumnId, task_id: TaskId) -> Outcome {
        if !self.claim(&task_id) {
            return self.busy(task_id);
        }
        let result = self.gateway.remove(column, &task_id).await;
        self.release(&task_id);

        match result {
            Ok(()) => {
                debug!(%column, %task_id, "task deleted");
                store_remove_task(&self.store, column, &task_id);
                Outcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    /// Drop the current drag session onto `column`
    pub async fn drop_on(&self, column: ColumnId) -> Outcome {
        let resolution = self.dnd.resolve_drop(column);
        self.complete_drop(resolution).await
    }

    /// Act on a drop already resolved by the drag tracker.
    ///
    /// The session is gone by now whatever happens below, so a failed move
    /// never leaves a stuck drag.
    pub async fn complete_drop(&self, resolution: DropResolution<ColumnId, Task>) -> Outcome {
        let (session, to) = match resolution {
            DropResolution::NoSession => return Outcome::Skipped(SkipReason::NoDragSession),
            DropResolution::SameSource(_) => return Outcome::Skipped(SkipReason::SameColumn),
            DropResolution::Transfer { session, target } => (session, target),
        };
        let from = session.source;
        let carried = session.payload;

        if !self.claim(&carried.id) {
            return self.busy(carried.id);
        }
        if !self.store.with_untracked(|board| board.contains(from, &carried.id)) {
            self.release(&carried.id);
            warn!(%from, %to, task_id = %carried.id, "dragged task is gone from its column, dropping");
            return Outcome::Skipped(SkipReason::NotOnBoard(carried.id));
        }
        let result = self.gateway.move_task(from, to, &carried).await;
        self.release(&carried.id);

        match result {
            Ok(confirmed) => {
                let task = match confirmed {
                    Some(task) if task.id == carried.id => task,
                    Some(task) => {
                        warn!(expected = %carried.id, got = %task.id, "move response named another task");
                        carried
                    }
                    None => carried,
                };
                let task_id = task.id.clone();
                if store_move_task(&self.store, from, to, task) {
                    debug!(%from, %to, %task_id, "task moved");
                } else {
                    warn!(%from, %to, %task_id, "confirmed move no longer matches the board");
                }
                Outcome::Applied
            }
            Err(err) => self.fail(err),
        }
    }

    // ========================
    // Helpers
    // ========================

    /// Mark `task_id` in flight. Returns false if it already was.
    fn claim(&self, task_id: &TaskId) -> bool {
        if self.in_flight.with_untracked(|set| set.contains(task_id)) {
            return false;
        }
        self.in_flight.update(|set| {
            set.insert(task_id.clone());
        });
        true
    }

    fn release(&self, task_id: &TaskId) {
        self.in_flight.update(|set| {
            set.remove(task_id);
        });
    }

    fn busy(&self, task_id: TaskId) -> Outcome {
        warn!(%task_id, "task has a pending request, skipping");
        self.notice.set(Some(Notice {
            message: "That task is still syncing, try again in a moment".to_string(),
        }));
        Outcome::Skipped(SkipReason::TaskBusy(task_id))
    }

    fn fail(&self, err: GatewayError) -> Outcome {
        error!(error = %err, "gateway call failed");
        self.notice.set(Some(Notice { message: err.user_message() }));
        Outcome::Failed(err)
    }
}
