//! Remote Task Gateway
//!
//! The four remote operations the board depends on. Nothing here touches
//! local state; callers apply the result only after the call succeeds.

mod http;

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::models::{BoardSnapshot, ColumnId, NewTask, Task, TaskId};

pub use http::HttpTaskGateway;

#[async_trait(?Send)]
pub trait TaskGateway {
    /// Load every column. Missing columns come back empty.
    async fn fetch_all(&self) -> GatewayResult<BoardSnapshot>;

    /// Create a task in `column` and return the server's copy (with its id).
    ///
    /// The title is not validated here; callers check it first.
    async fn create(&self, column: ColumnId, draft: &NewTask) -> GatewayResult<Task>;

    async fn remove(&self, column: ColumnId, task_id: &TaskId) -> GatewayResult<()>;

    /// Relocate `task`. Returns the server's copy when the response has one.
    async fn move_task(&self, from: ColumnId, to: ColumnId, task: &Task) -> GatewayResult<Option<Task>>;
}
