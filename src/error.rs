//! Gateway error types
//!
//! One failure variant per remote operation, each wrapping the transport or
//! server error that caused it.

use std::time::Duration;

use thiserror::Error;

use crate::models::{ColumnId, TaskId};

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// What went wrong on the wire
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent or the response could not be read
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// No response within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body was not the expected JSON
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures of the four remote task operations
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to fetch tasks: {source}")]
    FetchFailure {
        #[source]
        source: TransportError,
    },

    #[error("failed to create task in '{column}': {source}")]
    CreateFailure {
        column: ColumnId,
        #[source]
        source: TransportError,
    },

    #[error("failed to delete task {task_id} from '{column}': {source}")]
    DeleteFailure {
        column: ColumnId,
        task_id: TaskId,
        #[source]
        source: TransportError,
    },

    #[error("failed to move task {task_id} from '{from}' to '{to}': {source}")]
    MoveFailure {
        from: ColumnId,
        to: ColumnId,
        task_id: TaskId,
        #[source]
        source: TransportError,
    },
}

impl GatewayError {
    pub fn fetch(source: impl Into<TransportError>) -> Self {
        Self::FetchFailure { source: source.into() }
    }

    pub fn create(column: ColumnId, source: impl Into<TransportError>) -> Self {
        Self::CreateFailure { column, source: source.into() }
    }

    pub fn delete(column: ColumnId, task_id: TaskId, source: impl Into<TransportError>) -> Self {
        Self::DeleteFailure { column, task_id, source: source.into() }
    }

    pub fn move_failure(
        from: ColumnId,
        to: ColumnId,
        task_id: TaskId,
        source: impl Into<TransportError>,
    ) -> Self {
        Self::MoveFailure { from, to, task_id, source: source.into() }
    }

    /// The underlying transport error
    pub fn transport(&self) -> &TransportError {
        match self {
            Self::FetchFailure { source }
            | Self::CreateFailure { source, .. }
            | Self::DeleteFailure { source, .. }
            | Self::MoveFailure { source, .. } => source,
        }
    }

    /// Short user-facing message for the notice banner
    pub fn user_message(&self) -> String {
        let action = match self {
            Self::FetchFailure { .. } => "Could not load tasks",
            Self::CreateFailure { .. } => "Could not add the task",
            Self::DeleteFailure { .. } => "Could not delete the task",
            Self::MoveFailure { .. } => "Could not move the task",
        };
        format!("{} ({})", action, self.transport())
    }
}
