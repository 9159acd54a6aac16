//! Frontend Models
//!
//! Data structures matching the remote task API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three fixed board columns.
///
/// Serialized as `todo`, `inProgress`, `done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// All columns in display order
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inProgress",
            ColumnId::Done => "done",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    /// CSS modifier used for the column accent colour
    pub fn accent_class(self) -> &'static str {
        match self {
            ColumnId::Todo => "accent-rose",
            ColumnId::InProgress => "accent-amber",
            ColumnId::Done => "accent-emerald",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for ColumnId {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnId::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// Server-assigned task id. Opaque: numbers (integer or not) and strings are
/// both accepted and written back in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        TaskId::Number(id.into())
    }
}

impl From<i32> for TaskId {
    fn from(id: i32) -> Self {
        TaskId::Number(id.into())
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        TaskId::Text(id.to_string())
    }
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description to render, if any (empty strings are not shown)
    pub fn visible_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Creation intent sent to the server; the id is assigned remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Full board as returned by `GET /tasks`.
///
/// Missing or `null` columns mean an empty list; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo: Option<Vec<Task>>,
    #[serde(default, rename = "inProgress", skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<Vec<Task>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<Vec<Task>>,
}

impl BoardSnapshot {
    pub fn with(mut self, column: ColumnId, tasks: Vec<Task>) -> Self {
        *self.slot(column) = Some(tasks);
        self
    }

    /// Take a column's tasks out of the snapshot (empty if absent)
    pub fn take(&mut self, column: ColumnId) -> Vec<Task> {
        self.slot(column).take().unwrap_or_default()
    }

    fn slot(&mut self, column: ColumnId) -> &mut Option<Vec<Task>> {
        match column {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_id_wire_names() {
        assert_eq!(serde_json::to_value(ColumnId::InProgress).unwrap(), json!("inProgress"));
        assert_eq!("done".parse::<ColumnId>().unwrap(), ColumnId::Done);
        assert!("Done".parse::<ColumnId>().is_err());
    }

    #[test]
    fn test_task_id_keeps_wire_form() {
        let numeric: Task = serde_json::from_value(json!({"id": 1, "title": "A"})).unwrap();
        let textual: Task = serde_json::from_value(json!({"id": "abc-1", "title": "B"})).unwrap();

        assert_eq!(numeric.id, TaskId::from(1));
        assert_eq!(textual.id, TaskId::Text("abc-1".into()));
        assert_eq!(serde_json::to_value(&numeric).unwrap()["id"], json!(1));
        assert_eq!(serde_json::to_value(&textual).unwrap()["id"], json!("abc-1"));
    }

    #[test]
    fn test_task_id_accepts_any_json_number() {
        let fractional: Task = serde_json::from_value(json!({"id": 0.5321, "title": "A"})).unwrap();
        let huge: Task = serde_json::from_value(json!({"id": 18446744073709551615u64, "title": "B"})).unwrap();

        assert_eq!(fractional.id.to_string(), "0.5321");
        assert_eq!(serde_json::to_value(&fractional).unwrap()["id"], json!(0.5321));
        assert_eq!(huge.id.to_string(), "18446744073709551615");
        assert_ne!(fractional.id, TaskId::from(0));
    }

    #[test]
    fn test_snapshot_with_fractional_ids_decodes() {
        let snapshot: BoardSnapshot = serde_json::from_value(json!({
            "todo": [{"id": 0.25, "title": "A"}, {"id": 3, "title": "B"}]
        }))
        .unwrap();
        assert_eq!(snapshot.todo.map(|tasks| tasks.len()), Some(2));
    }

    #[test]
    fn test_visible_description() {
        assert_eq!(Task::new(1, "A").visible_description(), None);
        assert_eq!(Task::new(1, "A").with_description("").visible_description(), None);
        assert_eq!(Task::new(1, "A").with_description("x").visible_description(), Some("x"));
    }

    #[test]
    fn test_new_task_title_check() {
        assert!(!NewTask::new("   ", "desc").has_title());
        assert!(NewTask::new(" A ", "").has_title());
    }

    #[test]
    fn test_snapshot_missing_and_null_columns() {
        let mut snapshot: BoardSnapshot = serde_json::from_value(json!({
            "todo": [{"id": 1, "title": "A"}],
            "inProgress": null,
            "archived": [{"id": 9, "title": "Z"}]
        }))
        .unwrap();

        assert_eq!(snapshot.take(ColumnId::Todo), vec![Task::new(1, "A")]);
        assert!(snapshot.take(ColumnId::InProgress).is_empty());
        assert!(snapshot.take(ColumnId::Done).is_empty());
    }
}
