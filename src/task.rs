//! The `Task` record and its status.
//!
//! # Invariants
//! - `id` is assigned by the store as `len + 1` while the store lock is
//!   held, so ids are unique and monotonically increasing
//! - A task is never removed once created

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a task.
///
/// Serialized as the JSON boolean `completed` for wire compatibility:
/// `Pending` ⇔ `false`, `Completed` ⇔ `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum TaskStatus {
    /// Task is waiting to be processed
    Pending,
    /// Task has been completed
    Completed,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl From<bool> for TaskStatus {
    fn from(completed: bool) -> Self {
        if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }
}

impl From<TaskStatus> for bool {
    fn from(status: TaskStatus) -> bool {
        status.is_completed()
    }
}

/// A tracked unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Sequential identifier, 1-based, assigned by the store
    pub id: u64,

    /// Human-readable description of the work
    pub description: String,

    /// Current status, `completed` on the wire
    #[serde(rename = "completed")]
    pub status: TaskStatus,

    /// Caller-supplied priority (carried, not interpreted)
    pub priority: i64,

    /// Creation time, assigned by the store
    pub created_at: DateTime<Utc>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}
