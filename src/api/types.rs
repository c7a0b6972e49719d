//! API request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to add a new task.
///
/// `id`, `completed`, and `created_at` are assigned by the store and
/// cannot be supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// The task description
    pub description: String,

    /// Optional priority (carried, not interpreted)
    #[serde(default)]
    pub priority: i64,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Task counts by status.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Total number of tasks ever created
    pub total: usize,

    /// Number of tasks still pending
    pub pending: usize,

    /// Number of completed tasks
    pub completed: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
