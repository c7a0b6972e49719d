//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /tasks` - List all tasks
//! - `POST /tasks` - Add a new task
//! - `PUT /tasks/:id/complete` - Mark a task as completed
//! - `GET /tasks/process` - Mark every pending task as completed
//! - `GET /tasks/stats` - Task counts by status
//! - `GET /health` - Health check

pub mod routes;
pub mod types;

pub use routes::serve;
pub use types::*;
