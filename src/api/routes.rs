//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::{SharedTaskStore, TaskStore};
use crate::task::Task;

use super::types::*;

/// Shared application state.
pub struct AppState {
    pub store: SharedTaskStore,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store: SharedTaskStore = Arc::new(TaskStore::new());
    let state = Arc::new(AppState { store });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router around shared state.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(add_task))
        .route("/tasks/process", get(process_tasks))
        .route("/tasks/stats", get(get_stats))
        .route("/tasks/:id/complete", put(complete_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for a shutdown signal (ctrl-c or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List all tasks.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.store.list().await)
}

/// Add a new task.
///
/// Malformed JSON bodies are rejected by the `Json` extractor with a
/// client error rather than silently inserting a zero-value task.
async fn add_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Json<Task> {
    let task = state
        .store
        .add(req.description, req.priority, req.due_date)
        .await;

    tracing::debug!(id = task.id, "task added");
    Json(task)
}

/// Mark a task as completed.
///
/// A non-numeric id segment is rejected by the `Path` extractor with a
/// client error rather than being treated as id 0.
async fn complete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, (StatusCode, String)> {
    match state.store.complete(id).await {
        Some(task) => Ok(Json(task)),
        None => Err((StatusCode::NOT_FOUND, "Task not found".to_string())),
    }
}

/// Mark every pending task as completed.
async fn process_tasks(State(state): State<Arc<AppState>>) -> &'static str {
    let flipped = state.store.complete_all().await;
    tracing::debug!(flipped, "batch processed tasks");
    "All tasks processed"
}

/// Get task counts by status.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let tasks = state.store.list().await;
    let completed = tasks.iter().filter(|t| t.status.is_completed()).count();

    Json(StatsResponse {
        total: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            store: Arc::new(TaskStore::new()),
        })
    }

    #[tokio::test]
    async fn test_add_then_complete_round_trip() {
        let state = state();

        let Json(created) = add_task(
            State(Arc::clone(&state)),
            Json(CreateTaskRequest {
                description: "buy milk".to_string(),
                priority: 1,
                due_date: None,
            }),
        )
        .await;

        assert_eq!(created.id, 1);
        assert_eq!(created.priority, 1);
        assert_eq!(created.status, TaskStatus::Pending);

        let Json(updated) = complete_task(State(Arc::clone(&state)), Path(1))
            .await
            .unwrap();
        assert_eq!(updated.id, 1);
        assert!(updated.status.is_completed());
    }

    #[tokio::test]
    async fn test_complete_unknown_id_is_404() {
        let state = state();

        let err = complete_task(State(state), Path(999)).await.unwrap_err();
        assert_eq!(err, (StatusCode::NOT_FOUND, "Task not found".to_string()));
    }

    #[tokio::test]
    async fn test_process_completes_everything() {
        let state = state();
        state.store.add("one".to_string(), 0, None).await;
        state.store.add("two".to_string(), 0, None).await;

        let body = process_tasks(State(Arc::clone(&state))).await;
        assert_eq!(body, "All tasks processed");

        let Json(tasks) = list_tasks(State(state)).await;
        assert!(tasks.iter().all(|t| t.status.is_completed()));
    }

    #[tokio::test]
    async fn test_stats_counts_by_status() {
        let state = state();
        state.store.add("one".to_string(), 0, None).await;
        state.store.add("two".to_string(), 0, None).await;
        state.store.complete(1).await;

        let Json(stats) = get_stats(State(state)).await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completed, 1);
    }
}
