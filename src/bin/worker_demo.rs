//! Worker pool demo server.
//!
//! Seeds three tasks, processes them with a fixed-size worker pool, then
//! serves a single HTML page listing the tasks with formatted due dates.
//!
//! Listens on `$PORT` (default 8080); worker count and simulated work
//! duration come from `WORKERS` and `WORKER_DELAY_MS`.

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};
use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasktrack::{
    config::Config,
    store::{SharedTaskStore, TaskStore},
    worker::{WorkerPool, WorkerPoolConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasktrack=debug,worker_demo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: SharedTaskStore = Arc::new(TaskStore::new());
    seed_tasks(&store).await;

    let pool_config = WorkerPoolConfig::new(config.workers)?.with_delay(config.worker_delay);
    let processed = WorkerPool::new(pool_config).run(&store).await?;
    info!("All {} tasks processed", processed);

    let app = Router::new().route("/", get(index)).with_state(store);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the demo's three hardcoded tasks.
async fn seed_tasks(store: &SharedTaskStore) {
    let now = Utc::now();
    store
        .add(
            "Write project report".to_string(),
            0,
            Some(now + Duration::days(1)),
        )
        .await;
    store
        .add(
            "Review pull requests".to_string(),
            0,
            Some(now + Duration::days(2)),
        )
        .await;
    store
        .add("Plan sprint backlog".to_string(), 0, Some(now + Duration::days(3)))
        .await;
}

/// Render the task list as an HTML fragment.
async fn index(State(store): State<SharedTaskStore>) -> Html<String> {
    let tasks = store.list().await;

    let mut page = String::from("<h1>Tasks</h1>\n<ul>\n");
    for task in tasks {
        let due = task
            .due_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "none".to_string());
        let status = if task.status.is_completed() {
            "completed"
        } else {
            "pending"
        };
        page.push_str(&format!(
            "<li>#{} {} [{}] (due {})</li>\n",
            task.id, task.description, status, due
        ));
    }
    page.push_str("</ul>\n");

    Html(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lists_seeded_tasks() {
        let store: SharedTaskStore = Arc::new(TaskStore::new());
        seed_tasks(&store).await;

        let Html(page) = index(State(store)).await;

        assert!(page.contains("<h1>Tasks</h1>"));
        assert!(page.contains("#1 Write project report"));
        assert!(page.contains("pending"));
        assert_eq!(page.matches("<li>").count(), 3);
    }
}
