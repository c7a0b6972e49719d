//! The shared in-memory task store.
//!
//! One coarse lock guards the whole collection. Every operation takes the
//! lock only for its critical section; simulated work in the worker pool
//! happens outside it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::task::{Task, TaskStatus};

/// Shared handle to a [`TaskStore`].
///
/// Constructed once at process start and passed into the router state and
/// the worker pool, rather than living in a global.
pub type SharedTaskStore = Arc<TaskStore>;

/// Mutex-guarded, append-only collection of tasks.
///
/// # Invariants
/// - Ids are assigned as `len + 1` under the lock, so they are unique and
///   monotonically increasing
/// - Tasks are never removed, so the collection only grows
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new task and return the created record.
    ///
    /// The id is computed as the current length + 1 while the lock is
    /// held. Description emptiness and due-date validity are not
    /// validated.
    pub async fn add(
        &self,
        description: String,
        priority: i64,
        due_date: Option<DateTime<Utc>>,
    ) -> Task {
        let mut tasks = self.tasks.lock().await;

        let task = Task {
            id: tasks.len() as u64 + 1,
            description,
            status: TaskStatus::Pending,
            priority,
            created_at: Utc::now(),
            due_date,
        };

        tasks.push(task.clone());
        task
    }

    /// Mark the first task with a matching id as completed.
    ///
    /// Returns the updated record, or `None` if no task matches.
    pub async fn complete(&self, id: u64) -> Option<Task> {
        let mut tasks = self.tasks.lock().await;

        let task = tasks.iter_mut().find(|t| t.id == id)?;
        task.status = TaskStatus::Completed;
        Some(task.clone())
    }

    /// Snapshot of all tasks, safe to read without the lock afterward.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }

    /// Mark every pending task as completed under one lock acquisition.
    ///
    /// Returns how many tasks were flipped.
    pub async fn complete_all(&self) -> usize {
        let mut tasks = self.tasks.lock().await;

        let mut flipped = 0;
        for task in tasks.iter_mut() {
            if !task.status.is_completed() {
                task.status = TaskStatus::Completed;
                flipped += 1;
            }
        }
        flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequential_ids() {
        let store = TaskStore::new();

        let first = store.add("one".to_string(), 0, None).await;
        let second = store.add("two".to_string(), 0, None).await;
        let third = store.add("three".to_string(), 0, None).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
        assert_eq!(first.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_complete_marks_only_matching_task() {
        let store = TaskStore::new();
        store.add("one".to_string(), 0, None).await;
        store.add("two".to_string(), 0, None).await;

        let updated = store.complete(1).await.unwrap();
        assert_eq!(updated.id, 1);
        assert!(updated.status.is_completed());

        let tasks = store.list().await;
        assert!(tasks[0].status.is_completed());
        assert!(!tasks[1].status.is_completed());
    }

    #[tokio::test]
    async fn test_complete_unknown_id_leaves_store_unchanged() {
        let store = TaskStore::new();
        store.add("one".to_string(), 0, None).await;

        assert!(store.complete(999).await.is_none());

        let tasks = store.list().await;
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].status.is_completed());
    }

    #[tokio::test]
    async fn test_concurrent_adds_assign_distinct_ids() {
        let store = Arc::new(TaskStore::new());

        let mut handles = Vec::new();
        for n in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add(format!("task {}", n), 0, None).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut ids: Vec<u64> = store.list().await.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_list_returns_independent_snapshot() {
        let store = TaskStore::new();
        store.add("one".to_string(), 0, None).await;

        let snapshot = store.list().await;
        store.complete(1).await;

        assert!(!snapshot[0].status.is_completed());
        assert!(store.list().await[0].status.is_completed());
    }

    #[tokio::test]
    async fn test_complete_all_flips_only_pending() {
        let store = TaskStore::new();
        store.add("one".to_string(), 0, None).await;
        store.add("two".to_string(), 0, None).await;
        store.complete(1).await;

        assert_eq!(store.complete_all().await, 1);
        assert!(store.list().await.iter().all(|t| t.status.is_completed()));
        assert_eq!(store.complete_all().await, 0);
    }
}
