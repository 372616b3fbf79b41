use async_trait::async_trait;
use thiserror::Error;

use tododo_core::domain::task::{NewTask, Task, TaskStatus};

pub mod task;

pub use task::SqlTaskRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("no task with id {0}")]
    NotFound(i64),
    #[error("expected exactly one row to be affected for task {task_id}, affected {rows}")]
    AmbiguousUpdate { task_id: i64, rows: u64 },
}

/// Persistence operations on the `task` table. The store owns id assignment;
/// callers never fabricate one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new row and returns the store-assigned id.
    async fn persist(&self, task: &NewTask) -> Result<i64, RepositoryError>;

    /// Returns the task, or `NotFound` when no row matches.
    async fn get_by_id(&self, id: i64) -> Result<Task, RepositoryError>;

    /// Returns all tasks in the channel. An unknown channel yields an empty
    /// Vec, not an error. No ordering is imposed beyond scan order.
    async fn get_all_in_channel(&self, channel_id: &str) -> Result<Vec<Task>, RepositoryError>;

    /// Updates the assignee of exactly one row, or fails with
    /// `AmbiguousUpdate` when the affected-row count is not 1.
    async fn assign_to(&self, task_id: i64, assignee_id: &str) -> Result<(), RepositoryError>;

    /// Same contract as `assign_to`, for the status column.
    async fn set_status(&self, task_id: i64, status: TaskStatus) -> Result<(), RepositoryError>;
}
