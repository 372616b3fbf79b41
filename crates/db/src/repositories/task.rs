use sqlx::{sqlite::SqliteRow, Row};

use tododo_core::domain::task::{NewTask, Task, TaskStatus};

use super::{RepositoryError, TaskRepository};
use crate::DbPool;

pub struct SqlTaskRepository {
    pool: DbPool,
}

impl SqlTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn update_one(
        &self,
        query: &'static str,
        value: &str,
        task_id: i64,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(query).bind(value).bind(task_id).execute(&mut *tx).await?;

        let rows = result.rows_affected();
        if rows != 1 {
            tx.rollback().await?;
            return Err(RepositoryError::AmbiguousUpdate { task_id, rows });
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskRepository for SqlTaskRepository {
    async fn persist(&self, task: &NewTask) -> Result<i64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO task (status, title, assignee_id, channel_id) VALUES (?, ?, ?, ?)",
        )
        .bind(task.status.as_str())
        .bind(&task.title)
        .bind(&task.assignee_id)
        .bind(&task.channel_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_by_id(&self, id: i64) -> Result<Task, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, status, title, assignee_id, channel_id FROM task WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(task_from_row).transpose()?.ok_or(RepositoryError::NotFound(id))
    }

    async fn get_all_in_channel(&self, channel_id: &str) -> Result<Vec<Task>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, status, title, assignee_id, channel_id FROM task WHERE channel_id = ?",
        )
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(task_from_row).collect()
    }

    async fn assign_to(&self, task_id: i64, assignee_id: &str) -> Result<(), RepositoryError> {
        self.update_one("UPDATE task SET assignee_id = ? WHERE id = ?", assignee_id, task_id).await
    }

    async fn set_status(&self, task_id: i64, status: TaskStatus) -> Result<(), RepositoryError> {
        self.update_one("UPDATE task SET status = ? WHERE id = ?", status.as_str(), task_id).await
    }
}

fn task_from_row(row: SqliteRow) -> Result<Task, RepositoryError> {
    let status = row
        .get::<String, _>("status")
        .parse::<TaskStatus>()
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;

    Ok(Task {
        id: row.get("id"),
        status,
        title: row.get("title"),
        assignee_id: row.get("assignee_id"),
        channel_id: row.get("channel_id"),
    })
}
