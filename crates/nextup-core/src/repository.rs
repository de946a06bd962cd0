use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{format_date, NewTask, Task};

/// Persistence of tasks.
///
/// Listing operations return tasks ordered by date and capped at `limit`
/// rows.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, task: NewTask) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_upcoming_tasks(&self, from: NaiveDate, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn find_tasks_by_date(&self, date: NaiveDate, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn search_tasks(&self, text: &str, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, task: &Task) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
}

/// SQLite implementation of [`TaskRepository`]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    #[tracing::instrument(skip(self), fields(title = %task.title))]
    async fn add_task(&self, task: NewTask) -> Result<Task, CoreError> {
        let mut tx = self.pool.begin().await?;

        // RETURNING rows are drained so the statement completes before commit.
        let task: Task = sqlx::query_as(
            r#"INSERT INTO scheduler (date, title, comment, repeat)
            VALUES (?, ?, ?, ?)
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(&task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;

        tracing::debug!(id = task.id, date = %task.date, "task inserted");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT id, date, title, comment, repeat FROM scheduler WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_upcoming_tasks(&self, from: NaiveDate, limit: u32) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT id, date, title, comment, repeat
            FROM scheduler
            WHERE date >= ?
            ORDER BY date ASC
            LIMIT ?
            "#,
        )
        .bind(format_date(from))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn find_tasks_by_date(&self, date: NaiveDate, limit: u32) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT id, date, title, comment, repeat
            FROM scheduler
            WHERE date = ?
            ORDER BY id ASC
            LIMIT ?
            "#,
        )
        .bind(format_date(date))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn search_tasks(&self, text: &str, limit: u32) -> Result<Vec<Task>, CoreError> {
        let mut pattern = String::with_capacity(text.len() + 2);
        pattern.push('%');
        for c in text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');

        let tasks = sqlx::query_as(
            r#"SELECT id, date, title, comment, repeat
            FROM scheduler
            WHERE title LIKE ? ESCAPE '\' OR comment LIKE ? ESCAPE '\'
            ORDER BY date ASC
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, task), fields(id = task.id))]
    async fn update_task(&self, task: &Task) -> Result<Task, CoreError> {
        let mut tx = self.pool.begin().await?;

        let updated: Task = sqlx::query_as(
            r#"UPDATE scheduler
            SET date = ?, title = ?, comment = ?, repeat = ?
            WHERE id = ?
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(&task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(task.id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::NotFound(task.id.to_string()))?;

        tx.commit().await?;

        tracing::debug!(date = %updated.date, "task updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }

        tracing::debug!("task deleted");
        Ok(())
    }
}
