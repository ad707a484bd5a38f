use chrono::{DateTime, Utc};
use folio_core::{
    models::{Task, TaskPriority},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing dashboard tasks
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List tasks for an owner, newest first
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select"))]
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<Postgres, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, priority, is_completed, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Create a new task
    #[tracing::instrument(skip(self, description), fields(db.table = "tasks", db.operation = "insert"))]
    pub async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        priority: TaskPriority,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, due_date, priority)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, title, description, due_date, priority, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&title)
        .bind(&description)
        .bind(due_date)
        .bind(priority)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Update a task (partial; absent fields keep their value)
    #[tracing::instrument(skip(self, title, description), fields(db.table = "tasks", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        priority: Option<TaskPriority>,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                due_date = COALESCE($5, due_date),
                priority = COALESCE($6, priority),
                updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING id, owner_id, title, description, due_date, priority, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(priority)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {}", id)))?;

        Ok(task)
    }

    /// Mark a task completed or not
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "update", db.record_id = %id))]
    pub async fn set_completed(
        &self,
        owner_id: Uuid,
        id: Uuid,
        is_completed: bool,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(
            r#"
            UPDATE tasks
            SET is_completed = $3, updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING id, owner_id, title, description, due_date, priority, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(is_completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {}", id)))?;

        Ok(task)
    }

    /// Delete a task
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {}", id)));
        }

        Ok(())
    }
}
