use chrono::{DateTime, Utc};
use folio_core::{models::Reminder, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing dashboard reminders
#[derive(Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List reminders for an owner, newest first
    #[tracing::instrument(skip(self), fields(db.table = "reminders", db.operation = "select"))]
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, AppError> {
        let reminders = sqlx::query_as::<Postgres, Reminder>(
            r#"
            SELECT id, owner_id, title, description, remind_at, is_completed, created_at, updated_at
            FROM reminders
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    /// Create a new reminder
    #[tracing::instrument(skip(self, description), fields(db.table = "reminders", db.operation = "insert"))]
    pub async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        description: Option<String>,
        remind_at: Option<DateTime<Utc>>,
    ) -> Result<Reminder, AppError> {
        let reminder = sqlx::query_as::<Postgres, Reminder>(
            r#"
            INSERT INTO reminders (owner_id, title, description, remind_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, remind_at, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&title)
        .bind(&description)
        .bind(remind_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder)
    }

    /// Update a reminder (partial; absent fields keep their value)
    #[tracing::instrument(skip(self, title, description), fields(db.table = "reminders", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        title: Option<String>,
        description: Option<String>,
        remind_at: Option<DateTime<Utc>>,
    ) -> Result<Reminder, AppError> {
        let reminder = sqlx::query_as::<Postgres, Reminder>(
            r#"
            UPDATE reminders
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                remind_at = COALESCE($5, remind_at),
                updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING id, owner_id, title, description, remind_at, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(remind_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reminder {}", id)))?;

        Ok(reminder)
    }

    /// Mark a reminder completed or not
    #[tracing::instrument(skip(self), fields(db.table = "reminders", db.operation = "update", db.record_id = %id))]
    pub async fn set_completed(
        &self,
        owner_id: Uuid,
        id: Uuid,
        is_completed: bool,
    ) -> Result<Reminder, AppError> {
        let reminder = sqlx::query_as::<Postgres, Reminder>(
            r#"
            UPDATE reminders
            SET is_completed = $3, updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING id, owner_id, title, description, remind_at, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(is_completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reminder {}", id)))?;

        Ok(reminder)
    }

    /// Delete a reminder
    #[tracing::instrument(skip(self), fields(db.table = "reminders", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reminders WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Reminder {}", id)));
        }

        Ok(())
    }
}
