use folio_core::{
    models::{ClientFile, NewClientFile},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing client file metadata
///
/// Rows reference objects in the store by `storage_path`, which is unique.
/// A row must only be inserted after the object write succeeded; re-uploads
/// to the same path upsert the existing row rather than duplicating it.
#[derive(Clone)]
pub struct ClientFileRepository {
    pool: PgPool,
}

impl ClientFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a file record, upserting on `storage_path` for re-uploads
    #[tracing::instrument(skip(self, record), fields(db.table = "client_files", db.operation = "insert"))]
    pub async fn insert(&self, record: NewClientFile) -> Result<ClientFile, AppError> {
        let file = sqlx::query_as::<Postgres, ClientFile>(
            r#"
            INSERT INTO client_files (client_id, owner_id, file_name, storage_path, content_type, size_bytes)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (storage_path) DO UPDATE
                SET file_name = EXCLUDED.file_name,
                    content_type = EXCLUDED.content_type,
                    size_bytes = EXCLUDED.size_bytes
            RETURNING id, client_id, owner_id, file_name, storage_path, content_type, size_bytes, created_at
            "#,
        )
        .bind(record.client_id)
        .bind(record.owner_id)
        .bind(&record.file_name)
        .bind(&record.storage_path)
        .bind(&record.content_type)
        .bind(record.size_bytes)
        .fetch_one(&self.pool)
        .await?;

        Ok(file)
    }

    /// List all file records for a client, in upload order
    #[tracing::instrument(skip(self), fields(db.table = "client_files", db.operation = "select"))]
    pub async fn list_for_client(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<ClientFile>, AppError> {
        let files = sqlx::query_as::<Postgres, ClientFile>(
            r#"
            SELECT id, client_id, owner_id, file_name, storage_path, content_type, size_bytes, created_at
            FROM client_files
            WHERE owner_id = $1 AND client_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    /// Get a file record by ID (owner-scoped)
    #[tracing::instrument(skip(self), fields(db.table = "client_files", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ClientFile>, AppError> {
        let file = sqlx::query_as::<Postgres, ClientFile>(
            r#"
            SELECT id, client_id, owner_id, file_name, storage_path, content_type, size_bytes, created_at
            FROM client_files
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    /// Delete a file record (owner-scoped). The caller is responsible for
    /// deleting the storage object first.
    #[tracing::instrument(skip(self), fields(db.table = "client_files", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM client_files WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("File record {}", id)));
        }

        Ok(())
    }
}
