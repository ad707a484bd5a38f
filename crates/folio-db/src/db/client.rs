use folio_core::{models::Client, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for managing clients
///
/// Client names are unique per owner, enforced by a unique index on
/// `(owner_id, name)`. `insert` converges with concurrent inserts of the same
/// name instead of failing, so find-or-create flows cannot duplicate a client.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a client by exact name for an owner
    #[tracing::instrument(skip(self), fields(db.table = "clients", db.operation = "select"))]
    pub async fn find_by_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<Postgres, Client>(
            "SELECT id, owner_id, name, created_at, updated_at FROM clients WHERE owner_id = $1 AND name = $2",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Insert a client for `(owner_id, name)`.
    ///
    /// Uses `ON CONFLICT DO NOTHING` plus a re-select so that two concurrent
    /// inserts of the same unseen name converge on the winner's row.
    #[tracing::instrument(skip(self), fields(db.table = "clients", db.operation = "insert"))]
    pub async fn insert(&self, owner_id: Uuid, name: &str) -> Result<Client, AppError> {
        let inserted = sqlx::query_as::<Postgres, Client>(
            r#"
            INSERT INTO clients (owner_id, name)
            VALUES ($1, $2)
            ON CONFLICT (owner_id, name) DO NOTHING
            RETURNING id, owner_id, name, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(client) = inserted {
            return Ok(client);
        }

        // Another writer won the race; their row is ours.
        self.find_by_name(owner_id, name)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Client \"{}\" vanished after conflicting insert", name)))
    }

    /// Get client by ID (owner-scoped)
    #[tracing::instrument(skip(self), fields(db.table = "clients", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<Postgres, Client>(
            "SELECT id, owner_id, name, created_at, updated_at FROM clients WHERE owner_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// List all clients for an owner, by name
    #[tracing::instrument(skip(self), fields(db.table = "clients", db.operation = "select"))]
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<Postgres, Client>(
            "SELECT id, owner_id, name, created_at, updated_at FROM clients WHERE owner_id = $1 ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }
}
