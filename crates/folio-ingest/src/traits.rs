//! Collaborator traits for the relational metadata store.
//!
//! The pipeline never talks to a database directly; `folio-db` provides the
//! sqlx-backed implementations, and tests substitute in-memory fakes.

use async_trait::async_trait;
use folio_core::models::{Client, NewClientFile};
use folio_core::AppError;
use uuid::Uuid;

/// Client name → client record lookup and creation, scoped to an owner.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Look up a client by exact name. A missing row is `Ok(None)`, not an
    /// error; `Err` means the query itself failed.
    async fn find_client(&self, owner_id: Uuid, name: &str) -> Result<Option<Client>, AppError>;

    /// Insert a client row for `(owner_id, name)`.
    ///
    /// Implementations must converge with concurrent inserts of the same
    /// name: when another writer creates the row first, return that row
    /// instead of a duplicate.
    async fn insert_client(&self, owner_id: Uuid, name: &str) -> Result<Client, AppError>;
}

/// Sink for file metadata rows.
#[async_trait]
pub trait FileMetadataStore: Send + Sync {
    /// Insert a file record and return its id. Must only be called after the
    /// referenced object has been written to storage.
    async fn insert_file_record(&self, record: NewClientFile) -> Result<Uuid, AppError>;
}
