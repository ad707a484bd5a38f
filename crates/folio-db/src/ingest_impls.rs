//! Implementations of the ingestion pipeline's collaborator traits.
//!
//! `folio-ingest` defines `ClientDirectory` and `FileMetadataStore`; the
//! repositories here back them with Postgres. Uniqueness of `(owner_id,
//! name)` is enforced by the database, so concurrent resolutions of the same
//! unseen client name converge on one row.

use async_trait::async_trait;
use folio_core::{
    models::{Client, NewClientFile},
    AppError,
};
use folio_ingest::{ClientDirectory, FileMetadataStore};
use uuid::Uuid;

use crate::db::{ClientFileRepository, ClientRepository};

#[async_trait]
impl ClientDirectory for ClientRepository {
    async fn find_client(&self, owner_id: Uuid, name: &str) -> Result<Option<Client>, AppError> {
        self.find_by_name(owner_id, name).await
    }

    async fn insert_client(&self, owner_id: Uuid, name: &str) -> Result<Client, AppError> {
        self.insert(owner_id, name).await
    }
}

#[async_trait]
impl FileMetadataStore for ClientFileRepository {
    async fn insert_file_record(&self, record: NewClientFile) -> Result<Uuid, AppError> {
        let file = self.insert(record).await?;
        Ok(file.id)
    }
}
