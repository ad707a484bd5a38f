//! Implementation of Drive sync's `FileCatalog` trait.

use async_trait::async_trait;
use folio_core::{
    models::{Client, ClientFile},
    AppError,
};
use folio_drive::FileCatalog;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{ClientFileRepository, ClientRepository};

/// Postgres-backed catalog handed to `folio_drive::SyncService`.
#[derive(Clone)]
pub struct PgFileCatalog {
    clients: ClientRepository,
    files: ClientFileRepository,
}

impl PgFileCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            files: ClientFileRepository::new(pool),
        }
    }
}

#[async_trait]
impl FileCatalog for PgFileCatalog {
    async fn list_clients(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError> {
        self.clients.list_for_owner(owner_id).await
    }

    async fn get_client(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Client>, AppError> {
        self.clients.get(owner_id, client_id).await
    }

    async fn list_client_files(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<ClientFile>, AppError> {
        self.files.list_for_client(owner_id, client_id).await
    }
}
