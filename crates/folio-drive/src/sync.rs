//! Drive sync service
//!
//! Mirrors a client's stored files into a Drive folder named after the
//! client. Per-file failures accumulate in the report; only catalog and
//! folder-level failures abort a client's sync.

use std::sync::Arc;

use folio_core::models::ClientFile;
use folio_core::{models::Client, AppError};
use folio_storage::Storage;
use serde::Serialize;
use uuid::Uuid;

use crate::client::{DriveApi, FOLDER_MIME_TYPE};
use crate::error::DriveError;
use crate::session::DriveSession;

/// Read-only view of clients and their file metadata, implemented by the
/// database layer.
#[async_trait::async_trait]
pub trait FileCatalog: Send + Sync {
    async fn list_clients(&self, owner_id: Uuid) -> Result<Vec<Client>, AppError>;

    async fn get_client(&self, owner_id: Uuid, client_id: Uuid)
        -> Result<Option<Client>, AppError>;

    async fn list_client_files(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<ClientFile>, AppError>;
}

/// Outcome of one sync invocation.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub synced: usize,
    pub errors: Vec<String>,
}

impl SyncReport {
    fn merge(&mut self, other: SyncReport) {
        self.synced += other.synced;
        self.errors.extend(other.errors);
    }
}

pub struct SyncService {
    catalog: Arc<dyn FileCatalog>,
    storage: Arc<dyn Storage>,
    drive: Arc<dyn DriveApi>,
}

impl SyncService {
    pub fn new(
        catalog: Arc<dyn FileCatalog>,
        storage: Arc<dyn Storage>,
        drive: Arc<dyn DriveApi>,
    ) -> Self {
        Self {
            catalog,
            storage,
            drive,
        }
    }

    /// Sync one client's files into its Drive folder.
    pub async fn sync_client(
        &self,
        session: &DriveSession,
        owner_id: Uuid,
        client_id: Uuid,
    ) -> Result<SyncReport, AppError> {
        let mut report = SyncReport::default();

        let files = self.catalog.list_client_files(owner_id, client_id).await?;
        if files.is_empty() {
            tracing::debug!(client_id = %client_id, "No files to sync");
            return Ok(report);
        }

        let folder_name = self
            .catalog
            .get_client(owner_id, client_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| format!("Client_{}", client_id));

        let folder_id = self.ensure_folder(session, &folder_name).await?;

        for file in files {
            match self.sync_one(session, &folder_id, &file).await {
                Ok(()) => report.synced += 1,
                Err(e) => {
                    tracing::warn!(
                        file_name = %file.file_name,
                        error = %e,
                        "Failed to sync file to Drive"
                    );
                    report
                        .errors
                        .push(format!("Error syncing {}: {}", file.file_name, e));
                }
            }
        }

        tracing::info!(
            client_name = %folder_name,
            synced = report.synced,
            errors = report.errors.len(),
            "Client sync finished"
        );

        Ok(report)
    }

    /// Sync every client of an owner; per-client results are merged.
    pub async fn sync_all(
        &self,
        session: &DriveSession,
        owner_id: Uuid,
    ) -> Result<SyncReport, AppError> {
        let mut report = SyncReport::default();
        for client in self.catalog.list_clients(owner_id).await? {
            report.merge(self.sync_client(session, owner_id, client.id).await?);
        }
        Ok(report)
    }

    /// Create the client folder, falling back to a lookup when creation
    /// fails because it already exists.
    async fn ensure_folder(
        &self,
        session: &DriveSession,
        name: &str,
    ) -> Result<String, DriveError> {
        let create_err = match self.drive.create_folder(session, name, None).await {
            Ok(folder) => return Ok(folder.id),
            Err(e) => e,
        };

        let existing = self.drive.list_files(session, None, Some(name)).await?;
        existing
            .into_iter()
            .find(|f| f.mime_type == FOLDER_MIME_TYPE)
            .map(|f| f.id)
            .ok_or(create_err)
    }

    async fn sync_one(
        &self,
        session: &DriveSession,
        folder_id: &str,
        file: &ClientFile,
    ) -> Result<(), AppError> {
        let data = self
            .storage
            .download(&file.storage_path)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        self.drive
            .upload_file(
                session,
                &file.file_name,
                &file.content_type,
                data.into(),
                Some(folder_id),
            )
            .await?;

        Ok(())
    }
}
