//! Upload coordination
//!
//! Drives one batch: resolve each client, then per file check the size cap,
//! sanitize the path, write the object, insert the metadata row, and on a
//! failed insert delete the just-written object so no row ever points at a
//! missing object. Oversize files fail individually before any write. Files
//! and clients are processed strictly sequentially; errors are contained at
//! the smallest applicable granularity so one failure never aborts the batch.

use std::sync::Arc;

use folio_core::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_MAX_FILE_SIZE_BYTES};
use folio_core::models::NewClientFile;
use folio_storage::{keys::object_key, Storage};
use uuid::Uuid;

use crate::error::IngestError;
use crate::report::IngestionReport;
use crate::resolver::ClientResolver;
use crate::sanitize::sanitize_path;
use crate::traits::{ClientDirectory, FileMetadataStore};
use crate::types::{ClassifiedFile, UploadBatch};

pub struct UploadCoordinator {
    storage: Arc<dyn Storage>,
    metadata: Arc<dyn FileMetadataStore>,
    resolver: ClientResolver,
    max_file_size_bytes: usize,
}

impl UploadCoordinator {
    pub fn new(
        storage: Arc<dyn Storage>,
        directory: Arc<dyn ClientDirectory>,
        metadata: Arc<dyn FileMetadataStore>,
    ) -> Self {
        Self {
            storage,
            metadata,
            resolver: ClientResolver::new(directory),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }

    /// Override the per-file size cap (`Config::max_file_size_bytes`).
    pub fn with_max_file_size(mut self, max_file_size_bytes: usize) -> Self {
        self.max_file_size_bytes = max_file_size_bytes;
        self
    }

    /// Ingest one classified batch for `owner_id` and return the summary.
    pub async fn ingest(&self, batch: UploadBatch, owner_id: Uuid) -> IngestionReport {
        self.ingest_with_progress(batch, owner_id, |_, _| {}).await
    }

    /// Like [`ingest`](Self::ingest), with a per-file observer invoked after
    /// each upload attempt (file name, error if the file failed). Useful for
    /// incremental UI notifications; the final report is authoritative.
    pub async fn ingest_with_progress<F>(
        &self,
        batch: UploadBatch,
        owner_id: Uuid,
        mut on_file: F,
    ) -> IngestionReport
    where
        F: FnMut(&str, Option<&IngestError>),
    {
        let mut report = IngestionReport::new();
        for warning in batch.warnings {
            report.add_warning(warning);
        }

        for group in batch.groups {
            let client_id = match self.resolver.resolve(owner_id, &group.client_name).await {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(
                        client_name = %group.client_name,
                        error = %err,
                        "Client resolution failed; skipping its files"
                    );
                    let message = err.to_string();
                    for classified in &group.files {
                        on_file(classified.file.file_name(), Some(&err));
                        report.record_failure(&group.client_name, message.clone());
                    }
                    continue;
                }
            };

            for classified in group.files {
                let file_name = classified.file.file_name().to_string();
                match self.upload_one(owner_id, client_id, classified).await {
                    Ok(()) => {
                        on_file(&file_name, None);
                        report.record_success(&group.client_name);
                    }
                    Err(err) => {
                        tracing::warn!(
                            client_name = %group.client_name,
                            file_name = %file_name,
                            error = %err,
                            "File upload failed"
                        );
                        on_file(&file_name, Some(&err));
                        report.record_failure(&group.client_name, err.to_string());
                    }
                }
            }
        }

        tracing::info!(
            succeeded = report.total_succeeded(),
            failed = report.total_failed(),
            warnings = report.warnings().len(),
            "Batch ingest finished"
        );

        report
    }

    /// Upload one file: size check, storage write, then metadata insert,
    /// with a compensating delete when the insert fails.
    async fn upload_one(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
        classified: ClassifiedFile,
    ) -> Result<(), IngestError> {
        if classified.file.data.len() > self.max_file_size_bytes {
            return Err(IngestError::FileTooLarge {
                file_name: classified.file.file_name().to_string(),
                size_bytes: classified.file.data.len(),
                limit_bytes: self.max_file_size_bytes,
            });
        }

        let sanitized = sanitize_path(&classified.path_in_folder);
        let storage_path = object_key(owner_id, client_id, &sanitized);
        let file_name = classified.file.file_name().to_string();
        let content_type = classified
            .file
            .content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let size_bytes = classified.file.data.len() as i64;

        self.storage
            .put(&storage_path, classified.file.data, &content_type)
            .await
            .map_err(|e| IngestError::Storage {
                file_name: file_name.clone(),
                source: e,
            })?;

        let record = NewClientFile {
            client_id,
            owner_id,
            file_name: file_name.clone(),
            storage_path: storage_path.clone(),
            content_type,
            size_bytes,
        };

        if let Err(db_err) = self.metadata.insert_file_record(record).await {
            let compensation_failed = match self.storage.delete(&storage_path).await {
                Ok(()) => false,
                Err(del_err) => {
                    tracing::error!(
                        key = %storage_path,
                        error = %del_err,
                        "Compensating delete failed; object left without a metadata row"
                    );
                    true
                }
            };
            return Err(IngestError::Metadata {
                file_name,
                source: db_err,
                compensation_failed,
            });
        }

        Ok(())
    }
}
