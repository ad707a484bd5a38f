//! Ingestion error taxonomy
//!
//! A closed set of stage-tagged variants so callers can match on where a file
//! failed instead of inspecting message contents. Classification errors are
//! non-fatal (the file is excluded); resolution errors fail every file of the
//! affected client; size, storage, and metadata errors fail a single file.

use folio_core::AppError;
use folio_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File \"{path}\" is not inside a client folder")]
    Classification { path: String },

    #[error("Could not resolve client \"{client_name}\": {source}")]
    Resolution {
        client_name: String,
        #[source]
        source: AppError,
    },

    #[error("File \"{file_name}\" is {size_bytes} bytes, over the {limit_bytes} byte limit")]
    FileTooLarge {
        file_name: String,
        size_bytes: usize,
        limit_bytes: usize,
    },

    #[error("Storage write failed for \"{file_name}\": {source}")]
    Storage {
        file_name: String,
        #[source]
        source: StorageError,
    },

    #[error("Metadata write failed for \"{file_name}\": {source}")]
    Metadata {
        file_name: String,
        #[source]
        source: AppError,
        /// True when the compensating object delete also failed, leaving an
        /// orphaned object in storage. Logged, never retried.
        compensation_failed: bool,
    },
}
