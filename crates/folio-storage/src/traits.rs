//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The ingestion pipeline and Drive sync work against it without coupling to
/// backend details.
///
/// **Key format:** `{owner_id}/{client_id}/{sanitized_relative_path}`. See the
/// crate root documentation and the `keys` module.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an object at `storage_key` with overwrite-allowed semantics.
    ///
    /// Re-uploading to an existing key replaces the object (upsert). The
    /// declared content type may be ignored by backends that do not record it;
    /// the authoritative content type lives in the metadata row.
    async fn put(&self, storage_key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Download an object by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete an object by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the size in bytes of an object, if it exists.
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
