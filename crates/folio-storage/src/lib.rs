//! Folio Storage Library
//!
//! This crate provides the object-store abstraction and implementations for
//! Folio. It includes the `Storage` trait and backends for S3-compatible
//! stores and the local filesystem.
//!
//! # Storage key format
//!
//! Storage keys are owner- and client-scoped. All backends use the same key
//! layout for consistency:
//!
//! - `{owner_id}/{client_id}/{sanitized_relative_path}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use folio_core::StorageBackend;
pub use keys::object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
