//! Folio Ingestion Library
//!
//! Bulk client-folder ingestion: a directory selection yields a flat list of
//! files with relative paths (`ClientFolder/sub/file.ext`). This crate
//! classifies those paths into per-client groups, resolves client names to
//! client records (creating them on demand), sanitizes paths into
//! storage-safe keys, and uploads each file to the object store while keeping
//! the relational metadata consistent: a metadata row is only ever written
//! after its object, and rolled back (object deleted) if the row insert fails.
//!
//! Persistence is behind the [`ClientDirectory`] and [`FileMetadataStore`]
//! traits; the object store is behind `folio_storage::Storage`. Processing is
//! sequential by design: one in-flight operation bounds storage load and
//! keeps per-file error attribution simple.

pub mod classify;
pub mod coordinator;
pub mod error;
pub mod report;
pub mod resolver;
pub mod sanitize;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use classify::{classify, classify_batch};
pub use coordinator::UploadCoordinator;
pub use error::IngestError;
pub use report::{ClientOutcome, IngestionReport};
pub use resolver::ClientResolver;
pub use sanitize::{sanitize_name, sanitize_path};
pub use traits::{ClientDirectory, FileMetadataStore};
pub use types::{ClassifiedFile, ClientGroup, IncomingFile, UploadBatch};
