//! Folio Database Layer
//!
//! This crate provides database repositories and data access functionality.
//! Repositories own a `PgPool` and expose owner-scoped CRUD and specialized
//! queries; they also implement the collaborator traits the ingestion
//! pipeline and Drive sync work against.

pub mod db;
pub mod drive_impls;
pub mod ingest_impls;

// Re-exports: repositories
pub use db::{ClientFileRepository, ClientRepository, ReminderRepository, TaskRepository};
