use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Metadata row for a file stored in the object store.
///
/// `storage_path` is `{owner_id}/{client_id}/{sanitized_relative_path}` and
/// is unique within the store. A row must never reference an object that was
/// not written: the row is inserted only after a successful storage write,
/// and rolled back (object deleted) if the insert fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ClientFile {
    pub id: Uuid,
    pub client_id: Uuid,
    pub owner_id: Uuid,
    pub file_name: String,
    pub storage_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a [`ClientFile`] row.
#[derive(Debug, Clone)]
pub struct NewClientFile {
    pub client_id: Uuid,
    pub owner_id: Uuid,
    pub file_name: String,
    pub storage_path: String,
    pub content_type: String,
    pub size_bytes: i64,
}
