//! Shared key generation for storage backends.
//!
//! Key format: `{owner_id}/{client_id}/{sanitized_relative_path}`.

use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

/// Generate the storage key for a file under a client's folder.
///
/// `relative_path` must already be sanitized; this function only assembles
/// the owner/client prefix. All backends must use this format for consistency.
pub fn object_key(owner_id: Uuid, client_id: Uuid, relative_path: &str) -> String {
    format!("{}/{}/{}", owner_id, client_id, relative_path)
}

/// Reject keys that could escape the store's namespace.
///
/// Keys are POSIX-style slash-separated strings; `..` segments, a leading
/// `/`, and empty segments are all invalid.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(storage_key.to_string()));
    }
    if storage_key.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(StorageError::InvalidKey(storage_key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_is_owner_client_scoped() {
        let owner = Uuid::new_v4();
        let client = Uuid::new_v4();
        let key = object_key(owner, client, "docs/invoice.pdf");
        assert_eq!(key, format!("{}/{}/docs/invoice.pdf", owner, client));
    }

    #[test]
    fn validate_key_rejects_traversal() {
        assert!(validate_key("a/../b").is_err());
        assert!(validate_key("/abs/path").is_err());
        assert!(validate_key("a//b").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key("a/b/c.txt").is_ok());
    }
}
