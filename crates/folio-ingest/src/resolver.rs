//! Client name resolution
//!
//! Maps a client name to a stable client id, creating the record on first
//! encounter. Uniqueness of `(owner_id, name)` is enforced by the directory
//! implementation (unique index + conflict-converging insert), so concurrent
//! resolutions of the same unseen name yield the same row.

use crate::error::IngestError;
use crate::traits::ClientDirectory;
use std::sync::Arc;
use uuid::Uuid;

pub struct ClientResolver {
    directory: Arc<dyn ClientDirectory>,
}

impl ClientResolver {
    pub fn new(directory: Arc<dyn ClientDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve `name` to a client id for `owner_id`, inserting a new client
    /// row when none exists. Any failure is fatal for this name: the caller
    /// skips all of the client's files.
    pub async fn resolve(&self, owner_id: Uuid, name: &str) -> Result<Uuid, IngestError> {
        let found = match self.directory.find_client(owner_id, name).await {
            Ok(found) => found,
            // A "no rows" error from the backend is the same as a clean miss.
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                return Err(IngestError::Resolution {
                    client_name: name.to_string(),
                    source: e,
                })
            }
        };

        if let Some(client) = found {
            return Ok(client.id);
        }

        tracing::debug!(owner_id = %owner_id, name = %name, "No existing client; creating");

        self.directory
            .insert_client(owner_id, name)
            .await
            .map(|client| client.id)
            .map_err(|e| IngestError::Resolution {
                client_name: name.to_string(),
                source: e,
            })
    }
}
