//! Folio Drive Integration
//!
//! Thin Google Drive v3 REST client plus a sync service that mirrors a
//! client's stored files into a per-client Drive folder.
//!
//! Authentication state is explicit: a [`DriveSession`] owns the access
//! token and persists it through an injected [`TokenStore`]; there is no
//! process-global session. The OAuth redirect flow itself belongs to the
//! caller; the session only produces the authorization URL and accepts the
//! redeemed token.

pub mod client;
pub mod error;
pub mod session;
pub mod sync;

// Re-export commonly used types
pub use client::{DriveApi, DriveClient, DriveFile, ShareRole, FOLDER_MIME_TYPE};
pub use error::DriveError;
pub use session::{DriveCredentials, DriveSession, FileTokenStore, TokenStore};
pub use sync::{FileCatalog, SyncReport, SyncService};
