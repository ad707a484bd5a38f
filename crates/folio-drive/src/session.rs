//! Drive session and token persistence
//!
//! The session is an explicit object: credentials in, token held privately,
//! persistence delegated to an injected [`TokenStore`]. Restoring a session
//! loads any previously saved token; signing out clears it.

use std::path::PathBuf;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::DriveError;

const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";
const AUTH_ENDPOINT: &str = "https://accounts.google.com/oauth/authorize";

/// Persistence interface for the Drive access token.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, DriveError>;
    async fn save(&self, token: &str) -> Result<(), DriveError>;
    async fn clear(&self) -> Result<(), DriveError>;
}

#[derive(Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
}

/// Token store backed by a JSON file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, DriveError> {
        match fs::read(&self.path).await {
            Ok(data) => {
                let stored: StoredToken = serde_json::from_slice(&data)
                    .map_err(|e| DriveError::TokenStore(e.to_string()))?;
                Ok(Some(stored.access_token))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DriveError::TokenStore(e.to_string())),
        }
    }

    async fn save(&self, token: &str) -> Result<(), DriveError> {
        let stored = StoredToken {
            access_token: token.to_string(),
        };
        let data = serde_json::to_vec(&stored).map_err(|e| DriveError::TokenStore(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DriveError::TokenStore(e.to_string()))?;
        }
        fs::write(&self.path, data)
            .await
            .map_err(|e| DriveError::TokenStore(e.to_string()))
    }

    async fn clear(&self) -> Result<(), DriveError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DriveError::TokenStore(e.to_string())),
        }
    }
}

/// OAuth application credentials.
#[derive(Debug, Clone)]
pub struct DriveCredentials {
    pub client_id: String,
}

/// Explicit, caller-owned Drive session.
pub struct DriveSession {
    credentials: DriveCredentials,
    token: Option<String>,
    store: Arc<dyn TokenStore>,
}

impl DriveSession {
    /// Create a session and restore any previously persisted token.
    pub async fn restore(
        credentials: DriveCredentials,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, DriveError> {
        let token = store.load().await?;
        Ok(Self {
            credentials,
            token,
            store,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The URL the caller must open to obtain an access token (implicit
    /// grant, token delivered to `redirect_uri`).
    pub fn authorization_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&scope={}&response_type=token&include_granted_scopes=true",
            AUTH_ENDPOINT,
            self.credentials.client_id,
            utf8_percent_encode(redirect_uri, NON_ALPHANUMERIC),
            utf8_percent_encode(DRIVE_SCOPE, NON_ALPHANUMERIC),
        )
    }

    /// Accept a redeemed access token and persist it.
    pub async fn set_access_token(&mut self, token: String) -> Result<(), DriveError> {
        self.store.save(&token).await?;
        self.token = Some(token);
        Ok(())
    }

    /// The current access token, or `NotAuthenticated`.
    pub fn access_token(&self) -> Result<&str, DriveError> {
        self.token.as_deref().ok_or(DriveError::NotAuthenticated)
    }

    /// Drop and clear the persisted token.
    pub async fn sign_out(&mut self) -> Result<(), DriveError> {
        self.store.clear().await?;
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_token_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));

        assert!(store.load().await.unwrap().is_none());
        store.save("ya29.token").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("ya29.token"));
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing twice is fine.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn session_restores_and_signs_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileTokenStore::new(dir.path().join("token.json")));
        let credentials = DriveCredentials {
            client_id: "client-123".to_string(),
        };

        let mut session = DriveSession::restore(credentials.clone(), store.clone())
            .await
            .unwrap();
        assert!(!session.is_authenticated());

        session.set_access_token("tok".to_string()).await.unwrap();
        assert_eq!(session.access_token().unwrap(), "tok");

        // A fresh session sees the persisted token.
        let restored = DriveSession::restore(credentials, store).await.unwrap();
        assert!(restored.is_authenticated());

        session.sign_out().await.unwrap();
        assert!(matches!(
            session.access_token(),
            Err(DriveError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn authorization_url_encodes_parameters() {
        let store = Arc::new(FileTokenStore::new("/nonexistent/never-touched.json"));
        let session = DriveSession {
            credentials: DriveCredentials {
                client_id: "abc".to_string(),
            },
            token: None,
            store,
        };

        let url = session.authorization_url("https://app.example.com/auth/google/callback");
        assert!(url.starts_with("https://accounts.google.com/oauth/authorize?client_id=abc&"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp%2Eexample%2Ecom%2Fauth%2Fgoogle%2Fcallback"));
        assert!(url.contains("response_type=token"));
    }
}
