//! Drive integration errors

use folio_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("Not authenticated with Google Drive")]
    NotAuthenticated,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Drive API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token store error: {0}")]
    TokenStore(String),
}

impl From<DriveError> for AppError {
    fn from(err: DriveError) -> Self {
        AppError::Drive(err.to_string())
    }
}
