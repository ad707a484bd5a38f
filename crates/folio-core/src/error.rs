//! Error types module
//!
//! This module provides the core error types used throughout the Folio
//! application. All errors are unified under the `AppError` enum which can
//! represent database, storage, and Drive integration errors.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature. With `default-features = false` there is no database variant and
//! DB errors must be carried by other error types.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Drive error: {0}")]
    Drive(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Whether this error is a "no rows" condition, as opposed to a real
    /// query failure. Callers that implement find-or-create flows need the
    /// distinction.
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::NotFound(_) => true,
            #[cfg(feature = "sqlx")]
            AppError::Database(SqlxError::RowNotFound) => true,
            _ => false,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}
