//! Configuration module
//!
//! Environment-driven configuration for the storage backends, database and
//! Drive integration. Values are read once at startup; `.env` files are
//! honored in development via dotenvy.

use std::env;
use std::str::FromStr;

use crate::constants::DEFAULT_MAX_FILE_SIZE_BYTES;
use crate::storage_types::StorageBackend;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: Option<String>,
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub max_file_size_bytes: usize,
    pub google_client_id: Option<String>,
    pub google_api_key: Option<String>,
    pub drive_token_path: Option<String>,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            database_url: env::var("DATABASE_URL").ok(),
            storage_backend: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|v| StorageBackend::from_str(&v).ok()),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .ok()
                .or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            max_file_size_bytes: env::var("MAX_FILE_SIZE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES),
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            google_api_key: env::var("GOOGLE_API_KEY").ok(),
            drive_token_path: env::var("DRIVE_TOKEN_PATH").ok(),
        }
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            storage_backend: None,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            google_client_id: None,
            google_api_key: None,
            drive_token_path: None,
        }
    }
}
