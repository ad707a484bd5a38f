//! End-to-end ingestion pipeline tests.
//!
//! Run with: `cargo test -p folio-ingest --test ingest_test`
//! Uses in-memory fakes for the metadata collaborators and either an
//! in-memory or tempdir-backed object store; no external services required.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use folio_core::models::{Client, NewClientFile};
use folio_core::{AppError, StorageBackend};
use folio_ingest::{classify_batch, ClientDirectory, FileMetadataStore, IncomingFile, UploadCoordinator};
use folio_storage::{LocalStorage, Storage, StorageError};
use uuid::Uuid;

#[derive(Default)]
struct InMemoryDirectory {
    clients: Mutex<Vec<Client>>,
    fail_lookups: bool,
}

impl InMemoryDirectory {
    fn with_client(self, owner_id: Uuid, name: &str) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        self.clients.lock().unwrap().push(Client {
            id,
            owner_id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        (self, id)
    }

    fn len(&self) -> usize {
        self.clients.lock().unwrap().len()
    }
}

#[async_trait]
impl ClientDirectory for InMemoryDirectory {
    async fn find_client(&self, owner_id: Uuid, name: &str) -> Result<Option<Client>, AppError> {
        if self.fail_lookups {
            return Err(AppError::Internal("directory unavailable".to_string()));
        }
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.owner_id == owner_id && c.name == name)
            .cloned())
    }

    async fn insert_client(&self, owner_id: Uuid, name: &str) -> Result<Client, AppError> {
        let mut clients = self.clients.lock().unwrap();
        // Converge like the unique-index-backed implementation would.
        if let Some(existing) = clients
            .iter()
            .find(|c| c.owner_id == owner_id && c.name == name)
        {
            return Ok(existing.clone());
        }
        let client = Client {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        clients.push(client.clone());
        Ok(client)
    }
}

#[derive(Default)]
struct InMemoryMetadata {
    records: Mutex<Vec<NewClientFile>>,
    /// File names whose insert should fail.
    fail_for: HashSet<String>,
}

impl InMemoryMetadata {
    fn records(&self) -> Vec<NewClientFile> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileMetadataStore for InMemoryMetadata {
    async fn insert_file_record(&self, record: NewClientFile) -> Result<Uuid, AppError> {
        if self.fail_for.contains(&record.file_name) {
            return Err(AppError::Internal("insert rejected".to_string()));
        }
        self.records.lock().unwrap().push(record);
        Ok(Uuid::new_v4())
    }
}

/// In-memory object store with per-file failure injection.
#[derive(Default)]
struct FlakyStorage {
    objects: Mutex<HashMap<String, Bytes>>,
    /// Keys ending in one of these suffixes fail on put.
    fail_put_suffixes: HashSet<String>,
    fail_deletes: bool,
}

impl FlakyStorage {
    fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> Result<(), StorageError> {
        if self.fail_put_suffixes.iter().any(|s| key.ends_with(s)) {
            return Err(StorageError::UploadFailed("injected put failure".to_string()));
        }
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|b| b.to_vec())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_deletes {
            return Err(StorageError::DeleteFailed("injected delete failure".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn content_length(&self, key: &str) -> Result<u64, StorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|b| b.len() as u64)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

fn incoming(path: &str, data: &'static [u8], content_type: Option<&str>) -> IncomingFile {
    IncomingFile {
        relative_path: path.to_string(),
        data: Bytes::from_static(data),
        content_type: content_type.map(String::from),
    }
}

#[tokio::test]
async fn single_file_creates_client_object_and_record() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalStorage::new(dir.path()).await.unwrap());
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata::default());
    let owner_id = Uuid::new_v4();

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory.clone(), metadata.clone());
    let batch = classify_batch(vec![incoming(
        "Acme/invoice.pdf",
        b"%PDF-1.4",
        Some("application/pdf"),
    )]);

    let report = coordinator.ingest(batch, owner_id).await;

    assert_eq!(directory.len(), 1);
    let acme = report.client("Acme").unwrap();
    assert_eq!((acme.succeeded, acme.failed), (1, 0));
    assert!(report.is_complete_success());

    let records = metadata.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.file_name, "invoice.pdf");
    assert_eq!(record.content_type, "application/pdf");
    assert_eq!(record.size_bytes, 8);
    assert_eq!(
        record.storage_path,
        format!("{}/{}/invoice.pdf", owner_id, record.client_id)
    );
    assert!(storage.exists(&record.storage_path).await.unwrap());
}

#[tokio::test]
async fn loose_file_is_excluded_with_a_warning() {
    let storage = Arc::new(FlakyStorage::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata::default());

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory.clone(), metadata.clone());
    let batch = classify_batch(vec![incoming("loose-file.txt", b"hello", None)]);

    let report = coordinator.ingest(batch, Uuid::new_v4()).await;

    assert_eq!(report.total_succeeded(), 0);
    assert_eq!(report.total_failed(), 0);
    assert_eq!(report.warnings().len(), 1);
    assert_eq!(directory.len(), 0);
    assert_eq!(storage.object_count(), 0);
    assert!(metadata.records().is_empty());
}

#[tokio::test]
async fn existing_client_is_reused_without_duplicates() {
    let owner_id = Uuid::new_v4();
    let (directory, acme_id) = InMemoryDirectory::default().with_client(owner_id, "Acme");
    let directory = Arc::new(directory);
    let storage = Arc::new(FlakyStorage::default());
    let metadata = Arc::new(InMemoryMetadata::default());

    let coordinator =
        UploadCoordinator::new(storage, directory.clone(), metadata.clone());
    let batch = classify_batch(vec![incoming("Acme/a.txt", b"a", None)]);

    coordinator.ingest(batch, owner_id).await;

    assert_eq!(directory.len(), 1);
    assert_eq!(metadata.records()[0].client_id, acme_id);
}

#[tokio::test]
async fn storage_failure_leaves_no_metadata_row() {
    let storage = Arc::new(FlakyStorage {
        fail_put_suffixes: HashSet::from(["bad.txt".to_string()]),
        ..Default::default()
    });
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata::default());

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory, metadata.clone());
    let batch = classify_batch(vec![
        incoming("Beta/good.txt", b"ok", None),
        incoming("Beta/bad.txt", b"boom", None),
    ]);

    let report = coordinator.ingest(batch, Uuid::new_v4()).await;

    let beta = report.client("Beta").unwrap();
    assert_eq!((beta.succeeded, beta.failed), (1, 1));
    assert!(!report.is_complete_success());

    // Only the successful file has a row, and only its object exists.
    let records = metadata.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_name, "good.txt");
    assert_eq!(storage.object_count(), 1);
    assert_eq!(report.distinct_errors().len(), 1);
}

#[tokio::test]
async fn metadata_failure_rolls_back_the_object() {
    let storage = Arc::new(FlakyStorage::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata {
        fail_for: HashSet::from(["doc.pdf".to_string()]),
        ..Default::default()
    });

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory, metadata.clone());
    let batch = classify_batch(vec![incoming("Acme/doc.pdf", b"pdf", None)]);

    let report = coordinator.ingest(batch, Uuid::new_v4()).await;

    let acme = report.client("Acme").unwrap();
    assert_eq!((acme.succeeded, acme.failed), (0, 1));
    assert!(metadata.records().is_empty());
    // The compensating delete removed the orphaned object.
    assert_eq!(storage.object_count(), 0);
}

#[tokio::test]
async fn failed_compensating_delete_leaks_but_is_reported() {
    let storage = Arc::new(FlakyStorage {
        fail_deletes: true,
        ..Default::default()
    });
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata {
        fail_for: HashSet::from(["doc.pdf".to_string()]),
        ..Default::default()
    });

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory, metadata.clone());
    let batch = classify_batch(vec![incoming("Acme/doc.pdf", b"pdf", None)]);

    let report = coordinator.ingest(batch, Uuid::new_v4()).await;

    // Accepted leak under double failure: object remains, no metadata row,
    // and the file is counted as failed.
    assert_eq!(storage.object_count(), 1);
    assert!(metadata.records().is_empty());
    assert_eq!(report.client("Acme").unwrap().failed, 1);
}

#[tokio::test]
async fn oversize_file_fails_without_touching_storage() {
    let storage = Arc::new(FlakyStorage::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata::default());

    let coordinator = UploadCoordinator::new(storage.clone(), directory, metadata.clone())
        .with_max_file_size(16);
    let batch = classify_batch(vec![
        incoming("Acme/small.txt", b"ok", None),
        IncomingFile {
            relative_path: "Acme/huge.bin".to_string(),
            data: Bytes::from(vec![0u8; 1024]),
            content_type: None,
        },
    ]);

    let report = coordinator.ingest(batch, Uuid::new_v4()).await;

    let acme = report.client("Acme").unwrap();
    assert_eq!((acme.succeeded, acme.failed), (1, 1));
    assert!(!report.is_complete_success());

    // The oversize file never reached storage or metadata.
    assert_eq!(storage.object_count(), 1);
    assert_eq!(metadata.records().len(), 1);
    assert_eq!(metadata.records()[0].file_name, "small.txt");
    assert!(report.distinct_errors()[0].contains("huge.bin"));
}

#[tokio::test]
async fn resolution_failure_skips_all_files_for_that_client() {
    let storage = Arc::new(FlakyStorage::default());
    let directory = Arc::new(InMemoryDirectory {
        fail_lookups: true,
        ..Default::default()
    });
    let metadata = Arc::new(InMemoryMetadata::default());

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory, metadata.clone());
    let batch = classify_batch(vec![
        incoming("Gamma/a.txt", b"a", None),
        incoming("Gamma/b.txt", b"b", None),
    ]);

    let report = coordinator.ingest(batch, Uuid::new_v4()).await;

    let gamma = report.client("Gamma").unwrap();
    assert_eq!((gamma.succeeded, gamma.failed), (0, 2));
    assert_eq!(storage.object_count(), 0);
    assert!(metadata.records().is_empty());
}

#[tokio::test]
async fn hebrew_names_produce_ascii_keys_with_extension_kept() {
    let storage = Arc::new(FlakyStorage::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata::default());
    let owner_id = Uuid::new_v4();

    let coordinator =
        UploadCoordinator::new(storage.clone(), directory, metadata.clone());
    let batch = classify_batch(vec![incoming("Acme/קובץ (1).pdf", b"pdf", None)]);

    let report = coordinator.ingest(batch, owner_id).await;
    assert!(report.is_complete_success());

    let record = &metadata.records()[0];
    // Original name is kept in metadata; the storage key is sanitized.
    assert_eq!(record.file_name, "קובץ (1).pdf");
    assert!(record.storage_path.ends_with(".pdf"));
    let relative = record
        .storage_path
        .rsplit('/')
        .next()
        .unwrap();
    assert!(relative.is_ascii());
    assert!(!relative.trim_end_matches(".pdf").is_empty());
}

#[tokio::test]
async fn progress_callback_sees_every_file() {
    let storage = Arc::new(FlakyStorage {
        fail_put_suffixes: HashSet::from(["bad.txt".to_string()]),
        ..Default::default()
    });
    let directory = Arc::new(InMemoryDirectory::default());
    let metadata = Arc::new(InMemoryMetadata::default());

    let coordinator = UploadCoordinator::new(storage, directory, metadata);
    let batch = classify_batch(vec![
        incoming("Acme/good.txt", b"ok", None),
        incoming("Acme/bad.txt", b"boom", None),
    ]);

    let mut seen = Vec::new();
    coordinator
        .ingest_with_progress(batch, Uuid::new_v4(), |name, err| {
            seen.push((name.to_string(), err.is_some()));
        })
        .await;

    assert_eq!(
        seen,
        vec![
            ("good.txt".to_string(), false),
            ("bad.txt".to_string(), true)
        ]
    );
}
