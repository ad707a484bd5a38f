//! Batch types for one directory-upload invocation.

use bytes::Bytes;

/// One file from a directory selection, as handed over by the caller.
///
/// `relative_path` uses `/` separators and is relative to the selected root
/// folder, e.g. `Acme/invoices/2024.pdf`.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub relative_path: String,
    pub data: Bytes,
    /// Declared MIME type, if the picker provided one. Empty strings are
    /// treated as undeclared.
    pub content_type: Option<String>,
}

impl IncomingFile {
    /// The base name (final path segment) of the file.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

/// A file that has been assigned to a client folder.
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    pub file: IncomingFile,
    /// Path within the client's folder (everything after the first segment).
    pub path_in_folder: String,
}

/// All classified files for one client name, in input order.
#[derive(Debug, Clone)]
pub struct ClientGroup {
    pub client_name: String,
    pub files: Vec<ClassifiedFile>,
}

/// The grouping produced by classification for one directory selection.
///
/// Transient: lives for the duration of a single ingest invocation. Groups
/// preserve first-encounter order of client names.
#[derive(Debug, Default)]
pub struct UploadBatch {
    pub groups: Vec<ClientGroup>,
    /// Warnings for files excluded during classification.
    pub warnings: Vec<String>,
}

impl UploadBatch {
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }
}
