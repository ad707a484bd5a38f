//! Path classification
//!
//! Splits browser-style relative paths (`ClientFolder/sub/file.ext`) into a
//! client name and a path within that client's folder. Files that sit
//! directly in the selected root (a single segment) belong to no client and
//! are excluded with a warning.

use crate::error::IngestError;
use crate::types::{ClassifiedFile, ClientGroup, IncomingFile, UploadBatch};
use std::collections::HashMap;

/// Classify one relative path.
///
/// Returns `(client_name, path_within_client_folder)`, or `None` when the
/// path has fewer than two segments or any empty segment.
pub fn classify(relative_path: &str) -> Option<(&str, String)> {
    let mut segments = relative_path.split('/');
    let client_name = segments.next()?;
    let rest: Vec<&str> = segments.collect();

    if client_name.is_empty() || rest.is_empty() || rest.iter().any(|s| s.is_empty()) {
        return None;
    }

    Some((client_name, rest.join("/")))
}

/// Group a flat file list into per-client sets, preserving first-encounter
/// order of client names and input order of files within each client.
pub fn classify_batch(files: Vec<IncomingFile>) -> UploadBatch {
    let mut batch = UploadBatch::default();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for file in files {
        match classify(&file.relative_path) {
            Some((client_name, path_in_folder)) => {
                let idx = match index_by_name.get(client_name) {
                    Some(&idx) => idx,
                    None => {
                        index_by_name.insert(client_name.to_string(), batch.groups.len());
                        batch.groups.push(ClientGroup {
                            client_name: client_name.to_string(),
                            files: Vec::new(),
                        });
                        batch.groups.len() - 1
                    }
                };
                batch.groups[idx].files.push(ClassifiedFile {
                    path_in_folder,
                    file,
                });
            }
            None => {
                let err = IngestError::Classification {
                    path: file.relative_path,
                };
                tracing::warn!(error = %err, "File excluded during classification");
                batch.warnings.push(err.to_string());
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn incoming(path: &str) -> IncomingFile {
        IncomingFile {
            relative_path: path.to_string(),
            data: Bytes::from_static(b"x"),
            content_type: None,
        }
    }

    #[test]
    fn classify_splits_on_first_segment() {
        assert_eq!(
            classify("Acme/invoice.pdf"),
            Some(("Acme", "invoice.pdf".to_string()))
        );
        assert_eq!(
            classify("Acme/docs/2024/report.pdf"),
            Some(("Acme", "docs/2024/report.pdf".to_string()))
        );
    }

    #[test]
    fn classify_excludes_loose_and_malformed_paths() {
        assert_eq!(classify("loose-file.txt"), None);
        assert_eq!(classify("/invoice.pdf"), None);
        assert_eq!(classify("Acme//invoice.pdf"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn batch_groups_preserve_encounter_order() {
        let batch = classify_batch(vec![
            incoming("Beta/a.txt"),
            incoming("Acme/b.txt"),
            incoming("Beta/c.txt"),
            incoming("loose.txt"),
        ]);

        assert_eq!(batch.groups.len(), 2);
        assert_eq!(batch.groups[0].client_name, "Beta");
        assert_eq!(batch.groups[0].files.len(), 2);
        assert_eq!(batch.groups[0].files[0].path_in_folder, "a.txt");
        assert_eq!(batch.groups[0].files[1].path_in_folder, "c.txt");
        assert_eq!(batch.groups[1].client_name, "Acme");
        assert_eq!(batch.warnings.len(), 1);
        assert!(batch.warnings[0].contains("loose.txt"));
        assert_eq!(batch.file_count(), 3);
    }

    #[test]
    fn exclusions_carry_the_classification_error() {
        let batch = classify_batch(vec![incoming("loose.txt")]);

        let expected = IngestError::Classification {
            path: "loose.txt".to_string(),
        };
        assert_eq!(batch.warnings, vec![expected.to_string()]);
    }
}
