//! Filesystem blob store.
//!
//! Stores uploaded bytes under a local root and returns a `file://` URL.
//! Path helpers mirror the bucket layout the upload forms expect:
//! `faculty-avatars/{faculty_id}/{millis}_{file_name}` and
//! `question-papers/{user_id}/{millis}_{file_name}`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use facrev_core::traits::IBlobStore;
use facrev_core::UploadError;

pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IBlobStore for FsBlobStore {
    fn store(&self, path: &str, bytes: &[u8]) -> Result<String, UploadError> {
        // Relative segments only; an absolute or parent-escaping path
        // must not break out of the root.
        let rel = Path::new(path);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(UploadError::Backend {
                message: format!("invalid blob path: {path}"),
            });
        }

        let full = self.root.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| UploadError::Io {
                message: e.to_string(),
            })?;
        }
        fs::write(&full, bytes).map_err(|e| UploadError::Io {
            message: e.to_string(),
        })?;
        debug!(path = %full.display(), len = bytes.len(), "blob stored");
        Ok(format!("file://{}", full.display()))
    }
}

/// Bucket path for a faculty avatar upload.
pub fn faculty_avatar_path(faculty_id: &str, file_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    format!("faculty-avatars/{faculty_id}/{millis}_{file_name}")
}

/// Bucket path for a question paper upload.
pub fn question_paper_path(user_id: &str, file_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    format!("question-papers/{user_id}/{millis}_{file_name}")
}
