//! Validation, upload, and general service errors.

use super::error_code::{self, FacrevErrorCode};
use super::StorageError;

/// Malformed or missing required input, caught before any store call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl FacrevErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}

/// Blob store failure, surfaced per-field without corrupting a
/// partially filled form.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Upload I/O error: {message}")]
    Io { message: String },

    #[error("Blob store error: {message}")]
    Backend { message: String },
}

impl FacrevErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        error_code::UPLOAD_ERROR
    }
}

/// Composite error for directory, chat, and settings operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{collection} document not found: {id}")]
    NotFound { collection: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FacrevErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::NotFound { .. } => error_code::STORAGE_NOT_FOUND,
            Self::Storage(e) => e.error_code(),
        }
    }
}
