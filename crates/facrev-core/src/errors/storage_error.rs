//! Storage-layer errors for SQLite operations.

use super::error_code::{self, FacrevErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("{collection} document not found: {id}")]
    NotFound { collection: &'static str, id: String },

    #[error("Database busy (another operation in progress)")]
    Busy,
}

impl FacrevErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::NotFound { .. } => error_code::STORAGE_NOT_FOUND,
            Self::Busy => error_code::DB_BUSY,
        }
    }
}
