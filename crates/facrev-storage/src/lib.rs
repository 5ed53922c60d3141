//! # facrev-storage
//!
//! SQLite persistence layer for the facrev review platform.
//! Implements every store trait from `facrev-core` and publishes a
//! `ChangeEvent` on the change feed after each committed mutation.

pub mod changefeed;
pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use changefeed::ChangeFeed;
pub use connection::DatabaseManager;
pub use engine::StorageEngine;

/// Helper to convert a display-able error into `StorageError::Sqlite`.
pub(crate) fn sqe(e: impl std::fmt::Display) -> facrev_core::StorageError {
    facrev_core::StorageError::Sqlite {
        message: e.to_string(),
    }
}
