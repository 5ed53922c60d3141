//! Per-collection query modules. All SQL lives here, behind
//! `prepare_cached` statements; row mapping produces the entity structs
//! from `facrev-core`.

pub mod chat;
pub mod faculty;
pub mod question_papers;
pub mod reviews;
pub mod settings;
pub mod suggestions;
pub mod users;

use chrono::{DateTime, Utc};

use facrev_core::StorageError;

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Sqlite {
            message: format!("bad timestamp {s:?}: {e}"),
        })
}

/// Parse a `status` column.
pub(crate) fn parse_status(
    s: &str,
) -> Result<facrev_core::ModerationStatus, StorageError> {
    facrev_core::ModerationStatus::parse(s).ok_or_else(|| StorageError::Sqlite {
        message: format!("bad status value {s:?}"),
    })
}
