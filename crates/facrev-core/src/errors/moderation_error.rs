//! Moderation state-machine errors.

use crate::types::status::ModerationStatus;

use super::error_code::{self, FacrevErrorCode};
use super::{StorageError, ValidationError};

/// Errors from the pending/approved/rejected state machine.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    /// Attempted transition on an already-terminal entity, or to a
    /// non-terminal target. The second of two concurrent approvals of the
    /// same entity lands here rather than being silently overwritten.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        from: ModerationStatus,
        to: ModerationStatus,
    },

    /// A non-admin attempted a transition they do not own. Students may
    /// only reject (self-delete) their own pending review.
    #[error("Requester does not own this submission")]
    NotOwner,

    /// At most one pending review per (user, faculty) pair.
    #[error("A pending review for this faculty member already exists")]
    DuplicatePendingReview,

    #[error("Submission not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FacrevErrorCode for ModerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStateTransition { .. } => error_code::MOD_INVALID_STATE_TRANSITION,
            Self::NotOwner => error_code::MOD_NOT_OWNER,
            Self::DuplicatePendingReview => error_code::MOD_DUPLICATE_PENDING_REVIEW,
            Self::NotFound { .. } => error_code::MOD_NOT_FOUND,
            Self::Validation(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
