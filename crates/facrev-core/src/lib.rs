//! # facrev-core
//!
//! Foundation crate for the facrev faculty-review platform.
//! Defines entity types, the moderation status model, errors, config,
//! change events, storage traits, and collaborator traits.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::FacrevConfig;
pub use errors::error_code::FacrevErrorCode;
pub use errors::{
    AccountError, AuthError, ModerationError, ServiceError, StorageError, UploadError,
    ValidationError,
};
pub use events::{ChangeEvent, Collection};
pub use types::entities::{
    ChatMessage, Faculty, FacultyDraft, FacultyUpdate, NewFacultySuggestion, QuestionPaper,
    Review, SiteSettings, SiteSettingsUpdate, User,
};
pub use types::status::{Actor, ModerationStatus, Role};
