//! Error taxonomy for the facrev platform.
//!
//! Validation and state-transition errors are rejected synchronously before
//! any mutation; storage errors surface as values at the call site and never
//! crash a subscription stream.

pub mod auth_error;
pub mod error_code;
pub mod moderation_error;
pub mod service_error;
pub mod storage_error;

pub use auth_error::{AccountError, AuthError};
pub use moderation_error::ModerationError;
pub use service_error::{ServiceError, UploadError, ValidationError};
pub use storage_error::StorageError;
