//! Stable machine-readable error codes.
//!
//! Codes are part of the API surface; renaming one is a breaking change.

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORAGE_NOT_FOUND: &str = "STORAGE_NOT_FOUND";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";

pub const AUTH_DUPLICATE_ACCOUNT: &str = "AUTH_DUPLICATE_ACCOUNT";
pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_INVALID_CREDENTIALS";
pub const AUTH_ACCOUNT_NOT_FOUND: &str = "AUTH_ACCOUNT_NOT_FOUND";
pub const AUTH_ACCOUNT_DEACTIVATED: &str = "AUTH_ACCOUNT_DEACTIVATED";
pub const AUTH_WEAK_PASSWORD: &str = "AUTH_WEAK_PASSWORD";
pub const AUTH_PROVIDER_DISABLED: &str = "AUTH_PROVIDER_DISABLED";
pub const AUTH_PROVIDER_ERROR: &str = "AUTH_PROVIDER_ERROR";

pub const MOD_INVALID_STATE_TRANSITION: &str = "MOD_INVALID_STATE_TRANSITION";
pub const MOD_NOT_OWNER: &str = "MOD_NOT_OWNER";
pub const MOD_DUPLICATE_PENDING_REVIEW: &str = "MOD_DUPLICATE_PENDING_REVIEW";
pub const MOD_NOT_FOUND: &str = "MOD_NOT_FOUND";

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const UPLOAD_ERROR: &str = "UPLOAD_ERROR";

/// Trait implemented by every error type in the workspace; returns the
/// stable code for the variant.
pub trait FacrevErrorCode {
    fn error_code(&self) -> &'static str;
}
