//! Authentication and account-lifecycle errors.

use super::error_code::{self, FacrevErrorCode};
use super::{StorageError, ValidationError};

/// Errors surfaced by the identity provider and the sign-in gate.
///
/// `AccountNotFound` and `AccountDeactivated` additionally force a
/// provider-level sign-out so no dangling session survives without a
/// matching app-level account document.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("This email is already registered")]
    DuplicateAccount,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("No account found for this identity and role")]
    AccountNotFound,

    #[error("This account has been deactivated by an administrator")]
    AccountDeactivated,

    #[error("Password is too weak (minimum {min} characters)")]
    WeakPassword { min: usize },

    #[error("Email/password sign-in is not enabled by the provider")]
    ProviderDisabled,

    #[error("Identity provider error: {message}")]
    Provider { message: String },
}

impl FacrevErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAccount => error_code::AUTH_DUPLICATE_ACCOUNT,
            Self::InvalidCredentials => error_code::AUTH_INVALID_CREDENTIALS,
            Self::AccountNotFound => error_code::AUTH_ACCOUNT_NOT_FOUND,
            Self::AccountDeactivated => error_code::AUTH_ACCOUNT_DEACTIVATED,
            Self::WeakPassword { .. } => error_code::AUTH_WEAK_PASSWORD,
            Self::ProviderDisabled => error_code::AUTH_PROVIDER_DISABLED,
            Self::Provider { .. } => error_code::AUTH_PROVIDER_ERROR,
        }
    }
}

/// Composite error for account-lifecycle operations: input validation,
/// provider failures, and store failures.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FacrevErrorCode for AccountError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Auth(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
