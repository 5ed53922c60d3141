//! External collaborator contracts: identity provider, blob storage, and
//! the optional generative assistant.
//!
//! The moderation/lifecycle core depends only on these traits; production
//! wiring supplies the real services, tests and dev mode supply the local
//! implementations in `facrev-service`.

use std::sync::Arc;

use crate::errors::{AuthError, UploadError};

/// A provider-side authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned subject ID; becomes the `User` document ID.
    pub subject_id: String,
    pub email: String,
}

/// Identity provider contract for registration and sign-in.
pub trait IIdentityProvider: Send + Sync {
    fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Terminate the current provider session. Called by the lifecycle
    /// controller whenever sign-in succeeds at the provider but fails the
    /// app-level gate, so no dangling session survives.
    fn sign_out(&self);
}

impl<T: IIdentityProvider + ?Sized> IIdentityProvider for Arc<T> {
    fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        (**self).create_account(email, password)
    }
    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        (**self).sign_in(email, password)
    }
    fn sign_out(&self) {
        (**self).sign_out()
    }
}

/// Blob storage contract: store bytes, get back a stable retrievable URL.
pub trait IBlobStore: Send + Sync {
    fn store(&self, path: &str, bytes: &[u8]) -> Result<String, UploadError>;
}

impl<T: IBlobStore + ?Sized> IBlobStore for Arc<T> {
    fn store(&self, path: &str, bytes: &[u8]) -> Result<String, UploadError> {
        (**self).store(path, bytes)
    }
}

/// Optional generative assistant. `None` means unavailable; callers fall
/// back to the deterministic offline responder. The moderation core has
/// zero dependency on this collaborator.
pub trait IAssistant: Send + Sync {
    fn reply(&self, message: &str) -> Option<String>;
}

impl<T: IAssistant + ?Sized> IAssistant for Arc<T> {
    fn reply(&self, message: &str) -> Option<String> {
        (**self).reply(message)
    }
}
