//! Local identity provider.
//!
//! In-process stand-in for a hosted auth service, used by tests and dev
//! deployments. Passwords are stored as SHA-256 digests and only ever
//! compared, never read back. A single "current session" slot models the
//! one-device provider session the lifecycle controller signs out of.

use std::collections::HashMap;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use facrev_core::traits::{IIdentityProvider, Identity};
use facrev_core::AuthError;

const MIN_PASSWORD_LEN: usize = 6;

struct Record {
    subject_id: String,
    password_digest: [u8; 32],
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Record>,
    session: Option<Identity>,
}

#[derive(Default)]
pub struct LocalIdentityProvider {
    state: Mutex<State>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity currently signed in at the provider, if any. Test
    /// hooks use this to assert that failed app-level gates tore the
    /// provider session down.
    pub fn current_session(&self) -> Option<Identity> {
        self.lock().session.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl IIdentityProvider for LocalIdentityProvider {
    fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let email = normalize(email);
        let mut state = self.lock();
        if state.accounts.contains_key(&email) {
            return Err(AuthError::DuplicateAccount);
        }
        let identity = Identity {
            subject_id: Uuid::new_v4().to_string(),
            email: email.clone(),
        };
        state.accounts.insert(
            email,
            Record {
                subject_id: identity.subject_id.clone(),
                password_digest: digest(password),
            },
        );
        state.session = Some(identity.clone());
        Ok(identity)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize(email);
        let mut state = self.lock();
        let record = state
            .accounts
            .get(&email)
            .ok_or(AuthError::AccountNotFound)?;
        if record.password_digest != digest(password) {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = Identity {
            subject_id: record.subject_id.clone(),
            email,
        };
        state.session = Some(identity.clone());
        Ok(identity)
    }

    fn sign_out(&self) {
        self.lock().session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_and_session_tracking() {
        let provider = LocalIdentityProvider::new();
        let created = provider
            .create_account("ravi@vitstudent.ac.in", "hunter22")
            .unwrap();
        assert_eq!(provider.current_session().unwrap().email, created.email);

        provider.sign_out();
        assert!(provider.current_session().is_none());

        let again = provider
            .sign_in("Ravi@VITstudent.ac.in", "hunter22")
            .unwrap();
        assert_eq!(again.subject_id, created.subject_id);
    }

    #[test]
    fn rejects_bad_credentials() {
        let provider = LocalIdentityProvider::new();
        provider
            .create_account("ravi@vitstudent.ac.in", "hunter22")
            .unwrap();

        assert!(matches!(
            provider.sign_in("ravi@vitstudent.ac.in", "wrong-pass"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.sign_in("nobody@vitstudent.ac.in", "hunter22"),
            Err(AuthError::AccountNotFound)
        ));
        assert!(matches!(
            provider.create_account("ravi@vitstudent.ac.in", "hunter23"),
            Err(AuthError::DuplicateAccount)
        ));
        assert!(matches!(
            provider.create_account("new@vitstudent.ac.in", "short"),
            Err(AuthError::WeakPassword { min: 6 })
        ));
    }
}
