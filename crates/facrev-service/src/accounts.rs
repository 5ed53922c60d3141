//! Account lifecycle controller: registration and sign-in gates, the
//! logout request/approve/acknowledge handshake, and deactivation.
//!
//! Sign-in gate failures (`AccountNotFound`, `AccountDeactivated`, role
//! mismatch) force a provider-level sign-out so no dangling authenticated
//! session survives without a matching app-level account document.

use std::sync::Arc;

use tracing::{info, warn};

use facrev_core::config::AccountsConfig;
use facrev_core::traits::collaborators::IIdentityProvider;
use facrev_core::traits::storage::IUserStore;
use facrev_core::{AccountError, AuthError, Role, User, ValidationError};
use facrev_storage::StorageEngine;

/// The account lifecycle controller.
pub struct AccountService {
    users: Arc<dyn IUserStore>,
    identity: Arc<dyn IIdentityProvider>,
    config: AccountsConfig,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn IUserStore>,
        identity: Arc<dyn IIdentityProvider>,
        config: AccountsConfig,
    ) -> Self {
        Self {
            users,
            identity,
            config,
        }
    }

    /// Convenience constructor over the unified SQLite engine.
    pub fn from_engine(
        engine: &Arc<StorageEngine>,
        identity: Arc<dyn IIdentityProvider>,
        config: AccountsConfig,
    ) -> Self {
        Self::new(engine.as_user_store(), identity, config)
    }

    /// Register a new account. Allowlisted emails become admins; all
    /// others must carry the institutional student domain suffix.
    pub fn register(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = email.trim().to_lowercase();
        let is_admin = self.config.is_admin_email(&email);

        if !is_admin && !email.ends_with(self.config.effective_student_email_domain()) {
            return Err(ValidationError::new(
                "email",
                format!(
                    "must end with {}",
                    self.config.effective_student_email_domain()
                ),
            )
            .into());
        }

        let min = self.config.effective_min_password_len();
        if password.len() < min {
            return Err(ValidationError::new(
                "password",
                format!("must be at least {min} characters"),
            )
            .into());
        }

        if self.users.get_user_by_email(&email)?.is_some() {
            return Err(AuthError::DuplicateAccount.into());
        }

        let identity = self.identity.create_account(&email, password)?;
        let (role, username) = if is_admin {
            (Role::Admin, Some(admin_username(&email)))
        } else {
            (Role::Student, None)
        };
        let user = User::new(identity.subject_id, email, role, username);
        self.users.create_user(&user)?;
        info!(user = %user.id, role = role.as_str(), "account registered");
        Ok(user)
    }

    /// Student sign-in: provider auth, then the app-level gate.
    pub fn student_sign_in(&self, email: &str, password: &str) -> Result<User, AccountError> {
        self.sign_in_with_role(email, password, Role::Student)
    }

    /// Admin sign-in: provider auth, then the app-level gate.
    pub fn admin_sign_in(&self, email: &str, password: &str) -> Result<User, AccountError> {
        self.sign_in_with_role(email, password, Role::Admin)
    }

    fn sign_in_with_role(
        &self,
        email: &str,
        password: &str,
        required: Role,
    ) -> Result<User, AccountError> {
        let identity = self.identity.sign_in(email.trim(), password)?;

        let user = match self.users.get_user(&identity.subject_id)? {
            Some(user) if user.role == required => user,
            _ => {
                // Authenticated at the provider but no matching account
                // document for this role: tear down the session.
                self.identity.sign_out();
                warn!(subject = %identity.subject_id, "sign-in with no matching account document");
                return Err(AuthError::AccountNotFound.into());
            }
        };

        if !user.is_active {
            self.identity.sign_out();
            return Err(AuthError::AccountDeactivated.into());
        }
        Ok(user)
    }

    /// Sign out of the provider session.
    pub fn sign_out(&self) {
        self.identity.sign_out();
    }

    // ── Logout handshake ────────────────────────────────────────────

    /// Student asks to be logged out; admin must approve.
    pub fn request_logout(&self, user_id: &str) -> Result<(), AccountError> {
        self.users.set_logout_flags(user_id, true, false)?;
        info!(user = user_id, "logout requested");
        Ok(())
    }

    /// Admin approves: clears the request and raises `force_logout`,
    /// which the client observes via its live subscription.
    pub fn approve_logout(&self, user_id: &str) -> Result<(), AccountError> {
        self.users.set_logout_flags(user_id, false, true)?;
        info!(user = user_id, "logout approved");
        Ok(())
    }

    /// Client acknowledges the forced sign-out; the record returns to the
    /// normal state so the flag does not linger forever.
    pub fn acknowledge_logout(&self, user_id: &str) -> Result<(), AccountError> {
        self.users.set_logout_flags(user_id, false, false)?;
        Ok(())
    }

    // ── Deactivation ────────────────────────────────────────────────

    /// Admin toggles the active flag. Deactivation takes effect on the
    /// user's next live-subscription tick, not just at the next sign-in.
    pub fn set_active(&self, user_id: &str, is_active: bool) -> Result<(), AccountError> {
        self.users.set_active(user_id, is_active)?;
        info!(user = user_id, is_active, "active state changed");
        Ok(())
    }
}

/// Admin display name: the email local part, uppercased.
fn admin_username(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or(email)
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_username_is_uppercased_local_part() {
        assert_eq!(admin_username("dean@staff.example.edu"), "DEAN");
        assert_eq!(admin_username("no-at-sign"), "NO-AT-SIGN");
    }
}
