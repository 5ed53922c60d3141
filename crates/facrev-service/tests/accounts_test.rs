//! Account lifecycle integration tests over the in-memory engine and the
//! local identity provider.

use std::sync::Arc;

use facrev_core::config::AccountsConfig;
use facrev_core::traits::storage::IUserStore;
use facrev_core::{AccountError, AuthError, Role};
use facrev_service::{AccountService, LocalIdentityProvider};
use facrev_storage::StorageEngine;

struct Fixture {
    engine: Arc<StorageEngine>,
    provider: Arc<LocalIdentityProvider>,
    accounts: AccountService,
}

fn fixture() -> Fixture {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let provider = Arc::new(LocalIdentityProvider::new());
    let config = AccountsConfig {
        admin_allowlist: vec!["dean@staff.example.edu".to_string()],
        ..Default::default()
    };
    let accounts = AccountService::from_engine(
        &engine,
        Arc::clone(&provider) as Arc<dyn facrev_core::traits::IIdentityProvider>,
        config,
    );
    Fixture {
        engine,
        provider,
        accounts,
    }
}

#[test]
fn student_registration_requires_institute_domain() {
    let fx = fixture();

    let err = fx
        .accounts
        .register("ravi@gmail.com", "hunter22")
        .unwrap_err();
    assert!(matches!(err, AccountError::Validation(_)));

    // Nothing was created on either side.
    assert!(fx
        .engine
        .get_user_by_email("ravi@gmail.com")
        .unwrap()
        .is_none());
    assert!(fx.provider.current_session().is_none());
}

#[test]
fn weak_password_rejected_before_provider_call() {
    let fx = fixture();
    let err = fx
        .accounts
        .register("ravi@vitstudent.ac.in", "short")
        .unwrap_err();
    assert!(matches!(err, AccountError::Validation(_)));
    assert!(fx.provider.current_session().is_none());
}

#[test]
fn registration_creates_student_account() {
    let fx = fixture();
    let user = fx
        .accounts
        .register("Ravi.K@VITstudent.ac.in", "hunter22")
        .unwrap();

    assert_eq!(user.email, "ravi.k@vitstudent.ac.in");
    assert_eq!(user.role, Role::Student);
    assert!(user.username.is_none());
    assert!(user.is_active);
    assert!(!user.logout_pending && !user.force_logout);

    let stored = fx.engine.get_user(&user.id).unwrap().unwrap();
    assert_eq!(stored, user);
}

#[test]
fn duplicate_registration_fails() {
    let fx = fixture();
    fx.accounts
        .register("ravi@vitstudent.ac.in", "hunter22")
        .unwrap();
    let err = fx
        .accounts
        .register("RAVI@vitstudent.ac.in", "other-pass")
        .unwrap_err();
    assert!(matches!(err, AccountError::Auth(AuthError::DuplicateAccount)));
}

#[test]
fn allowlisted_email_becomes_admin() {
    let fx = fixture();
    let admin = fx
        .accounts
        .register("dean@staff.example.edu", "hunter22")
        .unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.username.as_deref(), Some("DEAN"));

    let signed_in = fx
        .accounts
        .admin_sign_in("dean@staff.example.edu", "hunter22")
        .unwrap();
    assert_eq!(signed_in.id, admin.id);
}

#[test]
fn role_mismatch_forces_provider_sign_out() {
    let fx = fixture();
    fx.accounts
        .register("ravi@vitstudent.ac.in", "hunter22")
        .unwrap();

    // A student signing in through the admin gate authenticates at the
    // provider but must not keep that session.
    let err = fx
        .accounts
        .admin_sign_in("ravi@vitstudent.ac.in", "hunter22")
        .unwrap_err();
    assert!(matches!(err, AccountError::Auth(AuthError::AccountNotFound)));
    assert!(fx.provider.current_session().is_none());
}

#[test]
fn deactivated_account_cannot_sign_in() {
    let fx = fixture();
    let user = fx
        .accounts
        .register("ravi@vitstudent.ac.in", "hunter22")
        .unwrap();
    fx.accounts.set_active(&user.id, false).unwrap();

    let err = fx
        .accounts
        .student_sign_in("ravi@vitstudent.ac.in", "hunter22")
        .unwrap_err();
    assert!(matches!(
        err,
        AccountError::Auth(AuthError::AccountDeactivated)
    ));
    assert!(fx.provider.current_session().is_none());

    // Reactivation restores access.
    fx.accounts.set_active(&user.id, true).unwrap();
    assert!(fx
        .accounts
        .student_sign_in("ravi@vitstudent.ac.in", "hunter22")
        .is_ok());
}

#[test]
fn logout_handshake_ends_in_clean_state() {
    let fx = fixture();
    let user = fx
        .accounts
        .register("ravi@vitstudent.ac.in", "hunter22")
        .unwrap();

    fx.accounts.request_logout(&user.id).unwrap();
    let u = fx.engine.get_user(&user.id).unwrap().unwrap();
    assert!(u.logout_pending && !u.force_logout);

    fx.accounts.approve_logout(&user.id).unwrap();
    let u = fx.engine.get_user(&user.id).unwrap().unwrap();
    assert!(!u.logout_pending && u.force_logout);

    fx.accounts.acknowledge_logout(&user.id).unwrap();
    let u = fx.engine.get_user(&user.id).unwrap().unwrap();
    assert!(!u.logout_pending && !u.force_logout);
}
