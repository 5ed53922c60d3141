//! `IUserStore` trait — account document CRUD.
//!
//! Maps to `facrev-storage/src/queries/users.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::entities::User;

/// Account document storage. Users are never deleted; deactivation flips
/// `is_active` instead.
pub trait IUserStore: Send + Sync {
    /// Insert a new account document. The ID is the identity-provider
    /// subject ID. Fails if the ID or email already exists.
    fn create_user(&self, user: &User) -> Result<(), StorageError>;

    fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// All student accounts, for the admin management view.
    fn list_students(&self) -> Result<Vec<User>, StorageError>;

    fn count_students(&self) -> Result<i64, StorageError>;

    /// Toggle the deactivation flag.
    fn set_active(&self, id: &str, is_active: bool) -> Result<(), StorageError>;

    /// Set both logout-handshake flags in one write.
    fn set_logout_flags(
        &self,
        id: &str,
        logout_pending: bool,
        force_logout: bool,
    ) -> Result<(), StorageError>;
}

impl<T: IUserStore + ?Sized> IUserStore for Arc<T> {
    fn create_user(&self, user: &User) -> Result<(), StorageError> {
        (**self).create_user(user)
    }
    fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        (**self).get_user(id)
    }
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        (**self).get_user_by_email(email)
    }
    fn list_students(&self) -> Result<Vec<User>, StorageError> {
        (**self).list_students()
    }
    fn count_students(&self) -> Result<i64, StorageError> {
        (**self).count_students()
    }
    fn set_active(&self, id: &str, is_active: bool) -> Result<(), StorageError> {
        (**self).set_active(id, is_active)
    }
    fn set_logout_flags(
        &self,
        id: &str,
        logout_pending: bool,
        force_logout: bool,
    ) -> Result<(), StorageError> {
        (**self).set_logout_flags(id, logout_pending, force_logout)
    }
}
