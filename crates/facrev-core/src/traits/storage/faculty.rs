//! `IFacultyStore` trait — faculty profile CRUD and derived aggregates.
//!
//! Maps to `facrev-storage/src/queries/faculty.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::entities::{Faculty, FacultyUpdate};

/// Faculty profile storage.
pub trait IFacultyStore: Send + Sync {
    fn create_faculty(&self, faculty: &Faculty) -> Result<(), StorageError>;

    fn get_faculty(&self, id: &str) -> Result<Option<Faculty>, StorageError>;

    /// All profiles, ordered by name.
    fn list_faculty(&self) -> Result<Vec<Faculty>, StorageError>;

    fn count_faculty(&self) -> Result<i64, StorageError>;

    /// Partial update; `None` fields are left untouched.
    /// Fails with `NotFound` if the profile does not exist.
    fn update_faculty(&self, id: &str, update: &FacultyUpdate) -> Result<(), StorageError>;

    fn delete_faculty(&self, id: &str) -> Result<(), StorageError>;

    /// Overwrite the derived aggregate fields. Called by the moderation
    /// state machine after every review transition.
    fn set_faculty_aggregate(
        &self,
        id: &str,
        rating: f64,
        review_count: i64,
    ) -> Result<(), StorageError>;
}

impl<T: IFacultyStore + ?Sized> IFacultyStore for Arc<T> {
    fn create_faculty(&self, faculty: &Faculty) -> Result<(), StorageError> {
        (**self).create_faculty(faculty)
    }
    fn get_faculty(&self, id: &str) -> Result<Option<Faculty>, StorageError> {
        (**self).get_faculty(id)
    }
    fn list_faculty(&self) -> Result<Vec<Faculty>, StorageError> {
        (**self).list_faculty()
    }
    fn count_faculty(&self) -> Result<i64, StorageError> {
        (**self).count_faculty()
    }
    fn update_faculty(&self, id: &str, update: &FacultyUpdate) -> Result<(), StorageError> {
        (**self).update_faculty(id, update)
    }
    fn delete_faculty(&self, id: &str) -> Result<(), StorageError> {
        (**self).delete_faculty(id)
    }
    fn set_faculty_aggregate(
        &self,
        id: &str,
        rating: f64,
        review_count: i64,
    ) -> Result<(), StorageError> {
        (**self).set_faculty_aggregate(id, rating, review_count)
    }
}
