//! `IReviewStore` trait — review CRUD and status-filtered views.
//!
//! Maps to `facrev-storage/src/queries/reviews.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::entities::Review;
use crate::types::status::ModerationStatus;

/// Review storage. Status transitions go through the moderation state
/// machine, never directly through `set_review_status` from UI code.
pub trait IReviewStore: Send + Sync {
    fn create_review(&self, review: &Review) -> Result<(), StorageError>;

    fn get_review(&self, id: &str) -> Result<Option<Review>, StorageError>;

    /// Moderation queue view, newest first.
    fn list_reviews_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Review>, StorageError>;

    /// Faculty-detail view, newest first.
    fn list_reviews_for_faculty(
        &self,
        faculty_id: &str,
        status: ModerationStatus,
    ) -> Result<Vec<Review>, StorageError>;

    /// The at-most-one pending review for a (user, faculty) pair.
    fn get_pending_review_for_user(
        &self,
        user_id: &str,
        faculty_id: &str,
    ) -> Result<Option<Review>, StorageError>;

    /// Owner edit of a still-pending review.
    fn update_review_content(
        &self,
        id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<(), StorageError>;

    fn set_review_status(&self, id: &str, status: ModerationStatus) -> Result<(), StorageError>;

    fn count_reviews_by_status(&self, status: ModerationStatus) -> Result<i64, StorageError>;
}

impl<T: IReviewStore + ?Sized> IReviewStore for Arc<T> {
    fn create_review(&self, review: &Review) -> Result<(), StorageError> {
        (**self).create_review(review)
    }
    fn get_review(&self, id: &str) -> Result<Option<Review>, StorageError> {
        (**self).get_review(id)
    }
    fn list_reviews_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Review>, StorageError> {
        (**self).list_reviews_by_status(status)
    }
    fn list_reviews_for_faculty(
        &self,
        faculty_id: &str,
        status: ModerationStatus,
    ) -> Result<Vec<Review>, StorageError> {
        (**self).list_reviews_for_faculty(faculty_id, status)
    }
    fn get_pending_review_for_user(
        &self,
        user_id: &str,
        faculty_id: &str,
    ) -> Result<Option<Review>, StorageError> {
        (**self).get_pending_review_for_user(user_id, faculty_id)
    }
    fn update_review_content(
        &self,
        id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<(), StorageError> {
        (**self).update_review_content(id, rating, comment)
    }
    fn set_review_status(&self, id: &str, status: ModerationStatus) -> Result<(), StorageError> {
        (**self).set_review_status(id, status)
    }
    fn count_reviews_by_status(&self, status: ModerationStatus) -> Result<i64, StorageError> {
        (**self).count_reviews_by_status(status)
    }
}
