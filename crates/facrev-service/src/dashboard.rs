//! Admin dashboard aggregates.

use std::sync::Arc;

use facrev_core::traits::storage::{IFacultyStore, IReviewStore, IUserStore};
use facrev_core::{ModerationStatus, StorageError};
use facrev_storage::StorageEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub pending_reviews: i64,
    pub approved_reviews: i64,
    pub total_faculty: i64,
    pub total_students: i64,
}

pub struct DashboardService {
    users: Arc<dyn IUserStore>,
    faculty: Arc<dyn IFacultyStore>,
    reviews: Arc<dyn IReviewStore>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn IUserStore>,
        faculty: Arc<dyn IFacultyStore>,
        reviews: Arc<dyn IReviewStore>,
    ) -> Self {
        Self {
            users,
            faculty,
            reviews,
        }
    }

    pub fn from_engine(engine: &Arc<StorageEngine>) -> Self {
        Self::new(
            engine.as_user_store(),
            engine.as_faculty_store(),
            engine.as_review_store(),
        )
    }

    /// Counts are read in four separate queries, so a concurrent mutation
    /// can skew one against another; the dashboard refreshes on the next
    /// change event anyway.
    pub fn stats(&self) -> Result<DashboardStats, StorageError> {
        Ok(DashboardStats {
            pending_reviews: self
                .reviews
                .count_reviews_by_status(ModerationStatus::Pending)?,
            approved_reviews: self
                .reviews
                .count_reviews_by_status(ModerationStatus::Approved)?,
            total_faculty: self.faculty.count_faculty()?,
            total_students: self.users.count_students()?,
        })
    }
}
