//! Moderation state machine: the pending → {approved, rejected} lifecycle
//! shared by reviews, new-faculty suggestions, and question papers.
//!
//! Transition rules:
//! - only `pending → approved` and `pending → rejected` are legal;
//! - transitions are admin-only, except that a student may reject
//!   (self-delete) their own pending review;
//! - a transition attempt on an already-terminal entity fails with
//!   `InvalidStateTransition` rather than being silently applied, so the
//!   second of two racing approvals loses cleanly.

use std::sync::Arc;

use tracing::{debug, info};

use facrev_core::traits::storage::{
    IFacultyStore, IQuestionPaperStore, IReviewStore, ISuggestionStore,
};
use facrev_core::{
    Actor, Faculty, ModerationError, ModerationStatus, NewFacultySuggestion, QuestionPaper,
    Review, ValidationError,
};
use facrev_storage::StorageEngine;

/// The moderation state machine over injected store traits.
pub struct ModerationService {
    reviews: Arc<dyn IReviewStore>,
    faculty: Arc<dyn IFacultyStore>,
    suggestions: Arc<dyn ISuggestionStore>,
    papers: Arc<dyn IQuestionPaperStore>,
}

impl ModerationService {
    pub fn new(
        reviews: Arc<dyn IReviewStore>,
        faculty: Arc<dyn IFacultyStore>,
        suggestions: Arc<dyn ISuggestionStore>,
        papers: Arc<dyn IQuestionPaperStore>,
    ) -> Self {
        Self {
            reviews,
            faculty,
            suggestions,
            papers,
        }
    }

    /// Convenience constructor over the unified SQLite engine.
    pub fn from_engine(engine: &Arc<StorageEngine>) -> Self {
        Self::new(
            engine.as_review_store(),
            engine.as_faculty_store(),
            engine.as_suggestion_store(),
            engine.as_paper_store(),
        )
    }

    // ── Reviews ─────────────────────────────────────────────────────

    /// Submit a review. At most one pending review per (user, faculty)
    /// pair; a second submission while one is pending is rejected.
    pub fn submit_review(
        &self,
        user_id: &str,
        faculty_id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<Review, ModerationError> {
        validate_rating(rating)?;
        validate_non_empty("comment", comment)?;

        if self
            .reviews
            .get_pending_review_for_user(user_id, faculty_id)?
            .is_some()
        {
            return Err(ModerationError::DuplicatePendingReview);
        }

        let review = Review::new(user_id, faculty_id, rating, comment.trim());
        self.reviews.create_review(&review)?;
        debug!(review = %review.id, faculty = faculty_id, "review submitted");
        Ok(review)
    }

    /// Owner edit of a still-pending review.
    pub fn update_review_content(
        &self,
        review_id: &str,
        requester_id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<(), ModerationError> {
        validate_rating(rating)?;
        validate_non_empty("comment", comment)?;

        let review = self.get_review(review_id)?;
        if review.user_id != requester_id {
            return Err(ModerationError::NotOwner);
        }
        if review.status.is_terminal() {
            return Err(ModerationError::InvalidStateTransition {
                from: review.status,
                to: review.status,
            });
        }
        self.reviews
            .update_review_content(review_id, rating, comment.trim())?;
        Ok(())
    }

    /// Transition a review to a terminal state and recompute the owning
    /// faculty's aggregate. A student actor may only reject their own
    /// pending review.
    pub fn transition_review(
        &self,
        review_id: &str,
        target: ModerationStatus,
        actor: &Actor,
    ) -> Result<(), ModerationError> {
        let review = self.get_review(review_id)?;
        check_transition(review.status, target)?;

        match actor {
            Actor::Admin => {}
            Actor::Student(uid) => {
                if *uid != review.user_id {
                    return Err(ModerationError::NotOwner);
                }
                if target != ModerationStatus::Rejected {
                    return Err(ModerationError::NotOwner);
                }
            }
        }

        self.reviews.set_review_status(review_id, target)?;
        info!(review = review_id, %target, "review transitioned");
        self.recompute_faculty_aggregate(&review.faculty_id)?;
        Ok(())
    }

    /// Recompute `rating`/`review_count` for one faculty from its approved
    /// reviews. Zero approved reviews resets to (0.0, 0). Tolerates a
    /// faculty record that was deleted while reviews remained.
    pub fn recompute_faculty_aggregate(&self, faculty_id: &str) -> Result<(), ModerationError> {
        if self.faculty.get_faculty(faculty_id)?.is_none() {
            debug!(faculty = faculty_id, "skipping aggregate for missing faculty");
            return Ok(());
        }
        let approved = self
            .reviews
            .list_reviews_for_faculty(faculty_id, ModerationStatus::Approved)?;
        let count = approved.len() as i64;
        let rating = if count == 0 {
            0.0
        } else {
            approved.iter().map(|r| r.rating as f64).sum::<f64>() / count as f64
        };
        self.faculty
            .set_faculty_aggregate(faculty_id, rating, count)?;
        Ok(())
    }

    // ── Suggestions ─────────────────────────────────────────────────

    pub fn submit_suggestion(
        &self,
        user_id: &str,
        faculty_name: &str,
        department: &str,
        title: Option<&str>,
        notes: Option<&str>,
    ) -> Result<NewFacultySuggestion, ModerationError> {
        validate_non_empty("faculty_name", faculty_name)?;
        validate_non_empty("department", department)?;

        let suggestion = NewFacultySuggestion {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            faculty_name: faculty_name.trim().to_string(),
            department: department.trim().to_string(),
            title: title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            notes: notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            date: chrono::Utc::now(),
            status: ModerationStatus::Pending,
        };
        self.suggestions.create_suggestion(&suggestion)?;
        Ok(suggestion)
    }

    /// Admin-only. Approval materializes the suggested faculty as a real
    /// directory entry, honoring the user-visible intent of the approval.
    pub fn transition_suggestion(
        &self,
        suggestion_id: &str,
        target: ModerationStatus,
        actor: &Actor,
    ) -> Result<(), ModerationError> {
        if !actor.is_admin() {
            return Err(ModerationError::NotOwner);
        }
        let suggestion = self
            .suggestions
            .get_suggestion(suggestion_id)?
            .ok_or_else(|| ModerationError::NotFound {
                id: suggestion_id.to_string(),
            })?;
        check_transition(suggestion.status, target)?;

        self.suggestions.set_suggestion_status(suggestion_id, target)?;
        info!(suggestion = suggestion_id, %target, "suggestion transitioned");

        if target == ModerationStatus::Approved {
            let faculty = Faculty::new_listing(
                &suggestion.faculty_name,
                &suggestion.department,
                suggestion.title.as_deref().unwrap_or("Faculty"),
            );
            self.faculty.create_faculty(&faculty)?;
            info!(faculty = %faculty.id, "faculty created from approved suggestion");
        }
        Ok(())
    }

    // ── Question papers ─────────────────────────────────────────────

    pub fn submit_question_paper(
        &self,
        user_id: &str,
        user_email: &str,
        course_name: &str,
        slot: &str,
        image_url: &str,
    ) -> Result<QuestionPaper, ModerationError> {
        validate_non_empty("course_name", course_name)?;
        validate_non_empty("slot", slot)?;
        validate_non_empty("image_url", image_url)?;

        let paper = QuestionPaper {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            course_name: course_name.trim().to_string(),
            slot: slot.trim().to_string(),
            image_url: image_url.to_string(),
            status: ModerationStatus::Pending,
            date: chrono::Utc::now(),
        };
        self.papers.create_paper(&paper)?;
        Ok(paper)
    }

    /// Admin-only; visibility change only, no side effects.
    pub fn transition_question_paper(
        &self,
        paper_id: &str,
        target: ModerationStatus,
        actor: &Actor,
    ) -> Result<(), ModerationError> {
        if !actor.is_admin() {
            return Err(ModerationError::NotOwner);
        }
        let paper = self
            .papers
            .get_paper(paper_id)?
            .ok_or_else(|| ModerationError::NotFound {
                id: paper_id.to_string(),
            })?;
        check_transition(paper.status, target)?;

        self.papers.set_paper_status(paper_id, target)?;
        info!(paper = paper_id, %target, "question paper transitioned");
        Ok(())
    }

    fn get_review(&self, id: &str) -> Result<Review, ModerationError> {
        self.reviews
            .get_review(id)?
            .ok_or_else(|| ModerationError::NotFound { id: id.to_string() })
    }
}

/// The single transition-legality check shared by all three collections.
fn check_transition(
    from: ModerationStatus,
    to: ModerationStatus,
) -> Result<(), ModerationError> {
    if from.is_terminal() || !to.is_terminal() {
        return Err(ModerationError::InvalidStateTransition { from, to });
    }
    Ok(())
}

fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::new(
            "rating",
            format!("must be between 1 and 5, got {rating}"),
        ));
    }
    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_legality_matrix() {
        use ModerationStatus::{Approved, Pending, Rejected};
        assert!(check_transition(Pending, Approved).is_ok());
        assert!(check_transition(Pending, Rejected).is_ok());
        // Terminal sources and non-terminal targets are both illegal.
        assert!(check_transition(Approved, Rejected).is_err());
        assert!(check_transition(Rejected, Approved).is_err());
        assert!(check_transition(Pending, Pending).is_err());
        assert!(check_transition(Approved, Pending).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
