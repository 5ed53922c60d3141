//! Moderation state machine integration tests over the in-memory engine.

use std::sync::Arc;

use facrev_core::traits::storage::{IFacultyStore, IReviewStore, ISuggestionStore};
use facrev_core::{Actor, Faculty, ModerationError, ModerationStatus};
use facrev_service::ModerationService;
use facrev_storage::StorageEngine;

fn fixture() -> (Arc<StorageEngine>, ModerationService, Faculty) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let service = ModerationService::from_engine(&engine);
    let faculty = Faculty::new_listing("Dr. Rao", "SCOPE", "Professor");
    engine.create_faculty(&faculty).unwrap();
    (engine, service, faculty)
}

#[test]
fn review_lifecycle_updates_aggregate() {
    let (engine, service, faculty) = fixture();

    let first = service.submit_review("u1", &faculty.id, 4, "Great lectures").unwrap();
    assert_eq!(first.status, ModerationStatus::Pending);

    service
        .transition_review(&first.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();
    let f = engine.get_faculty(&faculty.id).unwrap().unwrap();
    assert_eq!(f.rating, 4.0);
    assert_eq!(f.review_count, 1);

    let second = service.submit_review("u2", &faculty.id, 2, "Strict grading").unwrap();
    service
        .transition_review(&second.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();
    let f = engine.get_faculty(&faculty.id).unwrap().unwrap();
    assert_eq!(f.rating, 3.0);
    assert_eq!(f.review_count, 2);
}

#[test]
fn rejected_reviews_do_not_count() {
    let (engine, service, faculty) = fixture();

    let review = service.submit_review("u1", &faculty.id, 5, "Excellent").unwrap();
    service
        .transition_review(&review.id, ModerationStatus::Rejected, &Actor::Admin)
        .unwrap();

    let f = engine.get_faculty(&faculty.id).unwrap().unwrap();
    assert_eq!(f.rating, 0.0);
    assert_eq!(f.review_count, 0);
}

#[test]
fn terminal_review_cannot_transition_again() {
    let (_engine, service, faculty) = fixture();

    let review = service.submit_review("u1", &faculty.id, 4, "Good").unwrap();
    service
        .transition_review(&review.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();

    let err = service
        .transition_review(&review.id, ModerationStatus::Rejected, &Actor::Admin)
        .unwrap_err();
    assert!(matches!(
        err,
        ModerationError::InvalidStateTransition {
            from: ModerationStatus::Approved,
            to: ModerationStatus::Rejected,
        }
    ));
}

#[test]
fn one_pending_review_per_user_faculty_pair() {
    let (_engine, service, faculty) = fixture();

    service.submit_review("u1", &faculty.id, 4, "First take").unwrap();
    let err = service
        .submit_review("u1", &faculty.id, 5, "Second take")
        .unwrap_err();
    assert!(matches!(err, ModerationError::DuplicatePendingReview));

    // Another user is unaffected.
    assert!(service.submit_review("u2", &faculty.id, 3, "Fine").is_ok());
}

#[test]
fn resolved_review_frees_the_pending_slot() {
    let (_engine, service, faculty) = fixture();

    let first = service.submit_review("u1", &faculty.id, 4, "First").unwrap();
    service
        .transition_review(&first.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();
    assert!(service.submit_review("u1", &faculty.id, 5, "Updated view").is_ok());
}

#[test]
fn student_may_reject_own_pending_review_only() {
    let (_engine, service, faculty) = fixture();

    let review = service.submit_review("u1", &faculty.id, 4, "Mine").unwrap();

    // Other students cannot touch it, and owners cannot self-approve.
    let other = Actor::Student("u2".to_string());
    assert!(matches!(
        service.transition_review(&review.id, ModerationStatus::Rejected, &other),
        Err(ModerationError::NotOwner)
    ));
    let owner = Actor::Student("u1".to_string());
    assert!(matches!(
        service.transition_review(&review.id, ModerationStatus::Approved, &owner),
        Err(ModerationError::NotOwner)
    ));

    service
        .transition_review(&review.id, ModerationStatus::Rejected, &owner)
        .unwrap();
}

#[test]
fn owner_can_edit_pending_review_only() {
    let (engine, service, faculty) = fixture();

    let review = service.submit_review("u1", &faculty.id, 4, "Initial").unwrap();
    service
        .update_review_content(&review.id, "u1", 5, "Revised")
        .unwrap();
    let stored = engine.get_review(&review.id).unwrap().unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.comment, "Revised");

    assert!(matches!(
        service.update_review_content(&review.id, "u2", 3, "Hijack"),
        Err(ModerationError::NotOwner)
    ));

    service
        .transition_review(&review.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();
    assert!(matches!(
        service.update_review_content(&review.id, "u1", 1, "Too late"),
        Err(ModerationError::InvalidStateTransition { .. })
    ));
}

#[test]
fn approved_suggestion_materializes_faculty() {
    let (engine, service, _faculty) = fixture();

    let suggestion = service
        .submit_suggestion("u1", "Dr. Iyer", "SENSE", Some("Associate Professor"), None)
        .unwrap();
    service
        .transition_suggestion(&suggestion.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();

    let all = engine.list_faculty().unwrap();
    let created = all.iter().find(|f| f.name == "Dr. Iyer").unwrap();
    assert_eq!(created.department, "SENSE");
    assert_eq!(created.title, "Associate Professor");
    assert_eq!(created.rating, 0.0);

    let stored = engine.get_suggestion(&suggestion.id).unwrap().unwrap();
    assert_eq!(stored.status, ModerationStatus::Approved);
}

#[test]
fn rejected_suggestion_creates_nothing() {
    let (engine, service, _faculty) = fixture();

    let before = engine.count_faculty().unwrap();
    let suggestion = service
        .submit_suggestion("u1", "Dr. Iyer", "SENSE", None, None)
        .unwrap();
    service
        .transition_suggestion(&suggestion.id, ModerationStatus::Rejected, &Actor::Admin)
        .unwrap();
    assert_eq!(engine.count_faculty().unwrap(), before);
}

#[test]
fn suggestion_transition_is_admin_only() {
    let (_engine, service, _faculty) = fixture();

    let suggestion = service
        .submit_suggestion("u1", "Dr. Iyer", "SENSE", None, None)
        .unwrap();
    let student = Actor::Student("u1".to_string());
    assert!(matches!(
        service.transition_suggestion(&suggestion.id, ModerationStatus::Approved, &student),
        Err(ModerationError::NotOwner)
    ));
}

#[test]
fn question_paper_lifecycle() {
    let (_engine, service, _faculty) = fixture();

    let paper = service
        .submit_question_paper("u1", "u1@vitstudent.ac.in", "CSE2001", "A1", "file:///p.png")
        .unwrap();
    assert_eq!(paper.status, ModerationStatus::Pending);

    service
        .transition_question_paper(&paper.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();
    let err = service
        .transition_question_paper(&paper.id, ModerationStatus::Rejected, &Actor::Admin)
        .unwrap_err();
    assert!(matches!(err, ModerationError::InvalidStateTransition { .. }));
}

#[test]
fn aggregate_recompute_tolerates_deleted_faculty() {
    let (engine, service, faculty) = fixture();

    let review = service.submit_review("u1", &faculty.id, 4, "Good").unwrap();
    engine.delete_faculty(&faculty.id).unwrap();

    // The transition still lands; only the aggregate write is skipped.
    service
        .transition_review(&review.id, ModerationStatus::Approved, &Actor::Admin)
        .unwrap();
    let stored = engine.get_review(&review.id).unwrap().unwrap();
    assert_eq!(stored.status, ModerationStatus::Approved);
}
