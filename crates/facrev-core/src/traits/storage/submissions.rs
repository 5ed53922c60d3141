//! `ISuggestionStore` + `IQuestionPaperStore` traits — the two moderated
//! collections that only admins transition.
//!
//! Maps to `facrev-storage/src/queries/suggestions.rs` + `question_papers.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::entities::{NewFacultySuggestion, QuestionPaper};
use crate::types::status::ModerationStatus;

/// New-faculty suggestion storage.
pub trait ISuggestionStore: Send + Sync {
    fn create_suggestion(&self, suggestion: &NewFacultySuggestion) -> Result<(), StorageError>;

    fn get_suggestion(&self, id: &str) -> Result<Option<NewFacultySuggestion>, StorageError>;

    /// Moderation queue view, newest first.
    fn list_suggestions_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<NewFacultySuggestion>, StorageError>;

    fn set_suggestion_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<(), StorageError>;
}

impl<T: ISuggestionStore + ?Sized> ISuggestionStore for Arc<T> {
    fn create_suggestion(&self, suggestion: &NewFacultySuggestion) -> Result<(), StorageError> {
        (**self).create_suggestion(suggestion)
    }
    fn get_suggestion(&self, id: &str) -> Result<Option<NewFacultySuggestion>, StorageError> {
        (**self).get_suggestion(id)
    }
    fn list_suggestions_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<NewFacultySuggestion>, StorageError> {
        (**self).list_suggestions_by_status(status)
    }
    fn set_suggestion_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<(), StorageError> {
        (**self).set_suggestion_status(id, status)
    }
}

/// Question paper storage. Publicly listed only when approved.
pub trait IQuestionPaperStore: Send + Sync {
    fn create_paper(&self, paper: &QuestionPaper) -> Result<(), StorageError>;

    fn get_paper(&self, id: &str) -> Result<Option<QuestionPaper>, StorageError>;

    /// Status-filtered view, newest first.
    fn list_papers_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<QuestionPaper>, StorageError>;

    fn set_paper_status(&self, id: &str, status: ModerationStatus) -> Result<(), StorageError>;
}

impl<T: IQuestionPaperStore + ?Sized> IQuestionPaperStore for Arc<T> {
    fn create_paper(&self, paper: &QuestionPaper) -> Result<(), StorageError> {
        (**self).create_paper(paper)
    }
    fn get_paper(&self, id: &str) -> Result<Option<QuestionPaper>, StorageError> {
        (**self).get_paper(id)
    }
    fn list_papers_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<QuestionPaper>, StorageError> {
        (**self).list_papers_by_status(status)
    }
    fn set_paper_status(&self, id: &str, status: ModerationStatus) -> Result<(), StorageError> {
        (**self).set_paper_status(id, status)
    }
}
