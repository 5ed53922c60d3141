//! `StorageEngine` — unified storage engine implementing all seven store
//! traits from `facrev-core`.
//!
//! Wraps `DatabaseManager` (serialized connection) + `ChangeFeed`
//! (post-commit notification). All reads go through `with_reader()`, all
//! writes through `with_writer()`; every committed mutation publishes a
//! `ChangeEvent` for the touched collection.

use std::path::Path;
use std::sync::Arc;

use facrev_core::traits::storage::{
    IChatStore, IFacultyStore, IQuestionPaperStore, IReviewStore, ISettingsStore,
    ISuggestionStore, IUserStore,
};
use facrev_core::{
    ChangeEvent, ChatMessage, Collection, Faculty, FacultyUpdate, ModerationStatus,
    NewFacultySuggestion, QuestionPaper, Review, SiteSettings, SiteSettingsUpdate, StorageError,
    User,
};

use crate::changefeed::ChangeFeed;
use crate::connection::DatabaseManager;
use crate::{migrations, queries};

/// The unified facrev storage engine.
pub struct StorageEngine {
    db: DatabaseManager,
    feed: ChangeFeed,
}

impl StorageEngine {
    /// Open a file-backed engine at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        db.with_writer(migrations::apply)?;
        Ok(Self {
            db,
            feed: ChangeFeed::new(),
        })
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        db.with_writer(migrations::apply)?;
        Ok(Self {
            db,
            feed: ChangeFeed::new(),
        })
    }

    /// The change feed this engine publishes to.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Raw read access — for operations not covered by a trait method.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access. Does NOT publish a change event; prefer trait
    /// methods for anything a live query should observe.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

    /// Expose as `Arc<dyn IUserStore>` and friends without repeating the
    /// coercion at call sites.
    pub fn as_user_store(self: &Arc<Self>) -> Arc<dyn IUserStore> {
        Arc::clone(self) as Arc<dyn IUserStore>
    }

    pub fn as_faculty_store(self: &Arc<Self>) -> Arc<dyn IFacultyStore> {
        Arc::clone(self) as Arc<dyn IFacultyStore>
    }

    pub fn as_review_store(self: &Arc<Self>) -> Arc<dyn IReviewStore> {
        Arc::clone(self) as Arc<dyn IReviewStore>
    }

    pub fn as_suggestion_store(self: &Arc<Self>) -> Arc<dyn ISuggestionStore> {
        Arc::clone(self) as Arc<dyn ISuggestionStore>
    }

    pub fn as_paper_store(self: &Arc<Self>) -> Arc<dyn IQuestionPaperStore> {
        Arc::clone(self) as Arc<dyn IQuestionPaperStore>
    }

    pub fn as_chat_store(self: &Arc<Self>) -> Arc<dyn IChatStore> {
        Arc::clone(self) as Arc<dyn IChatStore>
    }

    pub fn as_settings_store(self: &Arc<Self>) -> Arc<dyn ISettingsStore> {
        Arc::clone(self) as Arc<dyn ISettingsStore>
    }

    fn publish(&self, collection: Collection) {
        self.feed.publish(ChangeEvent::new(collection));
    }

    /// Write, then notify the feed on success.
    fn write_and_publish<F, T>(&self, collection: Collection, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        let out = self.db.with_writer(f)?;
        self.publish(collection);
        Ok(out)
    }
}

// ─── IUserStore ─────────────────────────────────────────────────────

impl IUserStore for StorageEngine {
    fn create_user(&self, user: &User) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Users, |conn| {
            queries::users::insert_user(conn, user)
        })
    }

    fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        self.db.with_reader(|conn| queries::users::get_user(conn, id))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        self.db
            .with_reader(|conn| queries::users::get_user_by_email(conn, email))
    }

    fn list_students(&self) -> Result<Vec<User>, StorageError> {
        self.db.with_reader(queries::users::list_students)
    }

    fn count_students(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::users::count_students)
    }

    fn set_active(&self, id: &str, is_active: bool) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Users, |conn| {
            queries::users::set_active(conn, id, is_active)
        })
    }

    fn set_logout_flags(
        &self,
        id: &str,
        logout_pending: bool,
        force_logout: bool,
    ) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Users, |conn| {
            queries::users::set_logout_flags(conn, id, logout_pending, force_logout)
        })
    }
}

// ─── IFacultyStore ──────────────────────────────────────────────────

impl IFacultyStore for StorageEngine {
    fn create_faculty(&self, faculty: &Faculty) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Faculty, |conn| {
            queries::faculty::insert_faculty(conn, faculty)
        })
    }

    fn get_faculty(&self, id: &str) -> Result<Option<Faculty>, StorageError> {
        self.db
            .with_reader(|conn| queries::faculty::get_faculty(conn, id))
    }

    fn list_faculty(&self) -> Result<Vec<Faculty>, StorageError> {
        self.db.with_reader(queries::faculty::list_faculty)
    }

    fn count_faculty(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::faculty::count_faculty)
    }

    fn update_faculty(&self, id: &str, update: &FacultyUpdate) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Faculty, |conn| {
            queries::faculty::update_faculty(conn, id, update)
        })
    }

    fn delete_faculty(&self, id: &str) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Faculty, |conn| {
            queries::faculty::delete_faculty(conn, id)
        })
    }

    fn set_faculty_aggregate(
        &self,
        id: &str,
        rating: f64,
        review_count: i64,
    ) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Faculty, |conn| {
            queries::faculty::set_aggregate(conn, id, rating, review_count)
        })
    }
}

// ─── IReviewStore ───────────────────────────────────────────────────

impl IReviewStore for StorageEngine {
    fn create_review(&self, review: &Review) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Reviews, |conn| {
            queries::reviews::insert_review(conn, review)
        })
    }

    fn get_review(&self, id: &str) -> Result<Option<Review>, StorageError> {
        self.db
            .with_reader(|conn| queries::reviews::get_review(conn, id))
    }

    fn list_reviews_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<Review>, StorageError> {
        self.db
            .with_reader(|conn| queries::reviews::list_by_status(conn, status))
    }

    fn list_reviews_for_faculty(
        &self,
        faculty_id: &str,
        status: ModerationStatus,
    ) -> Result<Vec<Review>, StorageError> {
        self.db
            .with_reader(|conn| queries::reviews::list_for_faculty(conn, faculty_id, status))
    }

    fn get_pending_review_for_user(
        &self,
        user_id: &str,
        faculty_id: &str,
    ) -> Result<Option<Review>, StorageError> {
        self.db
            .with_reader(|conn| queries::reviews::get_pending_for_user(conn, user_id, faculty_id))
    }

    fn update_review_content(
        &self,
        id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Reviews, |conn| {
            queries::reviews::update_content(conn, id, rating, comment)
        })
    }

    fn set_review_status(&self, id: &str, status: ModerationStatus) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Reviews, |conn| {
            queries::reviews::set_status(conn, id, status)
        })
    }

    fn count_reviews_by_status(&self, status: ModerationStatus) -> Result<i64, StorageError> {
        self.db
            .with_reader(|conn| queries::reviews::count_by_status(conn, status))
    }
}

// ─── ISuggestionStore ───────────────────────────────────────────────

impl ISuggestionStore for StorageEngine {
    fn create_suggestion(&self, suggestion: &NewFacultySuggestion) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Suggestions, |conn| {
            queries::suggestions::insert_suggestion(conn, suggestion)
        })
    }

    fn get_suggestion(&self, id: &str) -> Result<Option<NewFacultySuggestion>, StorageError> {
        self.db
            .with_reader(|conn| queries::suggestions::get_suggestion(conn, id))
    }

    fn list_suggestions_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<NewFacultySuggestion>, StorageError> {
        self.db
            .with_reader(|conn| queries::suggestions::list_by_status(conn, status))
    }

    fn set_suggestion_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<(), StorageError> {
        self.write_and_publish(Collection::Suggestions, |conn| {
            queries::suggestions::set_status(conn, id, status)
        })
    }
}

// ─── IQuestionPaperStore ────────────────────────────────────────────

impl IQuestionPaperStore for StorageEngine {
    fn create_paper(&self, paper: &QuestionPaper) -> Result<(), StorageError> {
        self.write_and_publish(Collection::QuestionPapers, |conn| {
            queries::question_papers::insert_paper(conn, paper)
        })
    }

    fn get_paper(&self, id: &str) -> Result<Option<QuestionPaper>, StorageError> {
        self.db
            .with_reader(|conn| queries::question_papers::get_paper(conn, id))
    }

    fn list_papers_by_status(
        &self,
        status: ModerationStatus,
    ) -> Result<Vec<QuestionPaper>, StorageError> {
        self.db
            .with_reader(|conn| queries::question_papers::list_by_status(conn, status))
    }

    fn set_paper_status(&self, id: &str, status: ModerationStatus) -> Result<(), StorageError> {
        self.write_and_publish(Collection::QuestionPapers, |conn| {
            queries::question_papers::set_status(conn, id, status)
        })
    }
}

// ─── IChatStore ─────────────────────────────────────────────────────

impl IChatStore for StorageEngine {
    fn append_message(&self, message: &ChatMessage) -> Result<(), StorageError> {
        self.write_and_publish(Collection::ChatMessages, |conn| {
            queries::chat::insert_message(conn, message)
        })
    }

    fn list_messages(&self) -> Result<Vec<ChatMessage>, StorageError> {
        self.db.with_reader(queries::chat::list_messages)
    }
}

// ─── ISettingsStore ─────────────────────────────────────────────────

impl ISettingsStore for StorageEngine {
    fn get_settings(&self) -> Result<SiteSettings, StorageError> {
        self.db.with_reader(queries::settings::get_settings)
    }

    fn update_settings(&self, update: &SiteSettingsUpdate) -> Result<SiteSettings, StorageError> {
        self.write_and_publish(Collection::SiteSettings, |conn| {
            queries::settings::update_settings(conn, update)
        })
    }
}
