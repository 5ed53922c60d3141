//! Live-query subscription hub.
//!
//! A caller registers a `LiveQuery` plus a callback and receives an
//! immediate full snapshot, then a full replacement snapshot (never a
//! diff) whenever a mutation touches the query's collection. A dedicated
//! dispatcher thread drains the storage change feed, coalesces bursts of
//! events into one dispatch per touched collection, and re-queries the
//! store at dispatch time, so successive pushes are monotonically
//! non-decreasing views of the store.
//!
//! Callbacks run on the dispatcher thread while the registry lock is held:
//! that is what makes `Subscription::cancel` a hard barrier (no callback
//! fires after cancel returns), and it means a callback must not itself
//! subscribe or cancel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use tracing::warn;

use facrev_core::traits::storage::{
    IChatStore, IFacultyStore, IQuestionPaperStore, IReviewStore, ISettingsStore,
    ISuggestionStore, IUserStore,
};
use facrev_core::{
    ChatMessage, Collection, Faculty, ModerationStatus, NewFacultySuggestion, QuestionPaper,
    Review, SiteSettings, StorageError, User,
};
use facrev_storage::StorageEngine;

const FEED_POLL: Duration = Duration::from_millis(100);

/// Every filtered view the client listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveQuery {
    Students,
    UserDocument(String),
    AllFaculty,
    ReviewsByStatus(ModerationStatus),
    ReviewsForFaculty {
        faculty_id: String,
        status: ModerationStatus,
    },
    PendingReviewForUser {
        user_id: String,
        faculty_id: String,
    },
    SuggestionsByStatus(ModerationStatus),
    QuestionPapersByStatus(ModerationStatus),
    ChatMessages,
    Settings,
}

impl LiveQuery {
    /// The collection whose mutations invalidate this query.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Students | Self::UserDocument(_) => Collection::Users,
            Self::AllFaculty => Collection::Faculty,
            Self::ReviewsByStatus(_)
            | Self::ReviewsForFaculty { .. }
            | Self::PendingReviewForUser { .. } => Collection::Reviews,
            Self::SuggestionsByStatus(_) => Collection::Suggestions,
            Self::QuestionPapersByStatus(_) => Collection::QuestionPapers,
            Self::ChatMessages => Collection::ChatMessages,
            Self::Settings => Collection::SiteSettings,
        }
    }
}

/// A full result set for one query. Always the complete current view,
/// never a diff.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Users(Vec<User>),
    User(Option<User>),
    Faculty(Vec<Faculty>),
    Reviews(Vec<Review>),
    Review(Option<Review>),
    Suggestions(Vec<NewFacultySuggestion>),
    QuestionPapers(Vec<QuestionPaper>),
    Messages(Vec<ChatMessage>),
    Settings(SiteSettings),
}

type Callback = Box<dyn Fn(Snapshot) + Send + Sync + 'static>;

struct Entry {
    query: LiveQuery,
    callback: Callback,
}

struct HubInner {
    engine: Arc<StorageEngine>,
    entries: Mutex<HashMap<u64, Entry>>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

/// The subscription hub. One dispatcher thread per hub.
pub struct SubscriptionHub {
    inner: Arc<HubInner>,
    dispatcher: Option<JoinHandle<()>>,
}

impl SubscriptionHub {
    pub fn new(engine: Arc<StorageEngine>) -> Self {
        let rx = engine.feed().register();
        let inner = Arc::new(HubInner {
            engine,
            entries: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        });

        let loop_inner = Arc::clone(&inner);
        let dispatcher = std::thread::Builder::new()
            .name("facrev-subscriptions".to_string())
            .spawn(move || dispatcher_loop(loop_inner, rx))
            .expect("failed to spawn subscription dispatcher thread");

        Self {
            inner,
            dispatcher: Some(dispatcher),
        }
    }

    /// Register a live query. The callback receives the current snapshot
    /// before this method returns, then one snapshot per relevant change.
    pub fn subscribe(
        &self,
        query: LiveQuery,
        callback: impl Fn(Snapshot) + Send + Sync + 'static,
    ) -> Result<Subscription, StorageError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let entry = Entry {
            query,
            callback: Box::new(callback),
        };

        // Insert and deliver the initial snapshot under the registry lock
        // so a concurrent dispatch cannot interleave a second push before
        // the initial one.
        let mut entries = self
            .inner
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let snapshot = snapshot(&self.inner.engine, &entry.query)?;
        (entry.callback)(snapshot);
        entries.insert(id, entry);
        drop(entries);

        Ok(Subscription {
            id,
            inner: Arc::clone(&self.inner),
        })
    }
}

impl Drop for SubscriptionHub {
    fn drop(&mut self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        if let Some(handle) = self.dispatcher.take() {
            let _ = handle.join();
        }
    }
}

/// Handle for one registered live query. `cancel` is idempotent and may
/// be called at any time, including while a dispatch is in flight; once
/// it returns, the callback never fires again. Dropping cancels too.
pub struct Subscription {
    id: u64,
    inner: Arc<HubInner>,
}

impl Subscription {
    pub fn cancel(&self) {
        let mut entries = self.inner.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(&self.id);
    }

    pub fn is_active(&self) -> bool {
        let entries = self.inner.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(&self.id)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn dispatcher_loop(inner: Arc<HubInner>, rx: crossbeam_channel::Receiver<facrev_core::ChangeEvent>) {
    loop {
        let first = match rx.recv_timeout(FEED_POLL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => {
                if inner.closed.load(Ordering::SeqCst) {
                    return;
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => return,
        };

        // Coalesce the burst: one dispatch per touched collection, with
        // the snapshot taken after the last event, never before.
        let mut touched = vec![first.collection];
        while let Ok(event) = rx.try_recv() {
            if !touched.contains(&event.collection) {
                touched.push(event.collection);
            }
        }

        let entries = inner.entries.lock().unwrap_or_else(|e| e.into_inner());
        for entry in entries.values() {
            if !touched.contains(&entry.query.collection()) {
                continue;
            }
            match snapshot(&inner.engine, &entry.query) {
                Ok(snap) => (entry.callback)(snap),
                // A store failure must not kill the stream; the next
                // change will retry the query.
                Err(e) => warn!(error = %e, "live query snapshot failed"),
            }
        }
    }
}

/// Run one query against the store.
fn snapshot(engine: &StorageEngine, query: &LiveQuery) -> Result<Snapshot, StorageError> {
    Ok(match query {
        LiveQuery::Students => Snapshot::Users(engine.list_students()?),
        LiveQuery::UserDocument(id) => Snapshot::User(engine.get_user(id)?),
        LiveQuery::AllFaculty => Snapshot::Faculty(engine.list_faculty()?),
        LiveQuery::ReviewsByStatus(status) => {
            Snapshot::Reviews(engine.list_reviews_by_status(*status)?)
        }
        LiveQuery::ReviewsForFaculty { faculty_id, status } => {
            Snapshot::Reviews(engine.list_reviews_for_faculty(faculty_id, *status)?)
        }
        LiveQuery::PendingReviewForUser {
            user_id,
            faculty_id,
        } => Snapshot::Review(engine.get_pending_review_for_user(user_id, faculty_id)?),
        LiveQuery::SuggestionsByStatus(status) => {
            Snapshot::Suggestions(engine.list_suggestions_by_status(*status)?)
        }
        LiveQuery::QuestionPapersByStatus(status) => {
            Snapshot::QuestionPapers(engine.list_papers_by_status(*status)?)
        }
        LiveQuery::ChatMessages => Snapshot::Messages(engine.list_messages()?),
        LiveQuery::Settings => Snapshot::Settings(engine.get_settings()?),
    })
}
