//! Change events emitted by the storage layer after every committed
//! mutation. The subscription hub keys its dispatch on `Collection`.

use serde::{Deserialize, Serialize};

/// The document collections in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Faculty,
    Reviews,
    Suggestions,
    QuestionPapers,
    ChatMessages,
    SiteSettings,
}

impl Collection {
    /// Table name in the SQLite backend.
    pub fn table(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Faculty => "faculty",
            Self::Reviews => "reviews",
            Self::Suggestions => "suggestions",
            Self::QuestionPapers => "question_papers",
            Self::ChatMessages => "chat_messages",
            Self::SiteSettings => "site_settings",
        }
    }
}

/// Emitted on the change feed after a committed write. Carries only the
/// touched collection; subscribers re-query for a full snapshot, so the
/// event itself stays small and bursts coalesce trivially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
}

impl ChangeEvent {
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }
}
