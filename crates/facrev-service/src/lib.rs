//! # facrev-service
//!
//! Behavioral core of the facrev platform: the moderation state machine,
//! the account lifecycle controller, the live-query subscription hub, and
//! the admin-facing directory/settings/chat services. Everything here is a
//! stateless facade over the store traits from `facrev-core`; the SQLite
//! engine in `facrev-storage` is the single shared mutable resource.

pub mod accounts;
pub mod assistant;
pub mod blob;
pub mod chat;
pub mod dashboard;
pub mod directory;
pub mod identity;
pub mod import;
pub mod moderation;
pub mod settings;
pub mod subscriptions;

pub use accounts::AccountService;
pub use assistant::OfflineAssistant;
pub use blob::FsBlobStore;
pub use chat::ChatService;
pub use dashboard::{DashboardService, DashboardStats};
pub use directory::DirectoryService;
pub use identity::LocalIdentityProvider;
pub use import::{parse_faculty_csv, ImportError};
pub use moderation::ModerationService;
pub use settings::SettingsService;
pub use subscriptions::{LiveQuery, Snapshot, Subscription, SubscriptionHub};
