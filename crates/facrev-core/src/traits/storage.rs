//! Storage trait module — re-exports all store traits.
//!
//! These traits define the contract between the moderation/lifecycle logic
//! and the underlying document store. The SQLite implementation lives in
//! `facrev-storage`. All traits are object-safe, `Send + Sync`, and have
//! blanket `Arc<T>` impls, so services can be built over injected trait
//! objects and unit-tested without a live backend.

pub mod chat;
pub mod faculty;
pub mod reviews;
pub mod settings;
pub mod submissions;
pub mod users;

pub use chat::IChatStore;
pub use faculty::IFacultyStore;
pub use reviews::IReviewStore;
pub use settings::ISettingsStore;
pub use submissions::{IQuestionPaperStore, ISuggestionStore};
pub use users::IUserStore;
