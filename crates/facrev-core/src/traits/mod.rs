//! Trait seams: storage contracts and external collaborators.

pub mod collaborators;
pub mod storage;

pub use collaborators::{IAssistant, IBlobStore, IIdentityProvider, Identity};
pub use storage::{
    IChatStore, IFacultyStore, IQuestionPaperStore, IReviewStore, ISettingsStore,
    ISuggestionStore, IUserStore,
};
