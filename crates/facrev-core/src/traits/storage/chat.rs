//! `IChatStore` trait — append-only chat room storage.
//!
//! Maps to `facrev-storage/src/queries/chat.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::entities::ChatMessage;

/// Chat message storage. Append-only: no update or delete.
pub trait IChatStore: Send + Sync {
    fn append_message(&self, message: &ChatMessage) -> Result<(), StorageError>;

    /// All messages, oldest first.
    fn list_messages(&self) -> Result<Vec<ChatMessage>, StorageError>;
}

impl<T: IChatStore + ?Sized> IChatStore for Arc<T> {
    fn append_message(&self, message: &ChatMessage) -> Result<(), StorageError> {
        (**self).append_message(message)
    }
    fn list_messages(&self) -> Result<Vec<ChatMessage>, StorageError> {
        (**self).list_messages()
    }
}
