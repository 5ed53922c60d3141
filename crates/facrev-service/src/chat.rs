//! Community chat. Messages are unmoderated; the admin kill switch is the
//! `is_chat_enabled` site setting, enforced here server-side rather than
//! only in the client.

use std::sync::Arc;

use facrev_core::traits::storage::{IChatStore, ISettingsStore};
use facrev_core::{ChatMessage, ServiceError, ValidationError};
use facrev_storage::StorageEngine;

const MAX_MESSAGE_LEN: usize = 1000;

pub struct ChatService {
    chat: Arc<dyn IChatStore>,
    settings: Arc<dyn ISettingsStore>,
}

impl ChatService {
    pub fn new(chat: Arc<dyn IChatStore>, settings: Arc<dyn ISettingsStore>) -> Self {
        Self { chat, settings }
    }

    pub fn from_engine(engine: &Arc<StorageEngine>) -> Self {
        Self::new(engine.as_chat_store(), engine.as_settings_store())
    }

    pub fn send_message(
        &self,
        user_id: &str,
        user_email: &str,
        text: &str,
    ) -> Result<ChatMessage, ServiceError> {
        if !self.settings.get_settings()?.is_chat_enabled {
            return Err(ValidationError::new("chat", "chat is currently disabled").into());
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::new("text", "must not be empty").into());
        }
        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(ValidationError::new("text", "message too long").into());
        }
        let message = ChatMessage::new(user_id, user_email, text);
        self.chat.append_message(&message)?;
        Ok(message)
    }

    /// Full history in ascending timestamp order.
    pub fn list_messages(&self) -> Result<Vec<ChatMessage>, ServiceError> {
        Ok(self.chat.list_messages()?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use facrev_storage::StorageEngine;

    use super::*;

    fn service() -> ChatService {
        let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
        ChatService::from_engine(&engine)
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        let service = service();

        // 400 Devanagari characters is 1200 bytes but well under the limit.
        let multibyte = "स".repeat(400);
        assert!(service
            .send_message("u1", "u1@vitstudent.ac.in", &multibyte)
            .is_ok());

        let too_long = "स".repeat(MAX_MESSAGE_LEN + 1);
        assert!(service
            .send_message("u1", "u1@vitstudent.ac.in", &too_long)
            .is_err());
    }
}
