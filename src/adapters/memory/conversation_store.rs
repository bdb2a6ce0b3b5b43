//! In-memory conversation store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::{ChatId, DomainError, UserId};
use crate::ports::ConversationStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    states: Arc<RwLock<HashMap<(ChatId, UserId), ConversationState>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored, non-idle states.
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<Option<ConversationState>, DomainError> {
        Ok(self.states.read().await.get(&(chat_id, user_id)).cloned())
    }

    async fn set(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        state: &ConversationState,
    ) -> Result<(), DomainError> {
        let mut states = self.states.write().await;
        if state.is_idle() {
            states.remove(&(chat_id, user_id));
        } else {
            states.insert((chat_id, user_id), state.clone());
        }
        Ok(())
    }

    async fn clear(&self, chat_id: ChatId, user_id: UserId) -> Result<(), DomainError> {
        self.states.write().await.remove(&(chat_id, user_id));
        Ok(())
    }
}
