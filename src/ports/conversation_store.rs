//! Conversation store port.
//!
//! Holds at most one [`ConversationState`] per (chat, user) pair.

use async_trait::async_trait;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::{ChatId, DomainError, UserId};

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns `None` when nothing is stored.
    async fn get(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<Option<ConversationState>, DomainError>;

    async fn set(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        state: &ConversationState,
    ) -> Result<(), DomainError>;

    /// Remove any stored state. Clearing an absent state is not an error.
    async fn clear(&self, chat_id: ChatId, user_id: UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ConversationStore) {}
    }
}
