//! Redis-backed conversation store.
//!
//! Each (chat, user) pair is one JSON value under
//! `conversation:<chat>:<user>`, written with a TTL so abandoned flows expire
//! on their own. Idle states are never stored; writing one deletes the key.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::{ChatId, DomainError, UserId};
use crate::ports::ConversationStore;

#[derive(Clone)]
pub struct RedisConversationStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisConversationStore {
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, DomainError> {
        let client = redis::Client::open(url)
            .map_err(|e| DomainError::cache(format!("Invalid Redis URL: {}", e)))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;
        Ok(Self::new(conn, ttl))
    }
}

impl fmt::Debug for RedisConversationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConversationStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn conversation_key(chat_id: ChatId, user_id: UserId) -> String {
    format!("conversation:{}:{}", chat_id, user_id)
}

fn encode(state: &ConversationState) -> Result<String, DomainError> {
    serde_json::to_string(state)
        .map_err(|e| DomainError::cache(format!("Failed to encode conversation state: {}", e)))
}

fn decode(raw: &str) -> Result<ConversationState, DomainError> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::cache(format!("Failed to decode conversation state: {}", e)))
}

#[async_trait]
impl ConversationStore for RedisConversationStore {
    async fn get(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<Option<ConversationState>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(conversation_key(chat_id, user_id))
            .await
            .map_err(|e: redis::RedisError| DomainError::cache(e.to_string()))?;

        raw.as_deref().map(decode).transpose()
    }

    async fn set(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        state: &ConversationState,
    ) -> Result<(), DomainError> {
        if state.is_idle() {
            return self.clear(chat_id, user_id).await;
        }

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(conversation_key(chat_id, user_id))
            .arg(encode(state)?)
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e: redis::RedisError| DomainError::cache(e.to_string()))
    }

    async fn clear(&self, chat_id: ChatId, user_id: UserId) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(conversation_key(chat_id, user_id))
            .await
            .map_err(|e: redis::RedisError| DomainError::cache(e.to_string()))
    }
}
