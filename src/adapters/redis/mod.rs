//! Redis adapters.

mod conversation_store;

pub use conversation_store::RedisConversationStore;
