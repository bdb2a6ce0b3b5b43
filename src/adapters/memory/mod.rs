//! In-memory adapters for tests and local development.

mod clip_store;
mod conversation_store;
mod pack_store;
mod recording_gateway;
mod subscription_store;

pub use clip_store::InMemoryClipStore;
pub use conversation_store::InMemoryConversationStore;
pub use pack_store::InMemoryPackStore;
pub use recording_gateway::RecordingGateway;
pub use subscription_store::InMemorySubscriptionStore;
