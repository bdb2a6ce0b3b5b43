//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `PackStore` - Pack aggregates with compare-and-swap updates
//! - `SubscriptionStore` - (user, pack) subscription links
//! - `ClipStore` - Full-text clip index with cursor paging
//! - `ConversationStore` - Per-(chat, user) conversation state
//!
//! ## Messaging Ports
//!
//! - `MessagingGateway` - Delivers replies to the chat platform

mod clip_store;
mod conversation_store;
mod messaging_gateway;
mod pack_store;
mod save_result;
mod subscription_store;

pub use clip_store::{ClipStore, SearchCursor, SearchPage};
pub use conversation_store::ConversationStore;
pub use messaging_gateway::MessagingGateway;
pub use pack_store::PackStore;
pub use save_result::SaveResult;
pub use subscription_store::SubscriptionStore;
