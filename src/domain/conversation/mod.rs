//! Conversation domain module.
//!
//! Inbound chat events, outbound replies, and the per-(chat, user) state
//! that sequences multi-step command flows.

mod message;
mod reply;
mod state;

pub use message::{Attachment, ChatKind, InboundMessage, Input, CLIP_MIME_TYPE};
pub use reply::{ParseMode, Reply};
pub use state::{ConversationState, StateTag};
