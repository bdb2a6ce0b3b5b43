//! Application layer - services over the ports, and conversation handling.
//!
//! The services own the business rules (names, permissions, soft deletion,
//! search resolution). The conversation module turns chat messages into
//! service calls and replies.

mod clips;
pub mod conversation;
mod packs;
pub mod replies;
mod repositories;
mod subscriptions;

pub use clips::ClipIndex;
pub use conversation::{DispatchOutcome, Dispatcher};
pub use packs::{parse_pack_name, PackRepository, MAX_UPDATE_ATTEMPTS};
pub use repositories::{Repositories, BOT_VERSION};
pub use subscriptions::SubscriptionRepository;
