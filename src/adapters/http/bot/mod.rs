//! Bot HTTP surface: health check, webhook intake and inline search.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{BotAppState, WEBHOOK_SECRET_HEADER};
pub use routes::bot_router;
