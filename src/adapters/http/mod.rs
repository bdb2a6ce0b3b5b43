//! HTTP adapters - the axum surface of the bot.

pub mod bot;

pub use bot::{bot_router, BotAppState};
