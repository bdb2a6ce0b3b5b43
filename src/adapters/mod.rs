//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - process-local stores and a recording gateway
//! - `postgres` - pack, subscription and clip stores
//! - `redis` - conversation state cache
//! - `gateway` - bot API messaging gateway
//! - `http` - axum router for the webhook and inline search

pub mod gateway;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis;
