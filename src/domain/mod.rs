//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine trait)
//! - `pack` - Pack aggregate, name rules and sharing permissions
//! - `subscription` - Per-user opt-in links to packs
//! - `clip` - Indexed clips and the search query grammar
//! - `conversation` - Inbound events, replies and conversation state

pub mod clip;
pub mod conversation;
pub mod foundation;
pub mod pack;
pub mod subscription;
