//! Clip Pack Bot - curate, share and search packs of short video clips
//! from a chat.
//!
//! Users create named packs, add clips tagged with keywords, share edit
//! rights with contributors and subscribe to packs. Inline search finds
//! clips by keyword across a named pack or every subscribed pack.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
