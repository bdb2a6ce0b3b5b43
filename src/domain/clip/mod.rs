//! Clip module - indexed clips and the search query grammar.

mod clip;
mod query;

pub use clip::{clip_key, Clip};
pub use query::{
    dedupe_by_clip_id, tokenize, IndexQuery, QueryBuilder, SearchQuery, Selector,
    SUBSCRIBED_SELECTOR,
};
