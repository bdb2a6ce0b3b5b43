//! Clip entity as stored in the clip index.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ClipId;
use crate::domain::pack::PackName;

use super::query::tokenize;

/// A clip in a pack, searchable by its keywords.
///
/// Unique per (pack, clip id); the same file may appear in several packs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub pack: PackName,
    pub clip_id: ClipId,
    pub keywords: String,
}

impl Clip {
    pub fn new(pack: PackName, clip_id: ClipId, keywords: impl Into<String>) -> Self {
        Self {
            pack,
            clip_id,
            keywords: keywords.into(),
        }
    }

    /// Index key: `<PACK KEY>:<clip id>`.
    pub fn key(&self) -> String {
        clip_key(&self.pack, &self.clip_id)
    }

    /// Lower-cased alphanumeric tokens of the keyword text.
    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.keywords)
    }
}

/// Builds the index key for a (pack, clip) pair.
pub fn clip_key(pack: &PackName, clip_id: &ClipId) -> String {
    format!("{}:{}", pack.key(), clip_id)
}
