//! Clip store port - the full-text clip index.
//!
//! The index is a separate store from packs and subscriptions; the
//! application joins them in-process.

use async_trait::async_trait;

use crate::domain::clip::{Clip, IndexQuery};
use crate::domain::foundation::{ClipId, DomainError};
use crate::domain::pack::PackName;

use super::SaveResult;

/// Opaque position in a result set, handed back to fetch the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCursor(pub String);

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub clips: Vec<Clip>,
    /// `None` once the result set is exhausted.
    pub next_cursor: Option<SearchCursor>,
}

#[async_trait]
pub trait ClipStore: Send + Sync {
    /// Insert unless the (pack, clip id) pair already exists.
    async fn put_if_absent(&self, clip: &Clip) -> Result<SaveResult, DomainError>;

    /// Overwrite an existing entry. Returns `false` if it did not exist.
    async fn replace(&self, clip: &Clip) -> Result<bool, DomainError>;

    async fn get(&self, pack: &PackName, clip_id: &ClipId) -> Result<Option<Clip>, DomainError>;

    /// Remove one entry. Returns `false` if it did not exist.
    async fn delete(&self, pack: &PackName, clip_id: &ClipId) -> Result<bool, DomainError>;

    /// Remove every entry of a pack. Returns the number removed.
    async fn delete_pack(&self, pack: &PackName) -> Result<u64, DomainError>;

    /// Fetch one page of matches, starting after `cursor`.
    async fn search(
        &self,
        query: &IndexQuery,
        cursor: Option<SearchCursor>,
    ) -> Result<SearchPage, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ClipStore) {}
    }
}
