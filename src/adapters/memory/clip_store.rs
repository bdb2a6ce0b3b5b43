//! In-memory clip index.
//!
//! Entries are ordered by `<PACK KEY>:<clip id>`; the cursor is the last key
//! of the previous page.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::clip::{clip_key, Clip, IndexQuery};
use crate::domain::foundation::{ClipId, DomainError};
use crate::domain::pack::PackName;
use crate::ports::{ClipStore, SaveResult, SearchCursor, SearchPage};

const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct InMemoryClipStore {
    clips: Arc<RwLock<BTreeMap<String, Clip>>>,
    page_size: usize,
}

impl InMemoryClipStore {
    pub fn new() -> Self {
        Self {
            clips: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size (small pages exercise cursor handling).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn len(&self) -> usize {
        self.clips.read().await.len()
    }
}

impl Default for InMemoryClipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipStore for InMemoryClipStore {
    async fn put_if_absent(&self, clip: &Clip) -> Result<SaveResult, DomainError> {
        let mut clips = self.clips.write().await;
        let key = clip.key();
        if clips.contains_key(&key) {
            return Ok(SaveResult::AlreadyExists);
        }
        clips.insert(key, clip.clone());
        Ok(SaveResult::Inserted)
    }

    async fn replace(&self, clip: &Clip) -> Result<bool, DomainError> {
        let mut clips = self.clips.write().await;
        match clips.get_mut(&clip.key()) {
            Some(stored) => {
                *stored = clip.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, pack: &PackName, clip_id: &ClipId) -> Result<Option<Clip>, DomainError> {
        Ok(self.clips.read().await.get(&clip_key(pack, clip_id)).cloned())
    }

    async fn delete(&self, pack: &PackName, clip_id: &ClipId) -> Result<bool, DomainError> {
        Ok(self
            .clips
            .write()
            .await
            .remove(&clip_key(pack, clip_id))
            .is_some())
    }

    async fn delete_pack(&self, pack: &PackName) -> Result<u64, DomainError> {
        let mut clips = self.clips.write().await;
        let before = clips.len();
        clips.retain(|_, c| c.pack != *pack);
        Ok((before - clips.len()) as u64)
    }

    async fn search(
        &self,
        query: &IndexQuery,
        cursor: Option<SearchCursor>,
    ) -> Result<SearchPage, DomainError> {
        let clips = self.clips.read().await;
        let start = match &cursor {
            Some(SearchCursor(after)) => Bound::Excluded(after.clone()),
            None => Bound::Unbounded,
        };

        let mut page = Vec::new();
        let mut last_key = None;
        for (key, clip) in clips.range((start, Bound::Unbounded)) {
            if !query.matches(clip) {
                continue;
            }
            page.push(clip.clone());
            last_key = Some(key.clone());
            if page.len() == self.page_size {
                break;
            }
        }

        let next_cursor = if page.len() == self.page_size {
            last_key.map(SearchCursor)
        } else {
            None
        };
        Ok(SearchPage {
            clips: page,
            next_cursor,
        })
    }
}
