//! In-memory pack store.
//!
//! Useful for tests and local development. Conditional writes run under the
//! map's write lock, so they are atomic with respect to each other.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pack::{Pack, PackName};
use crate::ports::{PackStore, SaveResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPackStore {
    packs: Arc<RwLock<HashMap<String, Pack>>>,
}

impl InMemoryPackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored packs, deleted ones included.
    pub async fn len(&self) -> usize {
        self.packs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.packs.read().await.is_empty()
    }

    async fn list_where(&self, pred: impl Fn(&Pack) -> bool) -> Vec<Pack> {
        let packs = self.packs.read().await;
        let mut found: Vec<Pack> = packs.values().filter(|p| pred(p)).cloned().collect();
        found.sort_by_key(|p| p.name().key());
        found
    }
}

#[async_trait]
impl PackStore for InMemoryPackStore {
    async fn insert_if_absent(&self, pack: &Pack) -> Result<SaveResult, DomainError> {
        let mut packs = self.packs.write().await;
        let key = pack.name().key();
        if packs.contains_key(&key) {
            return Ok(SaveResult::AlreadyExists);
        }
        packs.insert(key, pack.clone());
        Ok(SaveResult::Inserted)
    }

    async fn find(&self, name: &PackName) -> Result<Option<Pack>, DomainError> {
        Ok(self.packs.read().await.get(&name.key()).cloned())
    }

    async fn update_if_version(
        &self,
        pack: &Pack,
        expected_version: u64,
    ) -> Result<bool, DomainError> {
        let mut packs = self.packs.write().await;
        match packs.get_mut(&pack.name().key()) {
            Some(stored) if stored.version() == expected_version => {
                *stored = pack.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, name: &PackName) -> Result<bool, DomainError> {
        Ok(self.packs.write().await.remove(&name.key()).is_some())
    }

    async fn list_created_by(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
        Ok(self.list_where(|p| p.creator() == user_id).await)
    }

    async fn list_contributed_to(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
        Ok(self.list_where(|p| p.contributors().contains(&user_id)).await)
    }
}
