//! In-memory subscription store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pack::PackName;
use crate::domain::subscription::Subscription;
use crate::ports::{SaveResult, SubscriptionStore};

/// Subscriptions keyed by `<user>:<PACK KEY>`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    subscriptions: Arc<RwLock<BTreeMap<String, Subscription>>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.subscriptions.read().await.len()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn insert_if_absent(
        &self,
        subscription: &Subscription,
    ) -> Result<SaveResult, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        let key = subscription.key();
        if subscriptions.contains_key(&key) {
            return Ok(SaveResult::AlreadyExists);
        }
        subscriptions.insert(key, subscription.clone());
        Ok(SaveResult::Inserted)
    }

    async fn delete(&self, subscription: &Subscription) -> Result<bool, DomainError> {
        Ok(self
            .subscriptions
            .write()
            .await
            .remove(&subscription.key())
            .is_some())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        let mut found: Vec<Subscription> = subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.pack.key());
        Ok(found)
    }

    async fn delete_for_pack(&self, pack: &PackName) -> Result<u64, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|_, s| s.pack != *pack);
        Ok((before - subscriptions.len()) as u64)
    }
}
