//! Bundle of the application services a conversation step may call.

use std::sync::Arc;

use crate::ports::{ClipStore, PackStore, SubscriptionStore};

use super::{ClipIndex, PackRepository, SubscriptionRepository};

/// Release reported by `/version`.
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct Repositories {
    pub packs: PackRepository,
    pub subscriptions: SubscriptionRepository,
    pub clips: ClipIndex,
    pub version: String,
}

impl Repositories {
    /// Wires the services over one set of stores.
    pub fn new(
        pack_store: Arc<dyn PackStore>,
        subscription_store: Arc<dyn SubscriptionStore>,
        clip_store: Arc<dyn ClipStore>,
    ) -> Self {
        let subscriptions =
            SubscriptionRepository::new(pack_store.clone(), subscription_store.clone());
        Self {
            packs: PackRepository::new(
                pack_store.clone(),
                subscription_store,
                clip_store.clone(),
            ),
            clips: ClipIndex::new(pack_store, subscriptions.clone(), clip_store),
            subscriptions,
            version: BOT_VERSION.to_string(),
        }
    }

    /// In-memory stores, for tests and local development.
    pub fn in_memory() -> Self {
        use crate::adapters::memory::{
            InMemoryClipStore, InMemoryPackStore, InMemorySubscriptionStore,
        };
        Self::new(
            Arc::new(InMemoryPackStore::new()),
            Arc::new(InMemorySubscriptionStore::new()),
            Arc::new(InMemoryClipStore::new()),
        )
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
