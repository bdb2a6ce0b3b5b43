//! SubscriptionRepository - per-user opt-in links to packs.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::UserId;
use crate::domain::pack::PackError;
use crate::domain::subscription::Subscription;
use crate::ports::{PackStore, SubscriptionStore};

use super::packs::parse_pack_name;

#[derive(Clone)]
pub struct SubscriptionRepository {
    packs: Arc<dyn PackStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl SubscriptionRepository {
    pub fn new(packs: Arc<dyn PackStore>, subscriptions: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            packs,
            subscriptions,
        }
    }

    /// Subscribes the user. Returns `false` if already subscribed.
    ///
    /// Absent and soft-deleted packs both fail with `NotFound`.
    pub async fn subscribe(&self, name: &str, user_id: UserId) -> Result<bool, PackError> {
        let name = parse_pack_name(name)?;
        let pack = match self.packs.find(&name).await? {
            Some(pack) if !pack.is_deleted() => pack,
            _ => return Err(PackError::not_found(name.as_str())),
        };

        let subscription = Subscription::new(user_id, pack.name().clone());
        Ok(self.subscriptions.insert_if_absent(&subscription).await?.inserted())
    }

    /// Unsubscribes the user. Returns `false` if they were not subscribed.
    ///
    /// Fails with `NotFound` for an absent pack and `Deleted` for a
    /// soft-deleted one.
    pub async fn unsubscribe(&self, name: &str, user_id: UserId) -> Result<bool, PackError> {
        let name = parse_pack_name(name)?;
        let pack = match self.packs.find(&name).await? {
            None => return Err(PackError::not_found(name.as_str())),
            Some(pack) if pack.is_deleted() => {
                return Err(PackError::deleted(pack.name().as_str()))
            }
            Some(pack) => pack,
        };

        let subscription = Subscription::new(user_id, pack.name().clone());
        Ok(self.subscriptions.delete(&subscription).await?)
    }

    /// The user's subscriptions to packs that still resolve.
    ///
    /// Links to deleted packs are skipped without error. The returned pack
    /// names carry the creator's casing.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, PackError> {
        let links = self.subscriptions.list_for_user(user_id).await?;
        let mut live = Vec::with_capacity(links.len());
        for link in links {
            match self.packs.find(&link.pack).await? {
                Some(pack) if !pack.is_deleted() => {
                    live.push(Subscription::new(user_id, pack.name().clone()));
                }
                _ => debug!(user_id = %user_id, pack = %link.pack, "Skipping stale subscription"),
            }
        }
        Ok(live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryClipStore, InMemoryPackStore, InMemorySubscriptionStore};
    use crate::application::PackRepository;

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);

    fn repos() -> (PackRepository, SubscriptionRepository) {
        let packs = Arc::new(InMemoryPackStore::new());
        let subscriptions = Arc::new(InMemorySubscriptionStore::new());
        (
            PackRepository::new(
                packs.clone(),
                subscriptions.clone(),
                Arc::new(InMemoryClipStore::new()),
            ),
            SubscriptionRepository::new(packs, subscriptions),
        )
    }

    #[tokio::test]
    async fn subscribe_then_unsubscribe_is_idempotent() {
        let (packs, subs) = repos();
        packs.create("cats", ALICE).await.unwrap();

        assert!(subs.subscribe("cats", BOB).await.unwrap());
        assert!(!subs.subscribe("CATS", BOB).await.unwrap());
        assert!(subs.unsubscribe("cats", BOB).await.unwrap());
        assert!(!subs.unsubscribe("cats", BOB).await.unwrap());
    }

    #[tokio::test]
    async fn subscribe_to_missing_or_deleted_pack_is_not_found() {
        let (packs, subs) = repos();
        assert!(matches!(
            subs.subscribe("cats", BOB).await,
            Err(PackError::NotFound(_))
        ));

        packs.create("cats", ALICE).await.unwrap();
        packs.soft_delete("cats", ALICE).await.unwrap();
        let err = subs.subscribe("cats", BOB).await.unwrap_err();
        assert!(err.is_not_found_class());
        assert!(matches!(err, PackError::NotFound(_)));
    }

    #[tokio::test]
    async fn unsubscribe_distinguishes_missing_and_deleted() {
        let (packs, subs) = repos();
        assert!(matches!(
            subs.unsubscribe("cats", BOB).await,
            Err(PackError::NotFound(_))
        ));

        packs.create("cats", ALICE).await.unwrap();
        subs.subscribe("cats", BOB).await.unwrap();
        packs.soft_delete("cats", ALICE).await.unwrap();
        assert!(matches!(
            subs.unsubscribe("cats", BOB).await,
            Err(PackError::Deleted(_))
        ));
    }

    #[tokio::test]
    async fn invalid_name_performs_no_write() {
        let (_packs, subs) = repos();
        assert!(matches!(
            subs.subscribe("no spaces", BOB).await,
            Err(PackError::InvalidName(_))
        ));
        assert!(subs.list_for_user(BOB).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_skips_deleted_packs_and_uses_display_name() {
        let (packs, subs) = repos();
        packs.create("Cats", ALICE).await.unwrap();
        packs.create("dogs", ALICE).await.unwrap();
        subs.subscribe("CATS", BOB).await.unwrap();
        subs.subscribe("dogs", BOB).await.unwrap();

        packs.soft_delete("dogs", ALICE).await.unwrap();

        let listed = subs.list_for_user(BOB).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].pack.as_str(), "Cats");
    }
}
