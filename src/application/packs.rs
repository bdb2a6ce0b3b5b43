//! PackRepository - pack lifecycle and sharing rules over the pack store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::pack::{Pack, PackError, PackName, SharedWithContributors};
use crate::ports::{ClipStore, PackStore, SubscriptionStore};

/// Attempts at a compare-and-swap update before giving up with `Conflict`.
pub const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Parses a user-supplied pack name.
pub fn parse_pack_name(raw: &str) -> Result<PackName, PackError> {
    PackName::parse(raw).map_err(|_| PackError::invalid_name(raw))
}

/// Looks up a live pack: absent is `NotFound`, soft-deleted is `Deleted`.
pub(crate) async fn resolve_pack(store: &dyn PackStore, raw: &str) -> Result<Pack, PackError> {
    let name = parse_pack_name(raw)?;
    match store.find(&name).await? {
        None => Err(PackError::not_found(name.as_str())),
        Some(pack) if pack.is_deleted() => Err(PackError::deleted(pack.name().as_str())),
        Some(pack) => Ok(pack),
    }
}

/// Pack operations with permission checks.
#[derive(Clone)]
pub struct PackRepository {
    packs: Arc<dyn PackStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    clips: Arc<dyn ClipStore>,
}

impl PackRepository {
    pub fn new(
        packs: Arc<dyn PackStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        clips: Arc<dyn ClipStore>,
    ) -> Self {
        Self {
            packs,
            subscriptions,
            clips,
        }
    }

    /// Creates a pack. Returns `false` if the name is already taken.
    pub async fn create(&self, name: &str, creator: UserId) -> Result<bool, PackError> {
        let name = parse_pack_name(name)?;
        let pack = Pack::new(name, creator);
        let created = self.packs.insert_if_absent(&pack).await?.inserted();
        if created {
            info!(pack = %pack.name(), creator = %creator, "Pack created");
        }
        Ok(created)
    }

    /// Fetches a live pack.
    pub async fn get(&self, name: &str) -> Result<Pack, PackError> {
        resolve_pack(self.packs.as_ref(), name).await
    }

    /// Grants a user edit rights. Creator only.
    ///
    /// Returns `false` if the user already has them (contributor or creator).
    pub async fn add_contributor(
        &self,
        name: &str,
        requester: UserId,
        contributor: UserId,
    ) -> Result<bool, PackError> {
        self.update(name, false, |pack| {
            pack.check_ownership(requester)?;
            let added = pack.add_contributor(contributor);
            Ok((added, added))
        })
        .await
    }

    /// Revokes a contributor's edit rights. Creator only.
    pub async fn remove_contributor(
        &self,
        name: &str,
        requester: UserId,
        contributor: UserId,
    ) -> Result<bool, PackError> {
        self.update(name, false, |pack| {
            pack.check_ownership(requester)?;
            let removed = pack.remove_contributor(contributor);
            Ok((removed, removed))
        })
        .await
    }

    /// Marks the pack deleted. Creator only; repeating it is a no-op.
    pub async fn soft_delete(&self, name: &str, requester: UserId) -> Result<(), PackError> {
        let changed = self
            .update(name, true, |pack| {
                pack.check_ownership(requester)?;
                let changed = pack.soft_delete();
                Ok((changed, changed))
            })
            .await?;
        if changed {
            info!(pack = %name, requester = %requester, "Pack soft-deleted");
        }
        Ok(())
    }

    /// Removes the pack with all its subscriptions and clips. Creator only.
    ///
    /// Allowed on soft-deleted packs. The pack record goes last, so a
    /// failed attempt can simply be repeated.
    pub async fn hard_delete(&self, name: &str, requester: UserId) -> Result<(), PackError> {
        let name = parse_pack_name(name)?;
        let pack = self
            .packs
            .find(&name)
            .await?
            .ok_or_else(|| PackError::not_found(name.as_str()))?;
        pack.check_ownership(requester)?;

        let clips = self.clips.delete_pack(pack.name()).await?;
        let subscriptions = self.subscriptions.delete_for_pack(pack.name()).await?;
        self.packs.delete(pack.name()).await?;

        info!(
            pack = %pack.name(),
            clips,
            subscriptions,
            "Pack hard-deleted"
        );
        Ok(())
    }

    /// Live packs created by the user.
    pub async fn list_created_by(&self, user_id: UserId) -> Result<Vec<Pack>, PackError> {
        let packs = self.packs.list_created_by(user_id).await?;
        Ok(packs.into_iter().filter(|p| !p.is_deleted()).collect())
    }

    /// Live packs the user contributes to.
    pub async fn list_contributed_to(&self, user_id: UserId) -> Result<Vec<Pack>, PackError> {
        let packs = self.packs.list_contributed_to(user_id).await?;
        Ok(packs.into_iter().filter(|p| !p.is_deleted()).collect())
    }

    /// Creator or contributor.
    pub fn has_edit_permission(pack: &Pack, user_id: UserId) -> bool {
        pack.can_edit(user_id)
    }

    /// Read-modify-write with compare-and-swap on the pack version.
    ///
    /// `mutate` returns the operation's result and whether the pack changed;
    /// unchanged packs are not written back.
    async fn update<T, F>(&self, name: &str, include_deleted: bool, mut mutate: F) -> Result<T, PackError>
    where
        F: FnMut(&mut Pack) -> Result<(T, bool), DomainError>,
    {
        let name = parse_pack_name(name)?;

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let mut pack = match self.packs.find(&name).await? {
                None => return Err(PackError::not_found(name.as_str())),
                Some(p) if p.is_deleted() && !include_deleted => {
                    return Err(PackError::deleted(p.name().as_str()))
                }
                Some(p) => p,
            };

            let expected = pack.version();
            let (outcome, changed) = mutate(&mut pack)?;
            if !changed {
                return Ok(outcome);
            }
            if self.packs.update_if_version(&pack.next_version(), expected).await? {
                return Ok(outcome);
            }
            debug!(pack = %name, attempt, "Pack changed concurrently, retrying");
        }

        Err(PackError::Infrastructure(
            DomainError::new(
                ErrorCode::Conflict,
                format!("Pack {} kept changing during update", name),
            )
            .with_detail("attempts", MAX_UPDATE_ATTEMPTS.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryClipStore, InMemoryPackStore, InMemorySubscriptionStore};
    use crate::domain::clip::Clip;
    use crate::domain::foundation::ClipId;
    use crate::domain::subscription::Subscription;
    use crate::ports::SaveResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);
    const CAROL: UserId = UserId::new(3);

    struct Fixture {
        repo: PackRepository,
        subscriptions: Arc<InMemorySubscriptionStore>,
        clips: Arc<InMemoryClipStore>,
    }

    fn fixture() -> Fixture {
        let subscriptions = Arc::new(InMemorySubscriptionStore::new());
        let clips = Arc::new(InMemoryClipStore::new());
        let repo = PackRepository::new(
            Arc::new(InMemoryPackStore::new()),
            subscriptions.clone(),
            clips.clone(),
        );
        Fixture {
            repo,
            subscriptions,
            clips,
        }
    }

    mod create {
        use super::*;

        #[tokio::test]
        async fn creates_once_per_name() {
            let f = fixture();
            assert!(f.repo.create("cats", ALICE).await.unwrap());
            assert!(!f.repo.create("CATS", BOB).await.unwrap());

            let pack = f.repo.get("Cats").await.unwrap();
            assert_eq!(pack.creator(), ALICE);
            assert!(pack.contributors().is_empty());
        }

        #[tokio::test]
        async fn rejects_invalid_name() {
            let f = fixture();
            let err = f.repo.create("bad name", ALICE).await.unwrap_err();
            assert!(matches!(err, PackError::InvalidName(_)));
        }

        #[tokio::test]
        async fn concurrent_creates_produce_one_winner() {
            let f = fixture();
            let mut handles = Vec::new();
            for user in 0..16 {
                let repo = f.repo.clone();
                handles.push(tokio::spawn(async move {
                    repo.create("race", UserId::new(user)).await.unwrap()
                }));
            }
            let mut wins = 0;
            for h in handles {
                if h.await.unwrap() {
                    wins += 1;
                }
            }
            assert_eq!(wins, 1);
        }
    }

    mod get {
        use super::*;

        #[tokio::test]
        async fn missing_pack_is_not_found() {
            let f = fixture();
            assert!(matches!(f.repo.get("cats").await, Err(PackError::NotFound(_))));
        }

        #[tokio::test]
        async fn soft_deleted_pack_is_deleted() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            f.repo.soft_delete("cats", ALICE).await.unwrap();
            assert!(matches!(f.repo.get("cats").await, Err(PackError::Deleted(_))));
        }

        #[tokio::test]
        async fn invalid_name_is_invalid() {
            let f = fixture();
            assert!(matches!(f.repo.get("c@ts").await, Err(PackError::InvalidName(_))));
        }
    }

    mod contributors {
        use super::*;

        #[tokio::test]
        async fn creator_adds_and_removes_contributor() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();

            assert!(f.repo.add_contributor("cats", ALICE, BOB).await.unwrap());
            assert!(!f.repo.add_contributor("cats", ALICE, BOB).await.unwrap());
            let pack = f.repo.get("cats").await.unwrap();
            assert!(PackRepository::has_edit_permission(&pack, BOB));
            assert_eq!(pack.version(), 1);

            assert!(f.repo.remove_contributor("cats", ALICE, BOB).await.unwrap());
            assert!(!f.repo.remove_contributor("cats", ALICE, BOB).await.unwrap());
            let pack = f.repo.get("cats").await.unwrap();
            assert!(!PackRepository::has_edit_permission(&pack, BOB));
        }

        #[tokio::test]
        async fn creator_is_never_a_contributor() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            assert!(!f.repo.add_contributor("cats", ALICE, ALICE).await.unwrap());
            assert!(!f.repo.remove_contributor("cats", ALICE, ALICE).await.unwrap());
            let pack = f.repo.get("cats").await.unwrap();
            assert!(PackRepository::has_edit_permission(&pack, ALICE));
        }

        #[tokio::test]
        async fn only_creator_manages_contributors() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            f.repo.add_contributor("cats", ALICE, BOB).await.unwrap();

            let err = f.repo.add_contributor("cats", BOB, CAROL).await.unwrap_err();
            assert_eq!(err, PackError::NotAllowed);
            let err = f.repo.remove_contributor("cats", CAROL, BOB).await.unwrap_err();
            assert_eq!(err, PackError::NotAllowed);
        }

        #[tokio::test]
        async fn deleted_pack_rejects_contributor_changes() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            f.repo.soft_delete("cats", ALICE).await.unwrap();
            let err = f.repo.add_contributor("cats", ALICE, BOB).await.unwrap_err();
            assert!(matches!(err, PackError::Deleted(_)));
        }
    }

    mod deletion {
        use super::*;

        #[tokio::test]
        async fn soft_delete_requires_creator_and_is_idempotent() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            f.repo.add_contributor("cats", ALICE, BOB).await.unwrap();

            assert_eq!(f.repo.soft_delete("cats", BOB).await.unwrap_err(), PackError::NotAllowed);
            f.repo.soft_delete("cats", ALICE).await.unwrap();
            f.repo.soft_delete("cats", ALICE).await.unwrap();
        }

        #[tokio::test]
        async fn hard_delete_cascades_to_subscriptions_and_clips() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            f.repo.create("dogs", ALICE).await.unwrap();
            let cats = PackName::parse("cats").unwrap();
            let dogs = PackName::parse("dogs").unwrap();
            f.subscriptions
                .insert_if_absent(&Subscription::new(BOB, cats.clone()))
                .await
                .unwrap();
            f.subscriptions
                .insert_if_absent(&Subscription::new(BOB, dogs.clone()))
                .await
                .unwrap();
            f.clips
                .put_if_absent(&Clip::new(cats.clone(), ClipId::new("1").unwrap(), "a"))
                .await
                .unwrap();
            f.clips
                .put_if_absent(&Clip::new(dogs, ClipId::new("1").unwrap(), "a"))
                .await
                .unwrap();

            f.repo.soft_delete("cats", ALICE).await.unwrap();
            f.repo.hard_delete("cats", ALICE).await.unwrap();

            assert!(matches!(f.repo.get("cats").await, Err(PackError::NotFound(_))));
            assert_eq!(f.subscriptions.len().await, 1);
            assert_eq!(f.clips.len().await, 1);
            // The name is free again.
            assert!(f.repo.create("cats", BOB).await.unwrap());
        }

        #[tokio::test]
        async fn hard_delete_requires_creator() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();
            assert_eq!(f.repo.hard_delete("cats", BOB).await.unwrap_err(), PackError::NotAllowed);
            assert!(f.repo.get("cats").await.is_ok());
        }
    }

    mod listing {
        use super::*;

        #[tokio::test]
        async fn lists_exclude_deleted_packs() {
            let f = fixture();
            f.repo.create("a", ALICE).await.unwrap();
            f.repo.create("b", ALICE).await.unwrap();
            f.repo.create("c", BOB).await.unwrap();
            f.repo.add_contributor("c", BOB, ALICE).await.unwrap();
            f.repo.soft_delete("b", ALICE).await.unwrap();

            let created = f.repo.list_created_by(ALICE).await.unwrap();
            assert_eq!(created.len(), 1);
            assert_eq!(created[0].name().as_str(), "a");

            let contributed = f.repo.list_contributed_to(ALICE).await.unwrap();
            assert_eq!(contributed.len(), 1);
            assert_eq!(contributed[0].name().as_str(), "c");
        }
    }

    mod compare_and_swap {
        use super::*;

        /// Pack store whose CAS always loses the race.
        struct ContendedPackStore {
            inner: InMemoryPackStore,
            attempts: AtomicUsize,
        }

        #[async_trait]
        impl PackStore for ContendedPackStore {
            async fn insert_if_absent(&self, pack: &Pack) -> Result<SaveResult, DomainError> {
                self.inner.insert_if_absent(pack).await
            }

            async fn find(&self, name: &PackName) -> Result<Option<Pack>, DomainError> {
                self.inner.find(name).await
            }

            async fn update_if_version(&self, _pack: &Pack, _expected: u64) -> Result<bool, DomainError> {
                self.attempts.fetch_add(1, Ordering::SeqCst);
                Ok(false)
            }

            async fn delete(&self, name: &PackName) -> Result<bool, DomainError> {
                self.inner.delete(name).await
            }

            async fn list_created_by(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
                self.inner.list_created_by(user_id).await
            }

            async fn list_contributed_to(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
                self.inner.list_contributed_to(user_id).await
            }
        }

        #[tokio::test]
        async fn gives_up_with_conflict_after_bounded_attempts() {
            let store = Arc::new(ContendedPackStore {
                inner: InMemoryPackStore::new(),
                attempts: AtomicUsize::new(0),
            });
            let repo = PackRepository::new(
                store.clone(),
                Arc::new(InMemorySubscriptionStore::new()),
                Arc::new(InMemoryClipStore::new()),
            );
            repo.create("cats", ALICE).await.unwrap();

            let err = repo.add_contributor("cats", ALICE, BOB).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::Conflict);
            assert_eq!(store.attempts.load(Ordering::SeqCst), MAX_UPDATE_ATTEMPTS);
        }

        #[tokio::test]
        async fn concurrent_contributor_adds_all_land() {
            let f = fixture();
            f.repo.create("cats", ALICE).await.unwrap();

            let mut handles = Vec::new();
            for user in 10..14 {
                let repo = f.repo.clone();
                handles.push(tokio::spawn(async move {
                    repo.add_contributor("cats", ALICE, UserId::new(user)).await
                }));
            }
            for h in handles {
                assert!(h.await.unwrap().unwrap());
            }
            assert_eq!(f.repo.get("cats").await.unwrap().contributors().len(), 4);
        }
    }
}
