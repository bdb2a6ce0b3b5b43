//! Subscription store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pack::PackName;
use crate::domain::subscription::Subscription;

use super::SaveResult;

/// Persists (user, pack) subscription links.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Insert unless the (user, pack) pair already exists.
    async fn insert_if_absent(&self, subscription: &Subscription)
        -> Result<SaveResult, DomainError>;

    /// Remove the link. Returns `false` if it did not exist.
    async fn delete(&self, subscription: &Subscription) -> Result<bool, DomainError>;

    /// All links of a user, ordered by pack key. Not filtered by pack state.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, DomainError>;

    /// Remove every link to a pack. Returns the number removed.
    async fn delete_for_pack(&self, pack: &PackName) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SubscriptionStore) {}
    }
}
