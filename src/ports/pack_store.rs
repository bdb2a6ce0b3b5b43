//! Pack store port.
//!
//! Persists [`Pack`] aggregates keyed by their canonical name key. Deleted
//! packs stay in the store; filtering them is the caller's concern.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pack::{Pack, PackName};

use super::SaveResult;

#[async_trait]
pub trait PackStore: Send + Sync {
    /// Insert the pack unless one with the same name key exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert_if_absent(&self, pack: &Pack) -> Result<SaveResult, DomainError>;

    /// Find a pack by name, including soft-deleted packs.
    async fn find(&self, name: &PackName) -> Result<Option<Pack>, DomainError>;

    /// Compare-and-swap update.
    ///
    /// Replaces the stored pack only if its version still equals
    /// `expected_version`; `pack` carries the new version. Returns `false`
    /// when the stored version moved on or the pack is gone.
    async fn update_if_version(
        &self,
        pack: &Pack,
        expected_version: u64,
    ) -> Result<bool, DomainError>;

    /// Remove the pack record. Returns `false` if it did not exist.
    async fn delete(&self, name: &PackName) -> Result<bool, DomainError>;

    /// Packs created by the user, ordered by name key.
    async fn list_created_by(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError>;

    /// Packs the user is a contributor to, ordered by name key.
    async fn list_contributed_to(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError>;
}
