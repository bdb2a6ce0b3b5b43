//! Pack aggregate entity.
//!
//! A pack is a named collection of clips with one creator and zero or more
//! contributors. Clips themselves live in the clip index, keyed by pack.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{PackName, SharedWithContributors};

/// Pack aggregate.
///
/// # Invariants
///
/// - `name` is the identity, compared case-insensitively
/// - `contributors` never contains the creator and has no duplicates
/// - `version` increases by one on every persisted update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    name: PackName,
    creator: UserId,
    contributors: Vec<UserId>,
    deleted: bool,
    created_at: Timestamp,
    version: u64,
}

impl Pack {
    /// Create a new, empty pack owned by `creator`.
    pub fn new(name: PackName, creator: UserId) -> Self {
        Self {
            name,
            creator,
            contributors: Vec::new(),
            deleted: false,
            created_at: Timestamp::now(),
            version: 0,
        }
    }

    /// Reconstitute a pack from persistence (no validation).
    pub fn reconstitute(
        name: PackName,
        creator: UserId,
        contributors: Vec<UserId>,
        deleted: bool,
        created_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            name,
            creator,
            contributors,
            deleted,
            created_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn name(&self) -> &PackName {
        &self.name
    }

    pub fn creator(&self) -> UserId {
        self.creator
    }

    pub fn contributors(&self) -> &[UserId] {
        &self.contributors
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Version this copy was read at; stores compare against it on update.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a contributor. Returns false if already present or the creator.
    pub fn add_contributor(&mut self, user_id: UserId) -> bool {
        if user_id == self.creator || self.contributors.contains(&user_id) {
            return false;
        }
        self.contributors.push(user_id);
        true
    }

    /// Removes a contributor. Returns false if not present.
    ///
    /// The creator is never in the list, so it can never be removed.
    pub fn remove_contributor(&mut self, user_id: UserId) -> bool {
        let before = self.contributors.len();
        self.contributors.retain(|c| *c != user_id);
        self.contributors.len() != before
    }

    /// Marks the pack deleted. Returns false if it already was.
    pub fn soft_delete(&mut self) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        true
    }

    /// Returns the copy a store persists after a successful update.
    pub fn next_version(mut self) -> Self {
        self.version += 1;
        self
    }
}

impl SharedWithContributors for Pack {
    fn owner_id(&self) -> UserId {
        self.creator
    }

    fn contributor_ids(&self) -> &[UserId] {
        &self.contributors
    }
}
