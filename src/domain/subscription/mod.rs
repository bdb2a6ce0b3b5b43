//! Subscription module - a user's opt-in link to a pack.
//!
//! Subscriptions scope the default (`-`) search. At most one exists per
//! (user, pack) pair; the pair is the record's identity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::pack::PackName;

/// A user's subscription to a pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: UserId,
    pub pack: PackName,
}

impl Subscription {
    pub fn new(user_id: UserId, pack: PackName) -> Self {
        Self { user_id, pack }
    }

    /// Storage key: `<user>:<PACK KEY>`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.user_id, self.pack.key())
    }
}
