//! Ownership and edit rights for shared packs.
//!
//! A pack has exactly one owner (its creator) who alone manages the pack,
//! and any number of contributors who may edit its clips alongside the owner.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Trait for resources with one owner and a set of co-editors.
///
/// # Example
///
/// ```ignore
/// impl SharedWithContributors for Pack {
///     fn owner_id(&self) -> UserId { self.creator }
///     fn contributor_ids(&self) -> &[UserId] { &self.contributors }
/// }
///
/// // In a service:
/// pack.check_ownership(requester)?;  // Err(NotAllowed) unless creator
/// ```
pub trait SharedWithContributors {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> UserId;

    /// Returns the users granted edit rights by the owner.
    fn contributor_ids(&self) -> &[UserId];

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Checks if the given user is a contributor (the owner is not one).
    fn is_contributor(&self, user_id: UserId) -> bool {
        self.contributor_ids().contains(&user_id)
    }

    /// Owner or contributor.
    fn can_edit(&self, user_id: UserId) -> bool {
        self.is_owner(user_id) || self.is_contributor(user_id)
    }

    /// Validates ownership, returning a `NotAllowed` error otherwise.
    fn check_ownership(&self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::NotAllowed, "User does not own this pack")
                .with_detail("owner_id", self.owner_id().to_string())
                .with_detail("requested_by", user_id.to_string()))
        }
    }

    /// Validates edit rights, returning a `NotAllowed` error otherwise.
    fn check_edit_permission(&self, user_id: UserId) -> Result<(), DomainError> {
        if self.can_edit(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::NotAllowed, "User cannot edit this pack")
                .with_detail("requested_by", user_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: UserId,
        editors: Vec<UserId>,
    }

    impl SharedWithContributors for TestResource {
        fn owner_id(&self) -> UserId {
            self.owner
        }

        fn contributor_ids(&self) -> &[UserId] {
            &self.editors
        }
    }

    fn resource() -> TestResource {
        TestResource {
            owner: UserId::new(1),
            editors: vec![UserId::new(2)],
        }
    }

    #[test]
    fn owner_can_edit_and_manage() {
        let r = resource();
        assert!(r.can_edit(UserId::new(1)));
        assert!(r.check_ownership(UserId::new(1)).is_ok());
    }

    #[test]
    fn contributor_can_edit_but_not_manage() {
        let r = resource();
        assert!(r.can_edit(UserId::new(2)));
        let err = r.check_ownership(UserId::new(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAllowed);
        assert_eq!(err.details.get("requested_by"), Some(&"2".to_string()));
    }

    #[test]
    fn stranger_has_no_rights() {
        let r = resource();
        assert!(!r.can_edit(UserId::new(3)));
        assert!(r.check_edit_permission(UserId::new(3)).is_err());
    }

    #[test]
    fn owner_is_not_a_contributor() {
        assert!(!resource().is_contributor(UserId::new(1)));
    }
}
