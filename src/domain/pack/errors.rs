//! Pack-specific error types.
//!
//! One taxonomy is shared by the pack, subscription and clip services:
//! the four domain failures, plus a pass-through for infrastructure errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors returned by pack, subscription and clip operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// Name does not match `[A-Za-z0-9_-]+`.
    #[error("Invalid pack name: {0:?}")]
    InvalidName(String),

    /// No pack with that name exists.
    #[error("Pack not found: {0}")]
    NotFound(String),

    /// The pack exists but was soft-deleted.
    #[error("Pack has been deleted: {0}")]
    Deleted(String),

    /// Requester lacks the rights for this operation.
    #[error("Not allowed")]
    NotAllowed,

    /// Storage or transport failure, never shown to users verbatim.
    #[error(transparent)]
    Infrastructure(DomainError),
}

impl PackError {
    pub fn invalid_name(raw: impl Into<String>) -> Self {
        PackError::InvalidName(raw.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        PackError::NotFound(name.into())
    }

    pub fn deleted(name: impl Into<String>) -> Self {
        PackError::Deleted(name.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PackError::InvalidName(_) => ErrorCode::InvalidName,
            PackError::NotFound(_) => ErrorCode::PackNotFound,
            PackError::Deleted(_) => ErrorCode::PackDeleted,
            PackError::NotAllowed => ErrorCode::NotAllowed,
            PackError::Infrastructure(e) => e.code,
        }
    }

    /// True for the not-found class (absent or soft-deleted).
    pub fn is_not_found_class(&self) -> bool {
        matches!(self, PackError::NotFound(_) | PackError::Deleted(_))
    }

    /// Splits domain failures from infrastructure failures.
    ///
    /// Call sites that map domain failures to replies use this to
    /// propagate everything else unchanged.
    pub fn into_infrastructure(self) -> Result<PackError, DomainError> {
        match self {
            PackError::Infrastructure(e) => Err(e),
            other => Ok(other),
        }
    }
}

impl From<DomainError> for PackError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::NotAllowed => PackError::NotAllowed,
            _ => PackError::Infrastructure(err),
        }
    }
}

impl From<PackError> for DomainError {
    fn from(err: PackError) -> Self {
        match err {
            PackError::Infrastructure(e) => e,
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
