//! Outcome of a conditional insert.

/// Result of an insert-if-absent write.
///
/// Implementations decide the outcome with a single atomic write (a
/// uniqueness constraint or a lock-scoped check-and-insert), never with a
/// separate read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Record was inserted.
    Inserted,
    /// A record with the same identity already exists; nothing was written.
    AlreadyExists,
}

impl SaveResult {
    pub fn inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}
