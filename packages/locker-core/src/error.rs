//! Store error types.

use thiserror::Error;

/// Store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// User not found
    #[error("User {id} not found")]
    UserNotFound { id: u64 },

    /// Locker not found
    #[error("Locker {id} not found")]
    LockerNotFound { id: u64 },

    /// Identifier counter cannot advance without wrapping
    #[error("No identifiers left for {collection}")]
    IdsExhausted { collection: &'static str },

    /// Lock poisoned (a writer panicked while holding the store lock)
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Returns true if the error refers to a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::UserNotFound { .. } | StoreError::LockerNotFound { .. }
        )
    }
}
