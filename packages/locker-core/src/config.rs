//! Store configuration.

/// Store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// First identifier handed out to a created user
    pub initial_user_id: u64,
    /// First identifier handed out to a created locker
    pub initial_locker_id: u64,
}
