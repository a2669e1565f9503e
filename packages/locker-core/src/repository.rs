//! Storage contract shared by every user/locker backend.

use crate::error::StoreError;
use crate::model::{Locker, LockerInput, User, UserInput};

/// Add/get/update/delete operations over users and lockers.
///
/// Implementations must make locker creation and deletion observable in the
/// owning user's locker list as one logical step: a reader never sees a
/// locker in the canonical collection that its owner does not list, or the
/// reverse.
pub trait Repository: Send + Sync {
    /// Creates a user with the next identifier and no lockers.
    fn create_user(&self, input: UserInput) -> Result<User, StoreError>;

    /// Fetches one user with its lockers.
    fn get_user(&self, id: u64) -> Result<User, StoreError>;

    /// Lists all users in ascending identifier order.
    fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Replaces a user's fields, keeping its identifier and lockers.
    fn update_user(&self, id: u64, input: UserInput) -> Result<User, StoreError>;

    /// Removes a user. Its lockers stay in the store with no owner.
    fn delete_user(&self, id: u64) -> Result<(), StoreError>;

    /// Creates a locker owned by `user_id`.
    fn create_locker(&self, user_id: u64, input: LockerInput) -> Result<Locker, StoreError>;

    /// Fetches one locker.
    fn get_locker(&self, id: u64) -> Result<Locker, StoreError>;

    /// Lists all lockers in ascending identifier order.
    fn list_lockers(&self) -> Result<Vec<Locker>, StoreError>;

    /// Replaces a locker's number and status, keeping its identifier and owner.
    fn update_locker(&self, id: u64, input: LockerInput) -> Result<Locker, StoreError>;

    /// Removes a locker from the store and from its owner's list.
    fn delete_locker(&self, id: u64) -> Result<(), StoreError>;
}
