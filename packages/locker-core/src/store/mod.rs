//! In-memory store holding users, lockers, and identifier counters.
//!
//! Lockers live in one canonical collection. Each user record keeps only
//! the ordered identifiers of the lockers it owns, and the `lockers` list of
//! a returned [`User`] is rebuilt from the canonical records on every read.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::model::{Locker, LockerInput, User, UserInput};
use crate::repository::Repository;


/// Stored user fields plus the owner index.
#[derive(Debug, Clone)]
struct UserRecord {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    /// Identifiers of owned lockers in creation order
    locker_ids: Vec<u64>,
}

/// Everything guarded by the store lock.
#[derive(Debug)]
struct Tables {
    users: BTreeMap<u64, UserRecord>,
    lockers: BTreeMap<u64, Locker>,
    next_user_id: u64,
    next_locker_id: u64,
}

impl Tables {
    fn user_view(&self, id: u64, record: &UserRecord) -> User {
        let lockers = record
            .locker_ids
            .iter()
            .filter_map(|locker_id| self.lockers.get(locker_id).cloned())
            .collect();
        User {
            id,
            email: record.email.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            password: record.password.clone(),
            lockers,
        }
    }
}

/// Process-local store guarded by a single mutex.
///
/// Every operation takes the lock for its whole read-or-write and releases it
/// before returning; callers serialize the returned snapshot outside the lock.
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store with default counters.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Creates an empty store whose counters start at the configured values.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            tables: Mutex::new(Tables {
                users: BTreeMap::new(),
                lockers: BTreeMap::new(),
                next_user_id: config.initial_user_id,
                next_locker_id: config.initial_locker_id,
            }),
        }
    }

    /// Returns the number of stored users.
    pub fn user_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.users.len())
    }

    /// Returns the number of stored lockers.
    pub fn locker_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.lockers.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MemoryStore {
    fn create_user(&self, input: UserInput) -> Result<User, StoreError> {
        let mut tables = self.lock()?;
        let id = tables.next_user_id;
        tables.next_user_id = id.checked_add(1).ok_or(StoreError::IdsExhausted {
            collection: "users",
        })?;

        let record = UserRecord {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password: input.password.unwrap_or_default(),
            locker_ids: Vec::new(),
        };
        let user = tables.user_view(id, &record);
        tables.users.insert(id, record);

        tracing::debug!(user_id = id, "created user");
        Ok(user)
    }

    fn get_user(&self, id: u64) -> Result<User, StoreError> {
        let tables = self.lock()?;
        let record = tables
            .users
            .get(&id)
            .ok_or(StoreError::UserNotFound { id })?;
        Ok(tables.user_view(id, record))
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .map(|(id, record)| tables.user_view(*id, record))
            .collect())
    }

    fn update_user(&self, id: u64, input: UserInput) -> Result<User, StoreError> {
        let mut tables = self.lock()?;
        let record = tables
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound { id })?;

        record.email = input.email;
        record.first_name = input.first_name;
        record.last_name = input.last_name;
        if let Some(password) = input.password {
            record.password = password;
        }
        let record = record.clone();

        tracing::debug!(user_id = id, "updated user");
        Ok(tables.user_view(id, &record))
    }

    fn delete_user(&self, id: u64) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let record = tables
            .users
            .remove(&id)
            .ok_or(StoreError::UserNotFound { id })?;

        // Owned lockers survive with no owner.
        for locker_id in &record.locker_ids {
            if let Some(locker) = tables.lockers.get_mut(locker_id) {
                locker.user_id = None;
            }
        }

        tracing::debug!(
            user_id = id,
            detached_lockers = record.locker_ids.len(),
            "deleted user"
        );
        Ok(())
    }

    fn create_locker(&self, user_id: u64, input: LockerInput) -> Result<Locker, StoreError> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound { id: user_id });
        }

        let id = tables.next_locker_id;
        tables.next_locker_id = id.checked_add(1).ok_or(StoreError::IdsExhausted {
            collection: "lockers",
        })?;

        let locker = Locker {
            id,
            number: input.number,
            status: input.status,
            user_id: Some(user_id),
        };
        tables.lockers.insert(id, locker.clone());
        if let Some(owner) = tables.users.get_mut(&user_id) {
            owner.locker_ids.push(id);
        }

        tracing::debug!(locker_id = id, user_id, "created locker");
        Ok(locker)
    }

    fn get_locker(&self, id: u64) -> Result<Locker, StoreError> {
        let tables = self.lock()?;
        tables
            .lockers
            .get(&id)
            .cloned()
            .ok_or(StoreError::LockerNotFound { id })
    }

    fn list_lockers(&self) -> Result<Vec<Locker>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.lockers.values().cloned().collect())
    }

    fn update_locker(&self, id: u64, input: LockerInput) -> Result<Locker, StoreError> {
        let mut tables = self.lock()?;
        let locker = tables
            .lockers
            .get_mut(&id)
            .ok_or(StoreError::LockerNotFound { id })?;

        locker.number = input.number;
        locker.status = input.status;

        tracing::debug!(locker_id = id, "updated locker");
        Ok(locker.clone())
    }

    fn delete_locker(&self, id: u64) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let locker = tables
            .lockers
            .remove(&id)
            .ok_or(StoreError::LockerNotFound { id })?;

        if let Some(owner) = locker.user_id.and_then(|uid| tables.users.get_mut(&uid)) {
            if let Some(pos) = owner.locker_ids.iter().position(|lid| *lid == id) {
                owner.locker_ids.remove(pos);
            }
        }

        tracing::debug!(locker_id = id, "deleted locker");
        Ok(())
    }
}
