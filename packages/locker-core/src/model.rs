//! User and locker models.
//!
//! `User` and `Locker` are the shapes returned to API callers.
//! `UserInput` and `LockerInput` are the decoded request bodies; fields
//! missing from a body decode as empty strings and unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// A locker as stored in the canonical locker collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locker {
    /// Locker identifier
    pub id: u64,
    /// Display label, e.g. "12A" (not unique)
    pub number: String,
    /// Free-form status, e.g. "available" or "in-use"
    pub status: String,
    /// Owning user, `None` once the owner has been deleted
    pub user_id: Option<u64>,
}

/// A user together with the lockers it currently owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// User identifier
    pub id: u64,
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Password, accepted on input but never serialized
    #[serde(skip_serializing)]
    pub password: String,
    /// Owned lockers in creation order
    pub lockers: Vec<Locker>,
}

/// Request body for creating or replacing a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// On update, `None` keeps the stored password
    pub password: Option<String>,
}

/// Request body for creating or replacing a locker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LockerInput {
    pub number: String,
    pub status: String,
}
