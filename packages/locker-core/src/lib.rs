//! Core storage for the locker service.
//!
//! Provides the user and locker models, the repository contract,
//! and the in-memory store that backs the HTTP API.

pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;

pub use error::StoreError;
pub use model::{Locker, LockerInput, User, UserInput};
pub use repository::Repository;
pub use store::MemoryStore;
