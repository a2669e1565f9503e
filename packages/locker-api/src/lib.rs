//! REST API server for the locker service.
//!
//! Provides HTTP endpoints for user and locker CRUD, request routing,
//! and the hyper connection loop.

pub mod config;
pub mod handlers;
pub mod router;
pub mod server;
