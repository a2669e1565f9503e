//! HTTP endpoint implementations for users and lockers.

mod locker_handlers;
mod request_utils;
mod response;
mod user_handlers;

pub use locker_handlers::*;
pub use request_utils::*;
pub use response::*;
pub use user_handlers::*;
