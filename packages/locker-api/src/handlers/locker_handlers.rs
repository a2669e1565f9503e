//! Locker endpoint handlers.

use hyper::{body::Bytes, Response};

use crate::router::{AppState, RouterError};
use locker_core::LockerInput;

use super::request_utils::{
    build_empty_response, build_json_response, decode_json, map_store_error,
};

/// Lists all lockers.
///
/// # Endpoint
/// `GET /lockers`
pub async fn list_lockers(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let lockers = state.store.list_lockers().map_err(map_store_error)?;
    build_json_response(200, &lockers)
}

/// Fetches one locker.
///
/// # Endpoint
/// `GET /lockers/{id}`
pub async fn get_locker(id: u64, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let locker = state.store.get_locker(id).map_err(map_store_error)?;
    build_json_response(200, &locker)
}

/// Creates a locker owned by a user.
///
/// # Endpoint
/// `POST /users/{user_id}/lockers`
///
/// # Request Body
/// ```json
/// {
///   "number": "12A",
///   "status": "available"
/// }
/// ```
///
/// # Response
/// - **201 Created**: The stored locker with its assigned `id` and `user_id`
///
/// # Errors
/// - **404 Not Found**: No such user; checked before the body is decoded
/// - **400 Bad Request**: Body is not valid JSON for a locker
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/users/0/lockers \
///   -H "Content-Type: application/json" \
///   -d '{"number": "12A", "status": "available"}'
/// ```
pub async fn create_locker(
    user_id: u64,
    body: Bytes,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    state.store.get_user(user_id).map_err(map_store_error)?;

    let input: LockerInput = decode_json(&body)?;
    let locker = state
        .store
        .create_locker(user_id, input)
        .map_err(map_store_error)?;
    build_json_response(201, &locker)
}

/// Replaces a locker's number and status.
///
/// # Endpoint
/// `PUT /lockers/{id}`
///
/// # Notes
/// - `id` and `user_id` in the body are ignored
pub async fn update_locker(
    id: u64,
    body: Bytes,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let input: LockerInput = decode_json(&body)?;
    let locker = state
        .store
        .update_locker(id, input)
        .map_err(map_store_error)?;
    build_json_response(200, &locker)
}

/// Deletes a locker.
///
/// # Endpoint
/// `DELETE /lockers/{id}`
///
/// # Response
/// - **204 No Content**: Locker removed from the store and its owner
pub async fn delete_locker(id: u64, state: AppState) -> Result<Response<Bytes>, RouterError> {
    state.store.delete_locker(id).map_err(map_store_error)?;
    build_empty_response(204)
}
