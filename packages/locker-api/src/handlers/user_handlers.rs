//! User endpoint handlers.

use hyper::{body::Bytes, Response};

use crate::router::{AppState, RouterError};
use locker_core::UserInput;

use super::request_utils::{
    build_empty_response, build_json_response, decode_json, map_store_error,
};

/// Lists all users with their lockers.
///
/// # Endpoint
/// `GET /users`
///
/// # Response
/// - **200 OK**: JSON array of users in ascending ID order (`[]` when empty)
///
/// # Example
/// ```bash
/// curl http://localhost:8080/users
/// ```
pub async fn list_users(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let users = state.store.list_users().map_err(map_store_error)?;
    build_json_response(200, &users)
}

/// Fetches one user.
///
/// # Endpoint
/// `GET /users/{id}`
///
/// # Errors
/// - **404 Not Found**: No such user (empty body)
pub async fn get_user(id: u64, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let user = state.store.get_user(id).map_err(map_store_error)?;
    build_json_response(200, &user)
}

/// Creates a user.
///
/// # Endpoint
/// `POST /users`
///
/// # Request Body
/// ```json
/// {
///   "email": "a@x.com",
///   "first_name": "A",
///   "last_name": "X",
///   "password": "p"
/// }
/// ```
///
/// # Response
/// - **201 Created**: The stored user, without its password
///
/// # Errors
/// - **400 Bad Request**: Body is not valid JSON for a user
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/users \
///   -H "Content-Type: application/json" \
///   -d '{"email": "a@x.com", "first_name": "A", "last_name": "X", "password": "p"}'
/// ```
pub async fn create_user(body: Bytes, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let input: UserInput = decode_json(&body)?;
    let user = state.store.create_user(input).map_err(map_store_error)?;
    build_json_response(201, &user)
}

/// Replaces a user's fields.
///
/// # Endpoint
/// `PUT /users/{id}`
///
/// # Notes
/// - The ID and owned lockers are kept
/// - Omitting `password` keeps the stored one
///
/// # Errors
/// - **400 Bad Request**: Body is not valid JSON for a user
/// - **404 Not Found**: No such user
pub async fn update_user(
    id: u64,
    body: Bytes,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let input: UserInput = decode_json(&body)?;
    let user = state.store.update_user(id, input).map_err(map_store_error)?;
    build_json_response(200, &user)
}

/// Deletes a user.
///
/// # Endpoint
/// `DELETE /users/{id}`
///
/// # Response
/// - **204 No Content**: User removed; its lockers remain with `user_id: null`
///
/// # Errors
/// - **404 Not Found**: No such user
pub async fn delete_user(id: u64, state: AppState) -> Result<Response<Bytes>, RouterError> {
    state.store.delete_user(id).map_err(map_store_error)?;
    build_empty_response(204)
}
