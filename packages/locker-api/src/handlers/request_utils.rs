//! Request utilities for HTTP endpoints.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time;

use crate::router::RouterError;
use locker_core::StoreError;

/// Boxed error produced by request bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Helper function to read request body with timeout and size limit
pub async fn read_request_body_with_timeout<B>(
    body: B,
    timeout_ms: u64,
    max_bytes: usize,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let collected = time::timeout(timeout_duration, Limited::new(body, max_bytes).collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                RouterError::PayloadTooLarge
            } else {
                RouterError::InternalError(format!("Failed to read request body: {}", e))
            }
        })?;
    Ok(collected.to_bytes())
}

/// Decodes a JSON request body, reporting the decoder message on failure.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, RouterError> {
    serde_json::from_slice(body).map_err(|e| RouterError::BadRequest(e.to_string()))
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error(e: StoreError) -> RouterError {
    match e {
        StoreError::UserNotFound { .. } | StoreError::LockerNotFound { .. } => {
            RouterError::EntityNotFound
        }
        StoreError::IdsExhausted { .. } | StoreError::LockPoisoned => {
            RouterError::InternalError(format!("Store error: {}", e))
        }
    }
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Serializes `value` and wraps it in a JSON response
pub fn build_json_response<T: Serialize>(
    status: u16,
    value: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(value)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}
