//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::config::ServerConfig;
use crate::handlers::{self, error_response, read_request_body_with_timeout, BoxError};
use locker_core::Repository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for users and lockers
    pub store: Arc<dyn Repository>,
    /// Request limits
    pub config: Arc<ServerConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the user and locker routes.
    pub fn new(store: Arc<dyn Repository>, config: Arc<ServerConfig>) -> Self {
        let mut router = MatchitRouter::new();

        // User endpoints
        router
            .insert("/users", RouteHandler::Users)
            .expect("Failed to insert /users route");
        router
            .insert("/users/{id}", RouteHandler::User)
            .expect("Failed to insert /users/{id} route");
        router
            .insert("/users/{id}/lockers", RouteHandler::UserLockers)
            .expect("Failed to insert /users/{id}/lockers route");

        // Locker endpoints
        router
            .insert("/lockers", RouteHandler::Lockers)
            .expect("Failed to insert /lockers route");
        router
            .insert("/lockers/{id}", RouteHandler::Locker)
            .expect("Failed to insert /lockers/{id} route");

        Self {
            inner: router,
            state: AppState { store, config },
        }
    }

    /// Returns the limits this router was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// Handler errors are turned into their HTTP responses here, so this
    /// never fails.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body + Send,
        B::Error: Into<BoxError>,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let target = self
            .inner
            .at(&path)
            .map(|matched| (*matched.value, matched.params.get("id").map(str::to_owned)));

        let result = match target {
            Ok((handler, raw_id)) => match parse_id(raw_id.as_deref()) {
                Ok(id) => handler.handle(req, id, self.state.clone()).await,
                Err(err) => Err(err),
            },
            Err(_) => Err(RouterError::NotFound(format!(
                "No route found for {}",
                path
            ))),
        };

        let response = result.unwrap_or_else(Response::from);
        tracing::debug!(
            %method,
            path = %path,
            status = response.status().as_u16(),
            "handled request"
        );
        response
    }
}

/// Parses the `{id}` path segment, if the route has one.
fn parse_id(raw: Option<&str>) -> Result<Option<u64>, RouterError> {
    raw.map(|s| {
        s.parse::<u64>()
            .map_err(|e| RouterError::BadRequest(format!("Invalid ID '{}': {}", s, e)))
    })
    .transpose()
}

/// Route handler function.
#[derive(Debug, Clone, Copy)]
enum RouteHandler {
    Users,
    User,
    UserLockers,
    Lockers,
    Locker,
}

impl RouteHandler {
    /// Handles a request with the parsed route identifier.
    async fn handle<B>(
        self,
        req: Request<B>,
        id: Option<u64>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body + Send,
        B::Error: Into<BoxError>,
    {
        let method = req.method().clone();
        match self {
            RouteHandler::Users => {
                if method == Method::GET {
                    handlers::list_users(state).await
                } else if method == Method::POST {
                    let body = read_body(req, &state).await?;
                    handlers::create_user(body, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::User => {
                let id = require_id(id)?;
                if method == Method::GET {
                    handlers::get_user(id, state).await
                } else if method == Method::PUT {
                    let body = read_body(req, &state).await?;
                    handlers::update_user(id, body, state).await
                } else if method == Method::DELETE {
                    handlers::delete_user(id, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::UserLockers => {
                let user_id = require_id(id)?;
                if method == Method::POST {
                    let body = read_body(req, &state).await?;
                    handlers::create_locker(user_id, body, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Lockers => {
                if method == Method::GET {
                    handlers::list_lockers(state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Locker => {
                let id = require_id(id)?;
                if method == Method::GET {
                    handlers::get_locker(id, state).await
                } else if method == Method::PUT {
                    let body = read_body(req, &state).await?;
                    handlers::update_locker(id, body, state).await
                } else if method == Method::DELETE {
                    handlers::delete_locker(id, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

fn require_id(id: Option<u64>) -> Result<u64, RouterError> {
    id.ok_or_else(|| RouterError::InternalError("Route is missing its ID parameter".to_string()))
}

async fn read_body<B>(req: Request<B>, state: &AppState) -> Result<Bytes, RouterError>
where
    B: Body + Send,
    B::Error: Into<BoxError>,
{
    read_request_body_with_timeout(
        req.into_body(),
        state.config.request_timeout_ms,
        state.config.max_body_bytes,
    )
    .await
}

/// Router error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    /// No route matches the path
    NotFound(String),
    /// The addressed user or locker does not exist
    EntityNotFound,
    PayloadTooLarge,
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::EntityNotFound => write!(f, "Not Found"),
            RouterError::PayloadTooLarge => write!(f, "Payload Too Large"),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(msg) => (500, msg.as_str()),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
            RouterError::PayloadTooLarge => (413, "Payload Too Large"),
            RouterError::EntityNotFound => {
                return Response::builder()
                    .status(404)
                    .body(Bytes::new())
                    .unwrap_or_else(|_| Response::new(Bytes::new()));
            }
        };

        if status >= 500 {
            tracing::error!("Error handling request: {}", err);
        }

        let error_response = error_response(status, message.to_string(), None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\"}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
