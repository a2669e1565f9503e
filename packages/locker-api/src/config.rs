//! HTTP server configuration.

/// Limits applied while handling a request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum time to wait for a request body, in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
    /// Time open connections get to finish after shutdown starts, in milliseconds
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 5000,  // 5 seconds default
            max_body_bytes: 64 * 1024, // 64 KiB
            shutdown_timeout_ms: 10_000,
        }
    }
}
