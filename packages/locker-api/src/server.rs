//! Hyper server setup and request handling.

use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming as IncomingBody};
use hyper::{Request, Response};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time;

use crate::router::Router;

/// Pause after an accept error that is not tied to a single connection,
/// e.g. running out of file descriptors.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// HTTP server for the locker API.
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

impl Server {
    /// Binds a listener for the server.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (port 0 picks a free port)
    /// * `router` - Request router
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, io::Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            router: Arc::new(router),
        })
    }

    /// Returns the address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr, io::Error> {
        self.listener.local_addr()
    }

    /// Accepts connections forever.
    pub async fn serve(self) -> Result<(), io::Error> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Accepts connections until `signal` completes, then drains.
    ///
    /// Once the signal fires the listener is closed and every open connection
    /// finishes its in-flight request before closing. Connections still open
    /// after `shutdown_timeout_ms` are aborted.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), io::Error>
    where
        F: Future<Output = ()> + Send,
    {
        let Server { listener, router } = self;
        let drain_timeout = Duration::from_millis(router.config().shutdown_timeout_ms);
        tracing::info!("Server listening on http://{}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(signal);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(err) if is_connection_error(&err) => continue,
                    Err(err) => {
                        tracing::warn!("Failed to accept connection: {}", err);
                        time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        continue;
                    }
                },
                _ = &mut signal => break,
            };

            // Reap finished connections so the set does not grow unbounded.
            while connections.try_join_next().is_some() {}

            let io = TokioIo::new(stream);
            let router = Arc::clone(&router);
            let mut shutdown_rx = shutdown_rx.clone();

            connections.spawn(async move {
                let builder = ConnectionBuilder::new(TokioExecutor::new());
                let conn = builder.serve_connection(
                    io,
                    hyper::service::service_fn(move |req| handle_request(req, router.clone())),
                );
                tokio::pin!(conn);

                let result = tokio::select! {
                    result = conn.as_mut() => result,
                    _ = shutdown_rx.changed() => {
                        conn.as_mut().graceful_shutdown();
                        conn.as_mut().await
                    }
                };
                if let Err(err) = result {
                    tracing::warn!(%peer, "Error serving connection: {}", err);
                }
            });
        }

        drop(listener);
        // Receivers live in the connection tasks and in `shutdown_rx`, so this cannot fail.
        let _ = shutdown_tx.send(true);
        tracing::info!(open_connections = connections.len(), "Draining connections");

        let drained = time::timeout(drain_timeout, async {
            while connections.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            tracing::warn!(
                open_connections = connections.len(),
                "Shutdown timeout elapsed, aborting connections"
            );
            connections.shutdown().await;
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Returns true for accept errors that only affect the connection being accepted.
fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

/// Handles an incoming HTTP request.
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(router.route(req).await.map(Full::new))
}
