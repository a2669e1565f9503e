//! HTTP server for users and their lockers.
//!
//! Wires the in-memory store into the REST API with command-line
//! configuration, logging, and Ctrl+C shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use locker_api::{config::ServerConfig, router::Router, server::Server};
use locker_core::{config::StoreConfig, MemoryStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the locker server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Request body timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = 64 * 1024)]
    max_body_bytes: usize,

    /// Time open connections get to finish on shutdown, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    shutdown_timeout_ms: u64,

    /// First identifier assigned to a created user
    #[arg(long, default_value_t = 0)]
    initial_user_id: u64,

    /// First identifier assigned to a created locker
    #[arg(long, default_value_t = 0)]
    initial_locker_id: u64,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            initial_user_id: self.initial_user_id,
            initial_locker_id: self.initial_locker_id,
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            request_timeout_ms: self.request_timeout_ms,
            max_body_bytes: self.max_body_bytes,
            shutdown_timeout_ms: self.shutdown_timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(MemoryStore::with_config(&args.store_config()));
    let router = Router::new(store, Arc::new(args.server_config()));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Starting locker server...");
    tracing::info!("  Address: {}", server.local_addr()?);
    tracing::info!("  Request timeout: {} ms", args.request_timeout_ms);
    tracing::info!("  Max body size: {} bytes", args.max_body_bytes);
    tracing::info!("  Shutdown timeout: {} ms", args.shutdown_timeout_ms);
    tracing::info!(
        "  Initial IDs: user={} locker={}",
        args.initial_user_id,
        args.initial_locker_id
    );

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutting down server..."),
            Err(err) => {
                // Without a signal handler the server runs until killed.
                tracing::error!("Failed to listen for ctrl_c: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };
    server
        .serve_with_shutdown(shutdown)
        .await
        .context("Server error")?;

    Ok(())
}
