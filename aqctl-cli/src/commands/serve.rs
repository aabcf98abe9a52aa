//! HTTP server command for the AQ record API
//!
//! Builds the Postgres pool and runs the server until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use aqctl_server::db::{create_pool_with_options, PgAqStore};
use aqctl_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "AQCTL_BIND", default_value = "0.0.0.0:8085")]
    pub bind: SocketAddr,

    /// Database URL for the AQ table (required)
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    pub database_url: String,

    /// Per-request deadline in seconds
    #[arg(long, env = "AQCTL_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Maximum pooled database connections
    #[arg(long, env = "AQCTL_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(
        bind = %args.bind,
        max_connections = args.max_connections,
        "Starting aqctl server"
    );

    // Connects eagerly: an unreachable database aborts startup
    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .context("Failed to connect to database (DB_URL)")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        request_timeout: Duration::from_secs(args.timeout.max(1)),
    };

    // Run server (blocks until shutdown)
    run_server(Arc::new(PgAqStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
