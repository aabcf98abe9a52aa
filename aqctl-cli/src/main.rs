//! aqctl CLI - AQ sample record service
//!
//! Entry point for the `aqctl` binary. `aqctl serve` runs the HTTP API over
//! the `mgl.aq` table; configuration comes from flags, the environment, or
//! a `.env` file in the working directory.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "aqctl",
    author,
    version,
    about = "CRUD HTTP service for AQ sample tracking records",
    long_about = "Serve list/get/create/update/delete endpoints over the mgl.aq table, \
                  with JSON or MessagePack bodies."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; flags and the real environment still apply
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
