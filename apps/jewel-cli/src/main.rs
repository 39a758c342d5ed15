//! # Jewel Billing Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments
//! 3. Hand off to [`jewel_cli::run`]

use clap::Parser;
use jewel_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jewel_cli::init_tracing();

    let cli = Cli::parse();
    jewel_cli::run(cli).await?;

    Ok(())
}
