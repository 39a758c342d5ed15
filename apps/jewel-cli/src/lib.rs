//! # Jewel Billing CLI Library
//!
//! Commands, state and output formatting for the `jewel` binary.
//!
//! ## Module Organization
//! ```text
//! jewel_cli/
//! ├── lib.rs          ◄─── You are here (logging setup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── Configuration state (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── sale.rs     ◄─── create_sale, list_sales
//! │   ├── invoice.rs  ◄─── get_invoice_document, get_invoice_text, save_invoice
//! │   └── status.rs   ◄─── get_status
//! ├── pdf.rs          ◄─── PDF invoice layout and drawing
//! ├── printable.rs    ◄─── Fixed-width invoice and sales table
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod pdf;
pub mod printable;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::ApiError;
use state::{default_config_path, ConfigState, DbState};

/// Runs one CLI invocation.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. (init only) Write default config file if missing                   │
/// │  2. Load configuration: file → JEWEL_* env → --db                      │
/// │  3. Open database, create file if missing, run pending migrations      │
/// │  4. Run the command, print its result to stdout                        │
/// │  5. Close the pool                                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    if let Commands::Init = cli.command {
        if let Some(path) = cli.config.clone().or_else(default_config_path) {
            if ConfigState::write_default(&path)? {
                println!("✓ Wrote config file {}", path.display());
            }
        }
    }

    let mut config = ConfigState::load(cli.config.as_deref())?;
    if let Some(path) = cli.db {
        config = config.with_database_path(path);
    }

    let db = DbState::open(&config.database_path()).await?;
    let result = dispatch(cli.command, &db, &config).await;
    db.inner().close().await;
    result
}

async fn dispatch(command: Commands, db: &DbState, config: &ConfigState) -> Result<(), ApiError> {
    match command {
        Commands::Init => {
            let status = commands::status::get_status(db, config).await?;
            println!(
                "✓ Database ready at {} ({}/{} migrations applied)",
                status.database_path, status.migrations_applied, status.migrations_total
            );
        }

        Commands::Create(args) => {
            let response = commands::sale::create_sale(db, config, args.into()).await?;
            println!(
                "✓ Sale {} saved, total {}",
                response.sale_id,
                response.total_amount.round_to_paise()
            );
        }

        Commands::List { json } => {
            let rows = commands::sale::list_sales(db).await?;
            if json {
                println!("{}", to_json(&rows)?);
            } else {
                print!("{}", printable::render_sales_table(&rows));
            }
        }

        Commands::Invoice { id, out } => match out {
            Some(dir) => {
                let file = commands::invoice::get_invoice_document(db, config, id).await?;
                let path = commands::invoice::save_invoice(&file, &dir)?;
                println!("✓ Invoice written to {}", path.display());
            }
            None => print!("{}", commands::invoice::get_invoice_text(db, config, id).await?),
        },

        Commands::Status => {
            let status = commands::status::get_status(db, config).await?;
            println!("{}", to_json(&status)?);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=jewel=trace` - Show trace for jewel crates only
/// - Default: INFO, DEBUG for jewel crates, WARN for sqlx
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jewel=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Logging initialized");
}
