//! # Northwind Console
//!
//! Interactive menu over the Northwind categories and products.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Startup                                      │
//! │                                                                         │
//! │  1. Parse flags (clap)                                                 │
//! │  2. Load AppConfig: defaults → northwind.toml → NORTHWIND_* → flags     │
//! │  3. Initialize tracing (stderr, RUST_LOG or built-in filter)           │
//! │  4. Open the database (pool + migrations)                              │
//! │  5. Seed sample data if asked and the store is empty                   │
//! │  6. Run the menu on stdin/stdout until 0, q or end of input            │
//! │  7. Close the pool                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! northwind --db ./northwind.db --seed
//! northwind --json --log-sql
//! RUST_LOG=debug northwind
//! ```

mod commands;
mod config;
mod error;
mod prompt;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use northwind_db::seed::seed_sample_data;
use northwind_db::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{OutputFormat, Shell};
use config::AppConfig;
use prompt::Prompter;

/// Default log filter when RUST_LOG is unset.
const DEFAULT_LOG_FILTER: &str = "info,northwind=debug,sqlx=warn";

#[derive(Parser, Debug)]
#[command(name = "northwind")]
#[command(version)]
#[command(about = "Query and edit the Northwind categories and products")]
struct Cli {
    /// Database file (overrides config and NORTHWIND_DATABASE_PATH)
    #[arg(short, long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Configuration file (default: ./northwind.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every SQL statement to stderr
    #[arg(long)]
    log_sql: bool,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Load the sample Northwind data if the database is empty
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    config.log_sql |= cli.log_sql;
    config.seed_if_empty |= cli.seed;

    init_tracing(config.log_sql)?;

    info!(
        path = %config.database_path.display(),
        max_connections = config.max_connections,
        "Starting Northwind console"
    );

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let db_config =
        DbConfig::new(&config.database_path).max_connections(config.max_connections);
    let db = Database::new(db_config)
        .await
        .context("opening the database")?;

    if config.seed_if_empty {
        let summary = seed_sample_data(&db).await.context("seeding sample data")?;
        info!(
            categories = summary.categories,
            products = summary.products,
            "Seed finished"
        );
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let mut shell = Shell::new(db.clone(), prompter, format);
    let outcome = shell.run().await;

    db.close().await;
    outcome.context("running the shell")?;

    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=northwind_db=trace` - Trace the database layer
/// - `--log-sql` - Adds `sqlx::query=debug` (every statement)
fn init_tracing(log_sql: bool) -> anyhow::Result<()> {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if log_sql {
        filter = filter.add_directive("sqlx::query=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    Ok(())
}
