//! Console configuration.
//!
//! Sources, later ones winning:
//!
//! ```text
//! built-in defaults
//!   → northwind.toml in the working directory (or the --config file)
//!     → NORTHWIND_* environment variables
//!       → command line flags (applied by main)
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no `--config` is given.
const DEFAULT_CONFIG_FILE: &str = "northwind";

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size (default: 2)
    pub max_connections: u32,

    /// Log every SQL statement sqlx executes
    pub log_sql: bool,

    /// Load the sample Northwind data when the store is empty
    pub seed_if_empty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: default_database_path(),
            max_connections: 2,
            log_sql: false,
            seed_if_empty: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, a TOML file and the environment.
    ///
    /// An explicit `file` must exist; the default `northwind.toml` is optional.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default(
                "database_path",
                defaults.database_path.to_string_lossy().into_owned(),
            )?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("log_sql", defaults.log_sql)?
            .set_default("seed_if_empty", defaults.seed_if_empty)?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config: AppConfig = builder
            .add_source(Environment::with_prefix("NORTHWIND").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("database_path".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }
        Ok(())
    }
}

/// Platform data directory, e.g. `~/.local/share/northwind/northwind.db`
/// on Linux. Falls back to the working directory.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "northwind", "northwind")
        .map(|dirs| dirs.data_dir().join("northwind.db"))
        .unwrap_or_else(|| PathBuf::from("northwind.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
