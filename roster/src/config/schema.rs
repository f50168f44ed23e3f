//! Configuration schema definitions.
//!
//! This module defines the configuration structure for roster: the
//! database location, the connection pool, the backup tool and the default
//! output format. Every field is optional so that partial files can be
//! layered on top of each other.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backup::{BackupConfig, DEFAULT_BACKUP_FILE, DEFAULT_BACKUP_TOOL};
use crate::database::{
    resolve_database_path, DatabaseConfig, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE,
    DEFAULT_STATEMENT_CACHE_CAPACITY,
};
use crate::error::{Error, Result};

/// Default time `acquire` waits for a free connection.
pub const DEFAULT_CONNECTION_TIMEOUT_SECONDS: u64 = 30;

/// Default busy timeout for lock contention.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use roster::config::{Config, PoolConfig};
///
/// let config = Config {
///     database: Some("/srv/roster/students.db".into()),
///     pool: Some(PoolConfig {
///         max_size: Some(4),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.database_config().unwrap().max_size, 4);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the database file.
    pub database: Option<PathBuf>,

    /// Connection pool settings.
    pub pool: Option<PoolConfig>,

    /// Backup tool and file.
    pub backup: Option<BackupSettings>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    /// Idle connections kept open.
    pub min_idle: Option<u32>,

    /// Maximum concurrent connections.
    pub max_size: Option<u32>,

    /// Prepared statements cached per connection.
    pub statement_cache_capacity: Option<usize>,

    /// How long acquiring a connection may block (seconds).
    pub connection_timeout_seconds: Option<u64>,

    /// How long a statement waits on a locked database (milliseconds).
    pub busy_timeout_ms: Option<u64>,
}

/// Backup settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackupSettings {
    /// Dump/load program.
    pub tool: Option<String>,

    /// Backup file path.
    pub file: Option<PathBuf>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use roster::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    #[default]
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("Invalid output format: '{s}' (expected table, json, csv or tsv)"),
            }),
        }
    }
}

impl Config {
    /// Returns the configured database path, or `<data dir>/roster.db`.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the data directory
    /// cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => resolve_database_path(),
        }
    }

    /// Builds the connection pool configuration, filling unset fields with
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the database path cannot be resolved.
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let pool = self.pool.clone().unwrap_or_default();
        let max_size = pool.max_size.unwrap_or(DEFAULT_MAX_SIZE);
        // A small pool lowers the default idle count rather than failing
        let min_idle = pool
            .min_idle
            .unwrap_or_else(|| DEFAULT_MIN_IDLE.min(max_size));

        let config = DatabaseConfig::new(self.database_path()?)
            .with_pool_size(min_idle, max_size)
            .with_statement_cache_capacity(
                pool.statement_cache_capacity
                    .unwrap_or(DEFAULT_STATEMENT_CACHE_CAPACITY),
            )
            .with_connection_timeout(Duration::from_secs(
                pool.connection_timeout_seconds
                    .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECONDS),
            ))
            .with_busy_timeout(Duration::from_millis(
                pool.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
            ));

        Ok(config)
    }

    /// Builds the backup configuration, filling unset fields with defaults.
    #[must_use]
    pub fn backup_config(&self) -> BackupConfig {
        let backup = self.backup.clone().unwrap_or_default();
        BackupConfig {
            tool: backup.tool.unwrap_or_else(|| DEFAULT_BACKUP_TOOL.to_string()),
            file: backup
                .file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_FILE)),
        }
    }

    /// Returns the configured output format, or table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}
