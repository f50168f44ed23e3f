//! Database configuration and connection parameters.
//!
//! This module provides configuration types for the connection pool,
//! including path resolution and pool sizing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Default number of idle connections the pool keeps open.
pub const DEFAULT_MIN_IDLE: u32 = 5;

/// Default maximum number of concurrent connections.
pub const DEFAULT_MAX_SIZE: u32 = 10;

/// Default number of cached prepared statements per connection.
pub const DEFAULT_STATEMENT_CACHE_CAPACITY: usize = 100;

/// Configuration for the database connection pool.
///
/// # Examples
///
/// ```
/// use roster::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/roster.db")
///     .with_pool_size(1, 4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Number of idle connections the pool tries to keep open.
    pub min_idle: u32,
    /// Maximum number of connections the pool hands out at once.
    pub max_size: u32,
    /// Maximum number of prepared statements cached per connection.
    pub statement_cache_capacity: usize,
    /// How long `acquire` blocks waiting for a free connection.
    pub connection_timeout: Duration,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to create the database file (and its directory) if missing.
    pub auto_create: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `min_idle`: 5
    /// - `max_size`: 10
    /// - `statement_cache_capacity`: 100
    /// - `connection_timeout`: 30s
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            min_idle: DEFAULT_MIN_IDLE,
            max_size: DEFAULT_MAX_SIZE,
            statement_cache_capacity: DEFAULT_STATEMENT_CACHE_CAPACITY,
            connection_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
        }
    }

    /// Sets the idle and maximum pool sizes.
    #[must_use]
    pub fn with_pool_size(mut self, min_idle: u32, max_size: u32) -> Self {
        self.min_idle = min_idle;
        self.max_size = max_size;
        self
    }

    /// Sets the per-connection prepared statement cache capacity.
    #[must_use]
    pub fn with_statement_cache_capacity(mut self, capacity: usize) -> Self {
        self.statement_cache_capacity = capacity;
        self
    }

    /// Sets how long acquiring a connection may block.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long a connection will wait when
    /// encountering a locked database before returning an error.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Requires the database file to exist already.
    #[must_use]
    pub fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Checks pool sizing and timeouts for consistency.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `max_size` is zero, `min_idle` exceeds
    /// `max_size`, or the connection timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::Validation {
                field: "max_size".into(),
                message: "Pool must allow at least one connection".into(),
            });
        }

        if self.min_idle > self.max_size {
            return Err(Error::Validation {
                field: "min_idle".into(),
                message: format!(
                    "min_idle ({}) cannot exceed max_size ({})",
                    self.min_idle, self.max_size
                ),
            });
        }

        if self.connection_timeout.is_zero() {
            return Err(Error::Validation {
                field: "connection_timeout".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }
}

/// Returns the default data directory for roster.
///
/// The default directory is `~/.roster`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".roster"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the data directory using the environment or the default.
///
/// The resolution order is:
/// 1. `$ROSTER_DATA_DIR` if set
/// 2. `~/.roster` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `ROSTER_DATA_DIR` is not set.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var("ROSTER_DATA_DIR") {
        Ok(data_dir) => Ok(PathBuf::from(data_dir)),
        Err(_) => default_data_dir(),
    }
}

/// Resolves the default database path, `<data dir>/roster.db`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join("roster.db"))
}
