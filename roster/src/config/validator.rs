//! Configuration validation.
//!
//! This module checks merged configuration for values that would make the
//! connection pool or the backup runner unusable.

use crate::config::schema::{BackupSettings, Config, PoolConfig};
use crate::database::{DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE};
use crate::error::{Error, Result};

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use roster::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref database) = config.database {
            if database.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "database".into(),
                    message: "Cannot be empty".into(),
                });
            }
        }

        if let Some(ref pool) = config.pool {
            Self::validate_pool(pool)?;
        }

        if let Some(ref backup) = config.backup {
            Self::validate_backup(backup)?;
        }

        Ok(())
    }

    /// Validate pool sizing and timeouts.
    ///
    /// Unset sizes are checked against the defaults they will take, so
    /// `min_idle: 20` alone is rejected.
    fn validate_pool(pool: &PoolConfig) -> Result<()> {
        let max_size = pool.max_size.unwrap_or(DEFAULT_MAX_SIZE);
        let min_idle = pool
            .min_idle
            .unwrap_or_else(|| DEFAULT_MIN_IDLE.min(max_size));

        if max_size == 0 {
            return Err(Error::Validation {
                field: "pool.max_size".into(),
                message: "Pool must allow at least one connection".into(),
            });
        }

        if min_idle > max_size {
            return Err(Error::Validation {
                field: "pool.min_idle".into(),
                message: format!("min_idle ({min_idle}) cannot exceed max_size ({max_size})"),
            });
        }

        if pool.connection_timeout_seconds == Some(0) {
            return Err(Error::Validation {
                field: "pool.connection_timeout_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if pool.busy_timeout_ms == Some(0) {
            return Err(Error::Validation {
                field: "pool.busy_timeout_ms".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Validate the backup tool and file.
    fn validate_backup(backup: &BackupSettings) -> Result<()> {
        if let Some(ref tool) = backup.tool {
            if tool.trim().is_empty() {
                return Err(Error::Validation {
                    field: "backup.tool".into(),
                    message: "Cannot be empty or only whitespace".into(),
                });
            }
        }

        if let Some(ref file) = backup.file {
            if file.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "backup.file".into(),
                    message: "Cannot be empty".into(),
                });
            }
        }

        Ok(())
    }
}
