//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `ROSTER_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use roster::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads all `ROSTER_*` configuration variables and applies them with
    /// higher precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric pool size or an unknown output format).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // ROSTER_DATABASE
        if let Ok(path) = env::var("ROSTER_DATABASE") {
            config.database = Some(PathBuf::from(path));
        }

        Self::apply_pool_overrides(config)?;
        Self::apply_backup_overrides(config);

        // ROSTER_OUTPUT_FORMAT
        if let Ok(format) = env::var("ROSTER_OUTPUT_FORMAT") {
            config.output_format = Some(OutputFormat::from_str(&format).map_err(|_| {
                Error::Validation {
                    field: "ROSTER_OUTPUT_FORMAT".into(),
                    message: format!("Invalid output format: '{format}'"),
                }
            })?);
        }

        Ok(())
    }

    /// Apply pool-related environment variable overrides.
    fn apply_pool_overrides(config: &mut Config) -> Result<()> {
        let mut pool = config.pool.clone().unwrap_or_default();
        let mut modified = false;

        if let Some(min_idle) = Self::parse_number("ROSTER_POOL_MIN_IDLE")? {
            pool.min_idle = Some(min_idle);
            modified = true;
        }

        if let Some(max_size) = Self::parse_number("ROSTER_POOL_MAX_SIZE")? {
            pool.max_size = Some(max_size);
            modified = true;
        }

        if let Some(capacity) = Self::parse_number("ROSTER_STATEMENT_CACHE")? {
            pool.statement_cache_capacity = Some(capacity);
            modified = true;
        }

        if let Some(seconds) = Self::parse_number("ROSTER_CONNECTION_TIMEOUT_SECONDS")? {
            pool.connection_timeout_seconds = Some(seconds);
            modified = true;
        }

        if let Some(millis) = Self::parse_number("ROSTER_BUSY_TIMEOUT_MS")? {
            pool.busy_timeout_ms = Some(millis);
            modified = true;
        }

        if modified {
            config.pool = Some(pool);
        }

        Ok(())
    }

    /// Apply backup-related environment variable overrides.
    fn apply_backup_overrides(config: &mut Config) {
        let tool = env::var("ROSTER_BACKUP_TOOL").ok();
        let file = env::var("ROSTER_BACKUP_FILE").ok().map(PathBuf::from);

        if tool.is_none() && file.is_none() {
            return;
        }

        let backup = config.backup.get_or_insert_with(Default::default);
        if tool.is_some() {
            backup.tool = tool;
        }
        if file.is_some() {
            backup.file = file;
        }
    }

    /// Parse a non-negative integer variable, if set.
    fn parse_number<T: FromStr>(name: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::Validation {
                    field: name.into(),
                    message: format!("Must be a non-negative integer, got '{value}'"),
                }),
            Err(_) => Ok(None),
        }
    }
}
