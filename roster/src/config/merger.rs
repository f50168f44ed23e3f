//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources.
//! Nested sections are merged field by field.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BackupSettings, Config, PoolConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use roster::config::{Config, ConfigMerger};
///
/// let low = Config { database: Some("low.db".into()), ..Default::default() };
/// let high = Config { database: Some("high.db".into()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.database, Some("high.db".into()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            log::debug!("Merging configuration from {}", source.path.display());
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Pool and backup sections: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.database.is_some() {
            target.database.clone_from(&source.database);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_pool) = source.pool {
            target.pool = Some(match &target.pool {
                Some(target_pool) => Self::merge_pool(target_pool, source_pool),
                None => source_pool.clone(),
            });
        }

        if let Some(ref source_backup) = source.backup {
            target.backup = Some(match &target.backup {
                Some(target_backup) => Self::merge_backup(target_backup, source_backup),
                None => source_backup.clone(),
            });
        }
    }

    fn merge_pool(target: &PoolConfig, source: &PoolConfig) -> PoolConfig {
        PoolConfig {
            min_idle: source.min_idle.or(target.min_idle),
            max_size: source.max_size.or(target.max_size),
            statement_cache_capacity: source
                .statement_cache_capacity
                .or(target.statement_cache_capacity),
            connection_timeout_seconds: source
                .connection_timeout_seconds
                .or(target.connection_timeout_seconds),
            busy_timeout_ms: source.busy_timeout_ms.or(target.busy_timeout_ms),
        }
    }

    fn merge_backup(target: &BackupSettings, source: &BackupSettings) -> BackupSettings {
        BackupSettings {
            tool: source.tool.clone().or_else(|| target.tool.clone()),
            file: source.file.clone().or_else(|| target.file.clone()),
        }
    }
}
