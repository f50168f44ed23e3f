//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and database management.

use crate::error::CliError;
use roster::config::{Config, ConfigBuilder, OutputFormat};
use roster::database::initializer;
use roster::{BackupConfig, Database, StudentRepository};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Database file, overriding every configured source.
    pub database: Option<PathBuf>,

    /// Extra configuration file, above the discovered ones.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    if let Some(ref database) = global.database {
        builder = builder.with_config(Config {
            database: Some(database.clone()),
            ..Config::default()
        });
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the configured database and make sure its schema exists.
///
/// Schema steps that fail are logged by the initializer and do not stop
/// the command; the operation that needs the missing object reports it.
pub fn open_database(config: &Config) -> Result<Database, CliError> {
    let db_config = config.database_config()?;
    log::debug!("Opening database at {}", db_config.path.display());

    let db = Database::open(db_config)?;
    let report = initializer::initialize(&db);
    if !report.is_complete() {
        log::warn!(
            "{} of {} schema steps failed",
            report.failed.len(),
            report.applied.len() + report.failed.len()
        );
    }

    Ok(db)
}

/// Open the configured database wrapped in a student repository.
pub fn open_repository(config: &Config) -> Result<StudentRepository, CliError> {
    open_database(config).map(StudentRepository::new)
}

/// Pick the output format: command flag, then configuration, then table.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.output_format())
}

/// Build the backup configuration, letting command flags override it.
pub fn backup_config(config: &Config, file: Option<PathBuf>, tool: Option<String>) -> BackupConfig {
    let mut backup = config.backup_config();
    if let Some(file) = file {
        backup.file = file;
    }
    if let Some(tool) = tool {
        backup.tool = tool;
    }
    backup
}
