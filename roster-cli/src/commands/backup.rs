//! Backup and restore command implementations.
//!
//! Both commands run the configured dump tool against the database file and
//! block until it exits. There is one backup file; every backup overwrites
//! it.

use crate::error::CliError;
use crate::utils::{backup_config, load_configuration, GlobalOptions};
use clap::Args;
use roster::BackupRunner;
use std::path::PathBuf;

/// Dump the database to the backup file.
#[derive(Args)]
pub struct BackupCommand {
    /// Backup file (overrides configuration)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Dump tool (overrides configuration)
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,
}

impl BackupCommand {
    /// Execute the backup command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let runner = BackupRunner::new(
            config.database_path()?,
            backup_config(&config, self.file, self.tool),
        );

        runner.backup()?;

        if !global.quiet {
            eprintln!("Backup written to {}", runner.config().file.display());
        }
        Ok(())
    }
}

/// Replace the database contents with the backup file.
#[derive(Args)]
pub struct RestoreCommand {
    /// Backup file (overrides configuration)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Load tool (overrides configuration)
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,
}

impl RestoreCommand {
    /// Execute the restore command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let runner = BackupRunner::new(
            config.database_path()?,
            backup_config(&config, self.file, self.tool),
        );

        runner.restore()?;

        if !global.quiet {
            eprintln!("Restored from {}", runner.config().file.display());
        }
        Ok(())
    }
}
