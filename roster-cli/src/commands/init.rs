//! Init command implementation.
//!
//! This module implements the `init` command, which creates the schema and
//! installs the stored routines, reporting every step.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use roster::database::initializer;
use roster::Database;

/// Create the schema and stored routines.
#[derive(Args)]
pub struct InitCommand {
    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Every step runs even when an earlier one fails; the command fails
    /// with the first step error once all steps have been attempted.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db_config = config.database_config()?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize: {}", db_config.path.display());
            for step in initializer::step_names() {
                println!("  - {step}");
            }
            return Ok(());
        }

        let db = Database::open(db_config)?;
        let report = initializer::initialize(&db);

        if !global.quiet {
            println!("Initialized: {}", db.path().display());
            for step in &report.applied {
                println!("  - {step}");
            }
        }

        for (step, e) in &report.failed {
            eprintln!("  ! {step}: {e}");
        }

        match report.failed.into_iter().next() {
            Some((_, e)) => Err(CliError::from(e)),
            None => Ok(()),
        }
    }
}
