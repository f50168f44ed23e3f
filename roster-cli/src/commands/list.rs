//! List command implementation.
//!
//! This module implements the `list` command, which displays every student
//! ordered by last name, then first name, in various formats (table, JSON,
//! CSV, TSV).

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_repository, output_format, GlobalOptions};
use clap::Args;
use roster::config::OutputFormat;

/// List all students.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Filter by department (exact match)
    #[arg(long, value_name = "DEPARTMENT")]
    pub filter_department: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let repo = open_repository(&config)?;

        // 3. Query students
        let mut students = repo.get_all()?;

        // 4. Apply filters
        if let Some(ref department) = self.filter_department {
            students.retain(|s| &s.department == department);
        }

        // 5. Format and output to stdout
        print_records(&students, output_format(self.format, &config))
    }
}
