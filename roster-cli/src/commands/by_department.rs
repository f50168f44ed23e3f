//! By-department command implementation.
//!
//! Lists students through the `GetStudentsByDepartment` stored routine.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_repository, output_format, GlobalOptions};
use clap::Args;
use roster::config::OutputFormat;

/// List the students of a department.
#[derive(Args)]
pub struct ByDepartmentCommand {
    /// Department name (exact match)
    pub department: String,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ByDepartmentCommand {
    /// Execute the by-department command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;

        let students = repo.get_by_department(&self.department)?;
        print_records(&students, output_format(self.format, &config))
    }
}
