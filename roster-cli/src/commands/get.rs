//! Get command implementation.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_repository, output_format, GlobalOptions};
use clap::Args;
use roster::config::OutputFormat;
use roster::StudentId;

/// Show one student by surrogate id.
#[derive(Args)]
pub struct GetCommand {
    /// Surrogate id of the student
    pub id: StudentId,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl GetCommand {
    /// Execute the get command.
    ///
    /// A missing student is a semantic failure (exit code 1).
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;

        let student = repo
            .get_by_id(self.id)?
            .ok_or_else(|| CliError::SemanticFailure(format!("No student with id {}", self.id)))?;

        print_records(&[student], output_format(self.format, &config))
    }
}
