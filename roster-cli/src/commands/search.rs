//! Search command implementation.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_repository, output_format, GlobalOptions};
use clap::Args;
use roster::config::OutputFormat;

/// Search students by keyword.
///
/// Matches the first name, last name, student id, email and department,
/// ignoring case. The keyword is taken literally.
#[derive(Args)]
pub struct SearchCommand {
    /// Keyword to look for
    pub keyword: String,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;

        let students = repo.search(&self.keyword)?;
        print_records(&students, output_format(self.format, &config))
    }
}
