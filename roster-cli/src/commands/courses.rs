//! Courses command implementation.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use roster::config::OutputFormat;
use roster::CourseCatalog;

/// List registered courses, ordered by course code.
#[derive(Args)]
pub struct CoursesCommand {
    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl CoursesCommand {
    /// Execute the courses command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = CourseCatalog::new(open_database(&config)?);

        let courses = catalog.list_courses()?;
        print_records(&courses, output_format(self.format, &config))
    }
}
