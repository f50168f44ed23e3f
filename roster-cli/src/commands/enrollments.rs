//! Enrollments command implementation.

use crate::error::CliError;
use crate::output::print_records;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use roster::config::OutputFormat;
use roster::{CourseCatalog, StudentId};

/// List a student's enrollments, ordered by course id.
#[derive(Args)]
pub struct EnrollmentsCommand {
    /// Surrogate id of the student
    pub id: StudentId,

    /// Output format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl EnrollmentsCommand {
    /// Execute the enrollments command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = CourseCatalog::new(open_database(&config)?);

        let enrollments = catalog.enrollments_for(self.id)?;
        print_records(&enrollments, output_format(self.format, &config))
    }
}
