//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_repository, GlobalOptions};
use clap::Args;
use roster::StudentId;

/// Delete a student and, by cascade, their enrollments.
#[derive(Args)]
pub struct DeleteCommand {
    /// Surrogate id of the student
    pub id: StudentId,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;

        if !repo.delete(self.id)? {
            return Err(CliError::SemanticFailure(format!(
                "No student with id {}",
                self.id
            )));
        }

        if !global.quiet {
            eprintln!("Deleted student {}", self.id);
        }
        Ok(())
    }
}
