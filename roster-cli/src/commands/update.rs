//! Update command implementation.
//!
//! This module implements the `update` command. Only the given fields
//! change; the student id and enrollment date are fixed at creation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_repository, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use roster::StudentId;

/// Update a student's details.
#[derive(Args)]
pub struct UpdateCommand {
    /// Surrogate id of the student
    pub id: StudentId,

    /// New given name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New family name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New date of birth (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub dob: Option<NaiveDate>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New phone number
    #[arg(long, conflicts_with = "clear_phone")]
    pub phone: Option<String>,

    /// Remove the phone number
    #[arg(long)]
    pub clear_phone: bool,

    /// New department
    #[arg(long)]
    pub department: Option<String>,
}

impl UpdateCommand {
    fn has_changes(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.dob.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.clear_phone
            || self.department.is_some()
    }

    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.has_changes() {
            return Err(CliError::InvalidArguments(
                "Nothing to update (give at least one field)".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;

        let mut student = repo
            .get_by_id(self.id)?
            .ok_or_else(|| CliError::SemanticFailure(format!("No student with id {}", self.id)))?;

        if let Some(first_name) = self.first_name {
            student.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = self.last_name {
            student.last_name = last_name.trim().to_string();
        }
        if let Some(dob) = self.dob {
            student.date_of_birth = dob;
        }
        if let Some(email) = self.email {
            student.email = email.trim().to_string();
        }
        if self.clear_phone {
            student.phone = None;
        } else if let Some(phone) = self.phone {
            student.phone = Some(phone.trim().to_string());
        }
        if let Some(department) = self.department {
            student.department = department.trim().to_string();
        }

        // The row can vanish between the read and the write
        if !repo.update(&student)? {
            return Err(CliError::SemanticFailure(format!(
                "No student with id {}",
                self.id
            )));
        }

        if !global.quiet {
            eprintln!("Updated student {}", self.id);
        }
        Ok(())
    }
}
