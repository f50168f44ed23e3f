//! Add command implementation.
//!
//! This module implements the `add` command, which inserts one student and
//! enrolls them in the selected courses in a single transaction.

use crate::error::CliError;
use crate::utils::{load_configuration, open_repository, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use roster::{CourseId, EnrollmentRequest, NewStudent};

/// Add a student.
#[derive(Args)]
pub struct AddCommand {
    /// External student identifier (unique)
    #[arg(long, value_name = "ID")]
    pub student_id: String,

    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub dob: NaiveDate,

    /// Email address (unique)
    #[arg(long)]
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Department
    #[arg(long)]
    pub department: String,

    /// Enrollment date (default: today)
    #[arg(long, value_name = "DATE")]
    pub enrollment_date: Option<NaiveDate>,

    /// Course to enroll in (repeatable)
    #[arg(long = "course", value_name = "COURSE_ID")]
    pub courses: Vec<CourseId>,
}

impl AddCommand {
    /// Execute the add command.
    ///
    /// Prints the assigned surrogate id on stdout.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut builder = NewStudent::builder(self.student_id, self.first_name, self.last_name)
            .date_of_birth(self.dob)
            .email(self.email)
            .phone(self.phone)
            .department(self.department);
        if let Some(date) = self.enrollment_date {
            builder = builder.enrollment_date(date);
        }
        let student = builder.build()?;

        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;

        let request = EnrollmentRequest::new(student).with_courses(self.courses);
        let added = repo.add(&request)?;

        println!("{}", added.id);
        if !global.quiet {
            eprintln!(
                "Added {} ({}) with {} enrollment(s)",
                added.full_name(),
                added.student_id,
                request.course_ids.len()
            );
        }

        Ok(())
    }
}
