//! Import command implementation.
//!
//! This module implements the `import` command, which reads students from a
//! CSV file and inserts them with one all-or-nothing batch.
//!
//! The file needs a header row. Recognized columns are `student_id`,
//! `first_name`, `last_name`, `date_of_birth`, `email`, `phone`,
//! `department` and `enrollment_date`; `phone` and `enrollment_date` may be
//! empty or missing.

use crate::error::CliError;
use crate::utils::{load_configuration, open_repository, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use roster::NewStudent;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

/// Add students in bulk from a CSV file.
#[derive(Args)]
pub struct ImportCommand {
    /// CSV file with a header row
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

/// One CSV row.
#[derive(Debug, Deserialize)]
struct StudentRow {
    student_id: String,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    department: String,
    #[serde(default)]
    enrollment_date: Option<NaiveDate>,
}

impl StudentRow {
    fn into_new_student(self) -> roster::Result<NewStudent> {
        let mut builder = NewStudent::builder(self.student_id, self.first_name, self.last_name)
            .date_of_birth(self.date_of_birth)
            .email(self.email)
            .phone(self.phone.filter(|p| !p.trim().is_empty()))
            .department(self.department);
        if let Some(date) = self.enrollment_date {
            builder = builder.enrollment_date(date);
        }
        builder.build()
    }
}

/// Parse every row of a CSV document into new students.
///
/// Fails on the first malformed or invalid row, naming its line.
fn parse_students<R: Read>(reader: R, delimiter: u8) -> Result<Vec<NewStudent>, CliError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut students = Vec::new();
    for (index, row) in csv_reader.deserialize::<StudentRow>().enumerate() {
        let row = row?;
        // Line 1 is the header
        let student = row.into_new_student().map_err(|e| {
            CliError::InvalidArguments(format!("line {}: {e}", index + 2))
        })?;
        students.push(student);
    }

    Ok(students)
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let delimiter = u8::try_from(self.delimiter).map_err(|_| {
            CliError::InvalidArguments(format!(
                "Delimiter must be a single-byte character, got '{}'",
                self.delimiter
            ))
        })?;

        let file = std::fs::File::open(&self.file)?;
        let students = parse_students(file, delimiter)?;

        let config = load_configuration(global)?;
        let repo = open_repository(&config)?;
        let inserted = repo.add_batch(&students)?;

        println!("{inserted}");
        if !global.quiet {
            eprintln!("Imported {inserted} student(s) from {}", self.file.display());
        }
        Ok(())
    }
}
