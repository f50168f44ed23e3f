//! Add-course command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use roster::{CourseCatalog, NewCourse};

/// Register a course.
#[derive(Args)]
pub struct AddCourseCommand {
    /// Unique course code, e.g. CS101
    #[arg(long)]
    pub code: String,

    /// Course name
    #[arg(long)]
    pub name: String,

    /// Credit points
    #[arg(long, default_value_t = 3)]
    pub credits: u32,

    /// Department offering the course
    #[arg(long)]
    pub department: String,
}

impl AddCourseCommand {
    /// Execute the add-course command.
    ///
    /// Prints the assigned course id on stdout.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = CourseCatalog::new(open_database(&config)?);

        let course = catalog.add_course(&NewCourse::new(
            self.code,
            self.name,
            self.credits,
            self.department,
        ))?;

        println!("{}", course.id);
        if !global.quiet {
            eprintln!("Registered {} ({})", course.course_code, course.course_name);
        }
        Ok(())
    }
}
