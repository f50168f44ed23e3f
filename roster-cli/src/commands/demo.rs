//! Demo command implementation.
//!
//! This module implements the `demo` command, which walks through the sample
//! workflow: initialize the schema, make sure courses 1 and 2 exist, add
//! student `STU101` enrolled in both, print every student, and take a
//! backup.
//!
//! A failing step is reported on stderr and the walk continues with the next
//! one. Only failing to load configuration or open the database stops it.

use crate::error::CliError;
use crate::utils::{backup_config, load_configuration, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use roster::database::initializer;
use roster::{
    BackupRunner, CourseCatalog, CourseId, Database, EnrollmentRequest, NewCourse, NewStudent,
    StudentRepository,
};

/// Courses the sample student enrolls in.
const DEMO_COURSES: [CourseId; 2] = [1, 2];

/// Run the sample workflow end to end.
#[derive(Args)]
pub struct DemoCommand {
    /// Skip the final backup
    #[arg(long)]
    pub skip_backup: bool,
}

/// Report a failed step and carry on.
fn report<T>(step: &str, result: roster::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("{step} failed: {e}");
            None
        }
    }
}

fn sample_student() -> roster::Result<NewStudent> {
    let dob = NaiveDate::from_ymd_opt(2005, 2, 2).ok_or_else(|| roster::Error::Validation {
        field: "date_of_birth".into(),
        message: "Invalid date".into(),
    })?;

    NewStudent::builder("STU101", "Rohan", "Rana")
        .date_of_birth(dob)
        .email("rohan@example.com")
        .phone(Some("9876543210".to_string()))
        .department("Computer Science")
        .build()
}

/// Registers the sample courses when the catalog is empty.
fn seed_courses(catalog: &CourseCatalog) -> roster::Result<usize> {
    if !catalog.list_courses()?.is_empty() {
        return Ok(0);
    }

    let courses = [
        NewCourse::new("CS101", "Introduction to Programming", 4, "Computer Science"),
        NewCourse::new("CS102", "Data Structures", 4, "Computer Science"),
    ];
    for course in &courses {
        catalog.add_course(course)?;
    }
    Ok(courses.len())
}

impl DemoCommand {
    /// Execute the demo command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = Database::open(config.database_config()?)?;

        let init = initializer::initialize(&db);
        for (step, e) in &init.failed {
            eprintln!("Schema step '{step}' failed: {e}");
        }

        let catalog = CourseCatalog::new(db.clone());
        if let Some(seeded) = report("Registering courses", seed_courses(&catalog)) {
            if seeded > 0 && !global.quiet {
                eprintln!("Registered {seeded} course(s)");
            }
        }

        let repo = StudentRepository::new(db.clone());
        let added = report("Adding student", sample_student().and_then(|student| {
            repo.add(&EnrollmentRequest::new(student).with_courses(DEMO_COURSES))
        }));
        if let Some(student) = added {
            if !global.quiet {
                eprintln!("Student added with id {}", student.id);
            }
        }

        if let Some(students) = report("Listing students", repo.get_all()) {
            for student in students {
                println!("{}", student.full_name());
            }
        }

        if !self.skip_backup {
            let runner =
                BackupRunner::for_database(&db, backup_config(&config, None, None));
            if report("Backup", runner.backup()).is_some() && !global.quiet {
                eprintln!("Backup written to {}", runner.config().file.display());
            }
        }

        Ok(())
    }
}
