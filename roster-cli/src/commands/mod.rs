//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the schema and stored routines
//! - `add`: Add a student with optional enrollments
//! - `get`: Show one student
//! - `list`: List all students
//! - `search`: Search students by keyword
//! - `update`: Update a student's details
//! - `delete`: Delete a student
//! - `import`: Batch-add students from CSV
//! - `by_department`: Students of a department, via the stored routine
//! - `add_course`, `courses`, `enrollments`: Course catalog
//! - `backup`: Backup and restore through the dump tool
//! - `demo`: The sample workflow
//! - `completions`: Shell completion scripts

pub mod add;
pub mod add_course;
pub mod backup;
pub mod by_department;
pub mod completions;
pub mod courses;
pub mod delete;
pub mod demo;
pub mod enrollments;
pub mod get;
pub mod import;
pub mod init;
pub mod list;
pub mod search;
pub mod update;

pub use add::AddCommand;
pub use add_course::AddCourseCommand;
pub use backup::{BackupCommand, RestoreCommand};
pub use by_department::ByDepartmentCommand;
pub use completions::CompletionsCommand;
pub use courses::CoursesCommand;
pub use delete::DeleteCommand;
pub use demo::DemoCommand;
pub use enrollments::EnrollmentsCommand;
pub use get::GetCommand;
pub use import::ImportCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use search::SearchCommand;
pub use update::UpdateCommand;
