//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddCommand, AddCourseCommand, BackupCommand, ByDepartmentCommand, CompletionsCommand,
    CoursesCommand, DeleteCommand, DemoCommand, EnrollmentsCommand, GetCommand, ImportCommand,
    InitCommand, ListCommand, RestoreCommand, SearchCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing student records.
#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about = "Manage student records", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Database file to use
    #[arg(long, value_name = "PATH", global = true, env = "ROSTER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Additional configuration file
    #[arg(long, value_name = "PATH", global = true, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the schema and stored routines
    Init(InitCommand),

    /// Add a student, optionally enrolled in courses
    Add(AddCommand),

    /// Show one student by id
    Get(GetCommand),

    /// List all students
    List(ListCommand),

    /// Search students by keyword
    Search(SearchCommand),

    /// Update a student's details
    Update(UpdateCommand),

    /// Delete a student and their enrollments
    Delete(DeleteCommand),

    /// Add students in bulk from a CSV file
    Import(ImportCommand),

    /// List the students of a department
    ByDepartment(ByDepartmentCommand),

    /// Register a course
    AddCourse(AddCourseCommand),

    /// List registered courses
    Courses(CoursesCommand),

    /// List a student's enrollments
    Enrollments(EnrollmentsCommand),

    /// Dump the database to the backup file
    Backup(BackupCommand),

    /// Replace the database with the backup file
    Restore(RestoreCommand),

    /// Run the sample workflow end to end
    Demo(DemoCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
