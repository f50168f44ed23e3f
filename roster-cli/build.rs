//! Build script for roster-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("roster")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage student records")
        .long_about(
            "Command-line tool for managing student records, enrollments and backups \
             in a SQLite database",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("database")
                .long("database")
                .help("Database file to use")
                .value_name("PATH")
                .global(true)
                .env("ROSTER_DATABASE"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file")
                .value_name("PATH")
                .global(true)
                .env("ROSTER_CONFIG"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Create the schema and stored routines")
                .long_about("Create tables, indexes, trigger and stored routines, reporting each step"),
            Command::new("add")
                .about("Add a student, optionally enrolled in courses")
                .long_about("Insert a student and their enrollments in one transaction"),
            Command::new("get").about("Show one student by id"),
            Command::new("list")
                .about("List all students")
                .long_about("List every student ordered by last name, then first name"),
            Command::new("search")
                .about("Search students by keyword")
                .long_about(
                    "Case-insensitive substring search over names, student id, email and department",
                ),
            Command::new("update").about("Update a student's details"),
            Command::new("delete").about("Delete a student and their enrollments"),
            Command::new("import")
                .about("Add students in bulk from a CSV file")
                .long_about("Insert every row of a CSV file in one all-or-nothing batch"),
            Command::new("by-department")
                .about("List the students of a department")
                .long_about("Call the GetStudentsByDepartment stored routine"),
            Command::new("add-course").about("Register a course"),
            Command::new("courses").about("List registered courses"),
            Command::new("enrollments").about("List a student's enrollments"),
            Command::new("backup")
                .about("Dump the database to the backup file")
                .long_about("Run the dump tool and write its output to the backup file"),
            Command::new("restore")
                .about("Replace the database with the backup file")
                .long_about("Drop the managed schema and replay the backup file through the dump tool"),
            Command::new("demo")
                .about("Run the sample workflow end to end")
                .long_about("Initialize, enroll a sample student, list students and take a backup"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("roster.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
