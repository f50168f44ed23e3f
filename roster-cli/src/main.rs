//! Main entry point for the roster CLI.
//!
//! This is the command-line interface for the student records store.
//! It provides commands for managing students:
//! - `init`: Create the schema and stored routines
//! - `add`, `get`, `list`, `search`, `update`, `delete`: Student records
//! - `import`: Batch-add students from CSV
//! - `backup`, `restore`: Dump and load the whole database
//! - `demo`: Run the sample workflow

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments; usage errors share the invalid-arguments exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 3 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Install the stderr logger based on verbosity
    roster::init_logger(cli.verbose, cli.quiet).install();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        database: cli.database,
        config: cli.config,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Add(cmd) => cmd.execute(&global),
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Search(cmd) => cmd.execute(&global),
        cli::Command::Update(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Import(cmd) => cmd.execute(&global),
        cli::Command::ByDepartment(cmd) => cmd.execute(&global),
        cli::Command::AddCourse(cmd) => cmd.execute(&global),
        cli::Command::Courses(cmd) => cmd.execute(&global),
        cli::Command::Enrollments(cmd) => cmd.execute(&global),
        cli::Command::Backup(cmd) => cmd.execute(&global),
        cli::Command::Restore(cmd) => cmd.execute(&global),
        cli::Command::Demo(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
