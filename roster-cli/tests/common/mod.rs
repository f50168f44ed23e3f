//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the caller's setup into a test.
const ROSTER_VARS: &[&str] = &[
    "ROSTER_DATABASE",
    "ROSTER_CONFIG",
    "ROSTER_POOL_MIN_IDLE",
    "ROSTER_POOL_MAX_SIZE",
    "ROSTER_STATEMENT_CACHE",
    "ROSTER_CONNECTION_TIMEOUT_SECONDS",
    "ROSTER_BUSY_TIMEOUT_MS",
    "ROSTER_BACKUP_TOOL",
    "ROSTER_BACKUP_FILE",
    "ROSTER_OUTPUT_FORMAT",
    "ROSTER_LOG_MODE",
];

/// Test environment with an isolated database and data directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory used as the working directory
/// - A data directory for the user configuration
/// - A database path inside the temporary directory
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the roster data directory
    pub data_dir: PathBuf,
    /// Path to the database file
    pub database: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The database file is not created yet; the first command creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("roster-data");
        let database = temp_path.join("students.db");

        Self {
            temp_dir,
            temp_path,
            data_dir,
            database,
        }
    }

    /// Get a command builder without the `--database` flag.
    ///
    /// The command still runs inside the temporary directory with a private
    /// data directory, so no user or project configuration leaks in.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roster").expect("Failed to find roster binary");
        for var in ROSTER_VARS {
            cmd.env_remove(var);
        }
        cmd.env("ROSTER_DATA_DIR", &self.data_dir);
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with the database pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--database").arg(&self.database);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run roster");

        assert!(
            output.status.success(),
            "roster {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Register a course and return its id.
    pub fn add_course(&self, code: &str, name: &str) -> i64 {
        self.run(&[
            "add-course",
            "--code",
            code,
            "--name",
            name,
            "--department",
            "Computer Science",
        ])
        .trim()
        .parse()
        .expect("Output is not a course id")
    }

    /// Add a student with minimal arguments and return the surrogate id.
    ///
    /// The email is derived from the student id.
    pub fn add_student(&self, student_id: &str, first: &str, last: &str, department: &str) -> i64 {
        let email = format!("{}@example.com", student_id.to_lowercase());
        self.run(&[
            "add",
            "--student-id",
            student_id,
            "--first-name",
            first,
            "--last-name",
            last,
            "--dob",
            "2005-02-02",
            "--email",
            &email,
            "--department",
            department,
        ])
        .trim()
        .parse()
        .expect("Output is not a student id")
    }

    /// List all students as JSON.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let stdout = self.run(&["list", "--format", "json"]);
        serde_json::from_str(&stdout).expect("list did not print JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if the `sqlite3` shell is installed.
#[allow(dead_code)]
pub fn sqlite3_available() -> bool {
    roster::backup::tool_available("sqlite3")
}
