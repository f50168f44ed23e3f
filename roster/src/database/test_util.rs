//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{initializer, Database, DatabaseConfig};
use crate::student::NewStudent;

/// Creates a temporary, fully initialized test database that will be
/// cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path).with_pool_size(1, 4);
    let db = Database::open(config).unwrap();

    let report = initializer::initialize(&db);
    assert!(report.is_complete(), "schema failed: {:?}", report.failed);

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a valid new student whose email is derived from the identifier.
///
/// # Panics
///
/// Panics if the student fails validation.
#[must_use]
pub fn create_test_student(student_id: &str, first: &str, last: &str, department: &str) -> NewStudent {
    NewStudent::builder(student_id, first, last)
        .date_of_birth(NaiveDate::from_ymd_opt(2005, 2, 2).unwrap())
        .email(format!("{}@example.com", student_id.to_lowercase()))
        .department(department)
        .build()
        .unwrap()
}
