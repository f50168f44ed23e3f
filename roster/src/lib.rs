#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roster
//!
//! A library for managing student records in a SQLite database.
//!
//! This library provides a pooled connection handle, an idempotent schema
//! initializer with a stored department routine, a transactional student
//! repository, a small course catalog, and backup/restore through the
//! `sqlite3` dump tool.
//!
//! ## Core Types
//!
//! - [`Database`] and [`DatabaseConfig`]: Pooled database access
//! - [`StudentRepository`]: Create, read, search, update and delete students
//! - [`Student`], [`NewStudent`] and [`EnrollmentRequest`]: Student records
//! - [`CourseCatalog`]: Courses and enrollments
//! - [`BackupRunner`]: Dump and load through an external tool
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use roster::database::initializer;
//! use roster::{Database, DatabaseConfig, EnrollmentRequest, NewStudent, StudentRepository};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/roster.db")).unwrap();
//! let report = initializer::initialize(&db);
//! assert!(report.is_complete());
//!
//! let repo = StudentRepository::new(db);
//! let student = NewStudent::builder("STU101", "Rohan", "Rana")
//!     .date_of_birth(NaiveDate::from_ymd_opt(2005, 2, 2).unwrap())
//!     .email("rohan@example.com")
//!     .department("Computer Science")
//!     .build()
//!     .unwrap();
//! repo.add(&EnrollmentRequest::new(student)).unwrap();
//!
//! for student in repo.search("rana").unwrap() {
//!     println!("{}", student.full_name());
//! }
//! ```

pub mod backup;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod repository;
pub mod student;

// Re-export key types at crate root for convenience
pub use backup::{BackupConfig, BackupRunner};
pub use catalog::{Course, CourseCatalog, Enrollment, NewCourse};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig, InitReport};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use repository::StudentRepository;
pub use student::{CourseId, EnrollmentRequest, NewStudent, NewStudentBuilder, Student, StudentId};
