//! Error types for the roster library.
//!
//! This module provides the error hierarchy for all operations in the
//! roster library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use std::process::ExitStatus;

use rusqlite::ffi;
use thiserror::Error;

/// Result type alias for operations that may fail with a roster error.
///
/// # Examples
///
/// ```
/// use roster::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the roster library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The connection pool could not be built or a connection could not be
    /// acquired before the pool timeout elapsed.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path could not be read or used.
    #[error("invalid path {}: {reason}", .path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path is unusable.
        reason: String,
    },

    /// A write violated a uniqueness constraint.
    #[error("duplicate value for '{field}'")]
    Duplicate {
        /// The column whose unique constraint was violated.
        field: String,
    },

    /// A write referenced a row that does not exist.
    #[error("foreign key violation: {details}")]
    ForeignKey {
        /// Details reported by the database.
        details: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A stored routine was called that has not been installed.
    #[error("stored routine '{name}' is not installed")]
    RoutineNotFound {
        /// The routine name.
        name: String,
    },

    /// An external dump or load tool exited unsuccessfully.
    #[error("{tool} exited with {status}{}{}", if .stderr.is_empty() { "" } else { ": " }, .stderr)]
    ToolFailed {
        /// The program that was run.
        tool: String,
        /// The exit status of the process.
        status: ExitStatus,
        /// Trimmed standard error output of the process.
        stderr: String,
    },
}

impl Error {
    /// Classifies a `rusqlite` error, turning constraint violations into
    /// [`Error::Duplicate`] and [`Error::ForeignKey`].
    ///
    /// Any other error is wrapped as [`Error::Database`].
    #[must_use]
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::Duplicate {
                        field: message
                            .as_deref()
                            .map_or_else(|| "unknown".to_string(), constraint_column),
                    };
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return Self::ForeignKey {
                        details: message
                            .clone()
                            .unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string()),
                    };
                }
                _ => {}
            }
        }
        Self::Database(err)
    }

    /// Returns true if this error is a uniqueness violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::Error;
    ///
    /// let err = Error::Duplicate { field: "email".into() };
    /// assert!(err.is_duplicate());
    /// ```
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if this error is a constraint violation of any kind.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::ForeignKey { .. })
    }
}

/// Extracts the column name from a SQLite constraint message such as
/// `UNIQUE constraint failed: students.email`.
///
/// Composite keys report every column; they are kept comma-joined.
fn constraint_column(message: &str) -> String {
    let columns = message
        .rsplit_once(": ")
        .map_or(message, |(_, columns)| columns);

    columns
        .split(", ")
        .map(|qualified| {
            qualified
                .rsplit_once('.')
                .map_or(qualified, |(_, column)| column)
        })
        .collect::<Vec<_>>()
        .join(",")
}
