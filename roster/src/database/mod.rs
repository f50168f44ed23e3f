//! Database layer for persistent storage of student records.
//!
//! This module provides the pooled connection handle, the schema
//! definitions and initializer, and the stored routine registry.
//!
//! # Examples
//!
//! ```no_run
//! use roster::database::{initializer, Database, DatabaseConfig};
//!
//! // Open a pool and make sure the schema exists
//! let db = Database::open(DatabaseConfig::new("/tmp/roster.db")).unwrap();
//! let report = initializer::initialize(&db);
//! for (step, err) in &report.failed {
//!     eprintln!("{step}: {err}");
//! }
//! ```

mod config;
mod connection;
pub mod initializer;
pub mod routines;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DEFAULT_MAX_SIZE,
    DEFAULT_MIN_IDLE, DEFAULT_STATEMENT_CACHE_CAPACITY,
};
pub use connection::{ConnectionPool, Database, PooledConnection, FOLD_CASE_FUNCTION};
pub use initializer::{initialize, InitReport};
