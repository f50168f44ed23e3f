//! Database connection management.
//!
//! This module provides the pooled database handle. Every connection the
//! pool opens gets the same PRAGMA setup, so foreign keys (and therefore
//! cascading deletes) are enforced regardless of which connection a caller
//! receives.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// SQL function lowering text with Unicode case rules.
///
/// The built-in `lower()` and `LIKE` only fold ASCII letters.
pub const FOLD_CASE_FUNCTION: &str = "fold_case";

/// The connection pool type backing a [`Database`].
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// A connection checked out of the pool.
///
/// Dropping it returns the connection to the pool.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// A pooled handle to one database.
///
/// Cloning is cheap and every clone shares the same pool, so a single
/// `Database` can be handed to the repository, the catalog and the
/// initializer alike. The pool lives as long as its last clone.
///
/// # Examples
///
/// ```no_run
/// use roster::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roster.db")).unwrap();
/// let conn = db.acquire().unwrap();
/// let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
/// assert_eq!(one, 1);
/// ```
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a pool of connections with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory and file if `auto_create` is enabled
    /// - Build the pool, opening `min_idle` connections up front
    /// - Apply foreign keys, WAL mode, busy timeout and the statement cache
    ///   size to every connection the pool opens
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is inconsistent
    /// - The database file is missing and `auto_create` is disabled
    /// - The parent directory cannot be created
    /// - The pool cannot establish its connections
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        config.validate()?;

        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::NotFound {
                    resource: format!("database file {}", config.path.display()),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let busy_timeout = config.busy_timeout;
        let cache_capacity = config.statement_cache_capacity;
        let manager = SqliteConnectionManager::file(&config.path)
            .with_flags(flags)
            .with_init(move |conn| configure_connection(conn, busy_timeout, cache_capacity));

        let pool = r2d2::Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(config.min_idle))
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                log::error!(
                    "Connection pool for {} could not be established: {e}",
                    config.path.display()
                );
                Error::from(e)
            })?;

        log::info!(
            "Connection pool initialized for {} (max {} connections)",
            config.path.display(),
            config.max_size
        );

        Ok(Self { pool, config })
    }

    /// Checks a connection out of the pool.
    ///
    /// Blocks until a connection is free or the configured connection
    /// timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pool`] if no connection became available in time.
    pub fn acquire(&self) -> Result<PooledConnection> {
        self.pool.get().map_err(|e| {
            log::warn!("Could not acquire a database connection: {e}");
            Error::from(e)
        })
    }

    /// Returns the path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Returns the configuration this pool was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns `(open connections, idle connections)` of the pool.
    #[must_use]
    pub fn pool_state(&self) -> (u32, u32) {
        let state = self.pool.state();
        (state.connections, state.idle_connections)
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Per-connection setup run by the pool for every new connection.
fn configure_connection(
    conn: &mut Connection,
    busy_timeout: Duration,
    cache_capacity: usize,
) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update(None, "foreign_keys", true)?;

    // PRAGMA journal_mode returns a row, so it needs query_row
    let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.execute_batch("PRAGMA synchronous = NORMAL")?;

    conn.set_prepared_statement_cache_capacity(cache_capacity);
    register_fold_case(conn)
}

fn register_fold_case(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_CASE_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_applies_pragmas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let conn = db.acquire().unwrap();
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_fold_case_lowers_unicode() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
        let conn = db.acquire().unwrap();

        let folded: String = conn
            .query_row("SELECT fold_case('ÉMILE Öztürk')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "émile öztürk");

        let null: Option<String> = conn
            .query_row("SELECT fold_case(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("test.db");

        assert!(!path.parent().unwrap().exists());
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_without_auto_create_requires_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let err = Database::open(DatabaseConfig::new(&path).without_auto_create()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_database_rejects_invalid_pool_config() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("test.db")).with_pool_size(3, 1);
        assert!(matches!(
            Database::open(config),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_acquire_times_out_when_pool_exhausted() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("test.db"))
            .with_pool_size(0, 1)
            .with_connection_timeout(Duration::from_millis(200));
        let db = Database::open(config).unwrap();

        let held = db.acquire().unwrap();
        let err = db.acquire().unwrap_err();
        assert!(matches!(err, Error::Pool(_)));

        drop(held);
        db.acquire().unwrap();
    }

    #[test]
    fn test_clones_share_the_pool() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("test.db")).with_pool_size(1, 2);
        let db = Database::open(config).unwrap();
        let clone = db.clone();

        let _a = db.acquire().unwrap();
        let _b = clone.acquire().unwrap();
        let (connections, idle) = db.pool_state();
        assert_eq!(connections, 2);
        assert_eq!(idle, 0);
        assert_eq!(clone.path(), db.path());
    }
}
