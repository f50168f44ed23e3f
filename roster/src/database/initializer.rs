//! Schema initialization.
//!
//! This module creates the tables, trigger, indices and stored routine of a
//! student records database. Every step is idempotent and independently
//! guarded: a failing step is logged and recorded in the [`InitReport`], and
//! initialization moves on to the next one.

use rusqlite::Connection;

use crate::error::Error;

use super::connection::Database;
use super::routines::{self, Routine};
use super::schema::{
    CREATE_COURSES_TABLE, CREATE_ROUTINES_TABLE, CREATE_STUDENTS_DEPARTMENT_INDEX,
    CREATE_STUDENTS_NAME_INDEX, CREATE_STUDENTS_TABLE, CREATE_STUDENTS_UPDATED_AT_TRIGGER,
    CREATE_STUDENT_COURSES_TABLE,
};

/// Name of the step that verifies a connection can be acquired.
pub const OPEN_DATABASE_STEP: &str = "open database";

/// One initialization step.
struct SchemaStep {
    name: &'static str,
    apply: fn(&Connection) -> crate::Result<()>,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        name: "create students table",
        apply: create_students_table,
    },
    SchemaStep {
        name: "create courses table",
        apply: create_courses_table,
    },
    SchemaStep {
        name: "create student_courses table",
        apply: create_student_courses_table,
    },
    SchemaStep {
        name: "create updated_at trigger",
        apply: create_updated_at_trigger,
    },
    SchemaStep {
        name: "create name index",
        apply: create_name_index,
    },
    SchemaStep {
        name: "create department index",
        apply: create_department_index,
    },
    SchemaStep {
        name: "create routines table",
        apply: create_routines_table,
    },
    SchemaStep {
        name: "install GetStudentsByDepartment",
        apply: install_department_routine,
    },
];

fn create_students_table(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_STUDENTS_TABLE)?;
    Ok(())
}

fn create_courses_table(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_COURSES_TABLE)?;
    Ok(())
}

fn create_student_courses_table(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_STUDENT_COURSES_TABLE)?;
    Ok(())
}

fn create_updated_at_trigger(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_STUDENTS_UPDATED_AT_TRIGGER)?;
    Ok(())
}

fn create_name_index(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_STUDENTS_NAME_INDEX)?;
    Ok(())
}

fn create_department_index(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_STUDENTS_DEPARTMENT_INDEX)?;
    Ok(())
}

fn create_routines_table(conn: &Connection) -> crate::Result<()> {
    conn.execute_batch(CREATE_ROUTINES_TABLE)?;
    Ok(())
}

fn install_department_routine(conn: &Connection) -> crate::Result<()> {
    routines::create_or_replace(conn, &Routine::students_by_department())
}

/// Outcome of an initialization run.
#[derive(Debug, Default)]
pub struct InitReport {
    /// Steps that completed, in execution order.
    pub applied: Vec<&'static str>,
    /// Steps that failed, with their errors, in execution order.
    pub failed: Vec<(&'static str, Error)>,
}

impl InitReport {
    /// Returns true if every step succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, step: &'static str, outcome: crate::Result<()>) {
        match outcome {
            Ok(()) => {
                log::debug!("Schema step '{step}' applied");
                self.applied.push(step);
            }
            Err(e) => {
                log::error!("Schema step '{step}' failed: {e}");
                self.failed.push((step, e));
            }
        }
    }
}

/// Initializes the schema of a pooled database.
///
/// The database file itself already exists once [`Database::open`] has
/// succeeded; the first reported step verifies that a connection can be
/// acquired. If it cannot, no further step runs.
///
/// # Examples
///
/// ```no_run
/// use roster::database::{initializer, Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roster.db")).unwrap();
/// let report = initializer::initialize(&db);
/// assert!(report.is_complete());
/// ```
#[must_use]
pub fn initialize(db: &Database) -> InitReport {
    let mut report = InitReport::default();

    let conn = match db.acquire() {
        Ok(conn) => {
            report.record(OPEN_DATABASE_STEP, Ok(()));
            conn
        }
        Err(e) => {
            report.record(OPEN_DATABASE_STEP, Err(e));
            return report;
        }
    };

    run_steps(&conn, &mut report);

    if report.is_complete() {
        log::info!("Database schema initialized at {}", db.path().display());
    }
    report
}

/// Runs every schema step on a single connection.
///
/// Useful for in-memory databases and tests that bypass the pool.
#[must_use]
pub fn initialize_connection(conn: &Connection) -> InitReport {
    let mut report = InitReport::default();
    run_steps(conn, &mut report);
    report
}

fn run_steps(conn: &Connection, report: &mut InitReport) {
    for step in STEPS {
        report.record(step.name, (step.apply)(conn));
    }
}

/// Returns the names of every schema step after the connection check.
#[must_use]
pub fn step_names() -> Vec<&'static str> {
    STEPS.iter().map(|step| step.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConfig;
    use tempfile::tempdir;

    fn object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [kind, name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_initialize_creates_everything() {
        let conn = Connection::open_in_memory().unwrap();
        let report = initialize_connection(&conn);

        assert!(report.is_complete(), "failed: {:?}", report.failed);
        assert_eq!(report.applied, step_names());

        for table in ["students", "courses", "student_courses", "routines"] {
            assert!(object_exists(&conn, "table", table), "missing {table}");
        }
        assert!(object_exists(&conn, "trigger", "trg_students_updated_at"));
        assert!(object_exists(&conn, "index", "idx_students_name"));
        assert!(object_exists(&conn, "index", "idx_students_department"));
        assert!(routines::get_routine(&conn, routines::GET_STUDENTS_BY_DEPARTMENT)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_connection(&conn).is_complete());
        let second = initialize_connection(&conn);
        assert!(second.is_complete());

        let routines: i64 = conn
            .query_row("SELECT COUNT(*) FROM routines", [], |row| row.get(0))
            .unwrap();
        assert_eq!(routines, 1);
    }

    #[test]
    fn test_failed_step_does_not_stop_later_steps() {
        let conn = Connection::open_in_memory().unwrap();
        // A students table without the name columns makes both index steps fail
        conn.execute_batch("CREATE TABLE students (id INTEGER PRIMARY KEY)")
            .unwrap();

        let report = initialize_connection(&conn);
        let failed: Vec<_> = report.failed.iter().map(|(name, _)| *name).collect();
        assert!(failed.contains(&"create name index"));
        assert!(failed.contains(&"create department index"));
        assert!(report.applied.contains(&"create courses table"));

        assert!(report.applied.contains(&"create routines table"));
        assert!(report.applied.contains(&"install GetStudentsByDepartment"));
        assert!(object_exists(&conn, "table", "routines"));
    }

    #[test]
    fn test_initialize_pooled_database() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();

        let report = initialize(&db);
        assert!(report.is_complete());
        assert_eq!(report.applied[0], OPEN_DATABASE_STEP);
        assert_eq!(report.applied.len(), step_names().len() + 1);
    }
}
