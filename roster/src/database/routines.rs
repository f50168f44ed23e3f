//! Stored routines.
//!
//! SQLite has no stored procedures, so routines live in the `routines`
//! table: a name, a description of its parameters, and a single
//! parameterized `SELECT` using named parameters. A routine is installed
//! with create-or-replace semantics and called by name, and because it is
//! stored in the database it travels with every dump.

use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use crate::error::{Error, Result};

use super::schema::STUDENT_COLUMNS;

/// Name of the department routine.
pub const GET_STUDENTS_BY_DEPARTMENT: &str = "GetStudentsByDepartment";

/// A routine definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    /// Name the routine is called by.
    pub name: String,
    /// Parameter list, for display (e.g. `:dept_name TEXT`).
    pub parameters: String,
    /// The `SELECT` statement run when the routine is called.
    pub body: String,
}

impl Routine {
    /// `GetStudentsByDepartment(:dept_name)`: the students of a department
    /// ordered by last name, then first name.
    #[must_use]
    pub fn students_by_department() -> Self {
        Self {
            name: GET_STUDENTS_BY_DEPARTMENT.to_string(),
            parameters: ":dept_name TEXT".to_string(),
            body: format!(
                "SELECT {STUDENT_COLUMNS} FROM students \
                 WHERE department = :dept_name \
                 ORDER BY last_name, first_name, id"
            ),
        }
    }
}

const UPSERT_ROUTINE: &str = r"
    INSERT OR REPLACE INTO routines (name, parameters, body)
    VALUES (?1, ?2, ?3)
";

const SELECT_ROUTINE: &str = "SELECT name, parameters, body FROM routines WHERE name = ?1";

/// Installs a routine, replacing any routine with the same name.
///
/// # Errors
///
/// Returns an error if the routine table is missing or the write fails.
pub fn create_or_replace(conn: &Connection, routine: &Routine) -> Result<()> {
    conn.execute(
        UPSERT_ROUTINE,
        params![routine.name, routine.parameters, routine.body],
    )?;
    log::debug!("Installed routine {}", routine.name);
    Ok(())
}

/// Looks up an installed routine.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_routine(conn: &Connection, name: &str) -> Result<Option<Routine>> {
    let routine = conn
        .query_row(SELECT_ROUTINE, [name], |row| {
            Ok(Routine {
                name: row.get(0)?,
                parameters: row.get(1)?,
                body: row.get(2)?,
            })
        })
        .optional()?;
    Ok(routine)
}

/// Calls an installed routine and maps every result row.
///
/// Parameters are bound by name, including the leading colon.
///
/// # Errors
///
/// Returns [`Error::RoutineNotFound`] if no routine has that name, or a
/// database error if the body fails to prepare or run.
///
/// # Examples
///
/// ```no_run
/// use roster::database::{routines, Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roster.db")).unwrap();
/// let conn = db.acquire().unwrap();
/// let names: Vec<String> = routines::call_routine(
///     &conn,
///     routines::GET_STUDENTS_BY_DEPARTMENT,
///     &[(":dept_name", &"Physics")],
///     |row| row.get("last_name"),
/// )
/// .unwrap();
/// ```
pub fn call_routine<T, F>(
    conn: &Connection,
    name: &str,
    params: &[(&str, &dyn ToSql)],
    map: F,
) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let routine = get_routine(conn, name)?.ok_or_else(|| Error::RoutineNotFound {
        name: name.to_string(),
    })?;

    let mut stmt = conn.prepare_cached(&routine.body)?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
