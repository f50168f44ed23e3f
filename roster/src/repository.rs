//! Student repository.
//!
//! [`StudentRepository`] is the data-access layer for student records. It
//! checks connections out of a [`Database`] pool for each call and
//! coordinates the transactional writes spanning `students` and
//! `student_courses`.
//!
//! Every operation returns a [`Result`]: a missing row is `Ok(None)` or
//! `Ok(false)`, never an error. Failures are logged at `warn` level with the
//! operation name before they are returned.

use chrono::Local;
use rusqlite::{named_params, params, OptionalExtension, Row, TransactionBehavior};

use crate::database::routines::{self, GET_STUDENTS_BY_DEPARTMENT};
use crate::database::schema::{INSERT_ENROLLMENT, INSERT_STUDENT, STUDENT_COLUMNS};
use crate::database::{Database, FOLD_CASE_FUNCTION};
use crate::error::{Error, Result};
use crate::student::{EnrollmentRequest, NewStudent, Student, StudentId};

const SELECT_STUDENT_BY_ID: &str = "WHERE id = ?1";

const ORDER_BY_NAME: &str = "ORDER BY last_name, first_name, id";

/// Searched columns; each is folded with [`FOLD_CASE_FUNCTION`] before
/// matching the lowered pattern.
const SEARCH_COLUMNS: [&str; 5] = ["first_name", "last_name", "student_id", "email", "department"];

const UPDATE_STUDENT: &str = r"
    UPDATE students
    SET first_name = ?1, last_name = ?2, date_of_birth = ?3,
        email = ?4, phone = ?5, department = ?6
    WHERE id = ?7
";

const DELETE_STUDENT: &str = "DELETE FROM students WHERE id = ?1";

const COUNT_STUDENTS: &str = "SELECT COUNT(*) FROM students";

/// Data-access object for student records.
///
/// Cloning is cheap; clones share the underlying pool.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use roster::database::{initializer, Database, DatabaseConfig};
/// use roster::{EnrollmentRequest, NewStudent, StudentRepository};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roster.db")).unwrap();
/// let _ = initializer::initialize(&db);
/// let repo = StudentRepository::new(db);
///
/// let student = NewStudent::builder("STU101", "Rohan", "Rana")
///     .date_of_birth(NaiveDate::from_ymd_opt(2005, 2, 2).unwrap())
///     .email("rohan@example.com")
///     .department("Computer Science")
///     .build()
///     .unwrap();
/// let stored = repo.add(&EnrollmentRequest::new(student)).unwrap();
/// assert!(stored.id > 0);
/// ```
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: Database,
}

impl StudentRepository {
    /// Creates a repository over a pooled database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the database this repository reads and writes.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Inserts a student and its course enrollments atomically.
    ///
    /// The student row and one enrollment row per selected course are
    /// written in one immediate transaction; every enrollment is dated
    /// today. On any failure nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::Validation`] if the student is invalid
    /// - [`Error::Duplicate`] if the external id or email is taken
    /// - [`Error::ForeignKey`] if a course id does not exist
    /// - [`Error::Database`] or [`Error::Pool`] for other failures
    pub fn add(&self, request: &EnrollmentRequest) -> Result<Student> {
        self.try_add(request)
            .map_err(|e| warn_failure("add student", e))
    }

    fn try_add(&self, request: &EnrollmentRequest) -> Result<Student> {
        let student = &request.student;
        student.validate()?;

        let mut conn = self.db.acquire()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let inserted = insert_student(&tx, student)?;
        if inserted == 0 {
            return Err(Error::Database(rusqlite::Error::StatementChangedRows(0)));
        }
        let id = tx.last_insert_rowid();

        if !request.course_ids.is_empty() {
            let today = Local::now().date_naive();
            let mut stmt = tx.prepare_cached(INSERT_ENROLLMENT)?;
            for course_id in &request.course_ids {
                stmt.execute(params![id, course_id, today])
                    .map_err(Error::from_sqlite)?;
            }
        }

        tx.commit()?;
        log::info!(
            "Added student {} (id {id}) with {} enrollment(s)",
            student.student_id,
            request.course_ids.len()
        );
        Ok(Student::from_new(id, student.clone()))
    }

    /// Fetches a student by surrogate id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing row is `Ok(None)`.
    pub fn get_by_id(&self, id: StudentId) -> Result<Option<Student>> {
        self.try_get_by_id(id)
            .map_err(|e| warn_failure("get student", e))
    }

    fn try_get_by_id(&self, id: StudentId) -> Result<Option<Student>> {
        let conn = self.db.acquire()?;
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students {SELECT_STUDENT_BY_ID}");
        let student = conn
            .prepare_cached(&sql)?
            .query_row([id], row_to_student)
            .optional()?;
        Ok(student)
    }

    /// Lists every student ordered by last name, then first name, ignoring
    /// ASCII case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all(&self) -> Result<Vec<Student>> {
        self.try_get_all()
            .map_err(|e| warn_failure("list students", e))
    }

    fn try_get_all(&self) -> Result<Vec<Student>> {
        let conn = self.db.acquire()?;
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students {ORDER_BY_NAME}");
        let mut stmt = conn.prepare_cached(&sql)?;
        let students = stmt
            .query_map([], row_to_student)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }

    /// Finds students whose first name, last name, external id, email or
    /// department contains `keyword`, ignoring case by Unicode rules.
    ///
    /// The keyword is matched literally; `%`, `_` and `\` carry no pattern
    /// meaning. An empty keyword matches every student.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search(&self, keyword: &str) -> Result<Vec<Student>> {
        self.try_search(keyword)
            .map_err(|e| warn_failure("search students", e))
    }

    fn try_search(&self, keyword: &str) -> Result<Vec<Student>> {
        let pattern = format!("%{}%", escape_like(&keyword.to_lowercase()));
        let conn = self.db.acquire()?;
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE {} {ORDER_BY_NAME}",
            search_condition()
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let students = stmt
            .query_map(named_params! { ":pattern": pattern }, row_to_student)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }

    /// Updates the mutable fields of a student, matched by surrogate id.
    ///
    /// Only the names, date of birth, email, phone and department are
    /// written; the external id and enrollment date never change.
    ///
    /// Returns `true` if a row was updated, `false` if no student has the id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for invalid fields,
    /// [`Error::Duplicate`] if the new email is taken, or a database error.
    pub fn update(&self, student: &Student) -> Result<bool> {
        self.try_update(student)
            .map_err(|e| warn_failure("update student", e))
    }

    fn try_update(&self, student: &Student) -> Result<bool> {
        student.validate_mutable()?;

        let conn = self.db.acquire()?;
        let mut stmt = conn.prepare_cached(UPDATE_STUDENT)?;
        let changed = stmt
            .execute(params![
                student.first_name,
                student.last_name,
                student.date_of_birth,
                student.email,
                student.phone,
                student.department,
                student.id,
            ])
            .map_err(Error::from_sqlite)?;

        if changed > 0 {
            log::info!("Updated student id {}", student.id);
        }
        Ok(changed > 0)
    }

    /// Deletes a student and, by cascade, its enrollments.
    ///
    /// Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: StudentId) -> Result<bool> {
        self.try_delete(id)
            .map_err(|e| warn_failure("delete student", e))
    }

    fn try_delete(&self, id: StudentId) -> Result<bool> {
        let conn = self.db.acquire()?;
        let removed = conn
            .prepare_cached(DELETE_STUDENT)?
            .execute([id])
            .map_err(Error::from_sqlite)?;

        if removed > 0 {
            log::info!("Deleted student id {id}");
        }
        Ok(removed > 0)
    }

    /// Inserts many students in a single transaction.
    ///
    /// One prepared statement is executed per student. The transaction is
    /// committed only if every insert succeeds; otherwise it is rolled back
    /// and nothing is persisted. No enrollments are written.
    ///
    /// Returns the number of inserted rows.
    ///
    /// # Errors
    ///
    /// Returns the first validation or insert error.
    pub fn add_batch(&self, students: &[NewStudent]) -> Result<usize> {
        self.try_add_batch(students)
            .map_err(|e| warn_failure("batch add students", e))
    }

    fn try_add_batch(&self, students: &[NewStudent]) -> Result<usize> {
        for student in students {
            student.validate()?;
        }

        let mut conn = self.db.acquire()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut inserted = 0;
        for student in students {
            inserted += insert_student(&tx, student)?;
        }

        tx.commit()?;
        log::info!("Batch inserted {inserted} student(s)");
        Ok(inserted)
    }

    /// Lists the students of a department through the
    /// `GetStudentsByDepartment` stored routine, in routine order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoutineNotFound`] if the schema was never
    /// initialized, or a database error.
    pub fn get_by_department(&self, department: &str) -> Result<Vec<Student>> {
        self.try_get_by_department(department)
            .map_err(|e| warn_failure("list students by department", e))
    }

    fn try_get_by_department(&self, department: &str) -> Result<Vec<Student>> {
        let conn = self.db.acquire()?;
        routines::call_routine(
            &conn,
            GET_STUDENTS_BY_DEPARTMENT,
            &[(":dept_name", &department)],
            row_to_student,
        )
    }

    /// Returns the number of stored students.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<usize> {
        self.try_count()
            .map_err(|e| warn_failure("count students", e))
    }

    fn try_count(&self) -> Result<usize> {
        let conn = self.db.acquire()?;
        let count: i64 = conn.query_row(COUNT_STUDENTS, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn search_condition() -> String {
    SEARCH_COLUMNS
        .iter()
        .map(|column| format!("{FOLD_CASE_FUNCTION}({column}) LIKE :pattern ESCAPE '\\'"))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Inserts one student row with the shared prepared statement.
fn insert_student(conn: &rusqlite::Connection, student: &NewStudent) -> Result<usize> {
    let mut stmt = conn.prepare_cached(INSERT_STUDENT)?;
    stmt.execute(params![
        student.student_id,
        student.first_name,
        student.last_name,
        student.date_of_birth,
        student.email,
        student.phone,
        student.department,
        student.enrollment_date,
    ])
    .map_err(Error::from_sqlite)
}

/// Maps a row selected with [`STUDENT_COLUMNS`] to a [`Student`].
///
/// Columns are read by name.
fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        date_of_birth: row.get("date_of_birth")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        department: row.get("department")?,
        enrollment_date: row.get("enrollment_date")?,
    })
}

/// Escapes `LIKE` wildcards so the keyword matches literally under
/// `ESCAPE '\'`.
pub(crate) fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn warn_failure(operation: &str, err: Error) -> Error {
    log::warn!("Failed to {operation}: {err}");
    err
}
