//! Database schema definitions and SQL constants.
//!
//! This module contains the table, index and trigger definitions of the
//! student records database, plus the statements shared by more than one
//! module.

/// SQL statement to create the students table.
///
/// `id` is `AUTOINCREMENT` so surrogate ids are never reused, even after
/// the highest row is deleted. Column widths are declared for documentation;
/// SQLite does not enforce them, the domain validation does.
///
/// The external id, names and email compare with `NOCASE`: uniqueness and
/// the name ordering ignore case.
pub const CREATE_STUDENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        student_id VARCHAR(20) NOT NULL UNIQUE COLLATE NOCASE,
        first_name VARCHAR(50) NOT NULL COLLATE NOCASE,
        last_name VARCHAR(50) NOT NULL COLLATE NOCASE,
        date_of_birth DATE NOT NULL,
        email VARCHAR(100) NOT NULL UNIQUE COLLATE NOCASE,
        phone VARCHAR(15),
        department VARCHAR(50) NOT NULL,
        enrollment_date DATE NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

/// SQL statement to create the courses table.
pub const CREATE_COURSES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS courses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_code VARCHAR(20) NOT NULL UNIQUE,
        course_name VARCHAR(100) NOT NULL,
        credits INTEGER NOT NULL,
        department VARCHAR(50) NOT NULL
    )";

/// SQL statement to create the enrollment join table.
///
/// Both foreign keys cascade, so deleting a student or a course removes its
/// enrollment rows. Cascades need `PRAGMA foreign_keys = ON`, which every
/// pooled connection sets.
pub const CREATE_STUDENT_COURSES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS student_courses (
        student_id INTEGER NOT NULL,
        course_id INTEGER NOT NULL,
        enrollment_date DATE NOT NULL,
        grade VARCHAR(2),
        PRIMARY KEY (student_id, course_id),
        FOREIGN KEY (student_id) REFERENCES students(id) ON DELETE CASCADE,
        FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
    )";

/// SQL statement to keep `students.updated_at` current.
pub const CREATE_STUDENTS_UPDATED_AT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_students_updated_at
    AFTER UPDATE ON students
    FOR EACH ROW
    BEGIN
        UPDATE students SET updated_at = CURRENT_TIMESTAMP WHERE id = OLD.id;
    END";

/// SQL statement to create an index supporting the name ordering.
pub const CREATE_STUDENTS_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_students_name ON students(last_name, first_name)";

/// SQL statement to create an index supporting department lookups.
pub const CREATE_STUDENTS_DEPARTMENT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_students_department ON students(department)";

/// SQL statement to create the stored routine registry.
///
/// Each routine is a single parameterized `SELECT` stored by name.
pub const CREATE_ROUTINES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS routines (
        name TEXT PRIMARY KEY NOT NULL,
        parameters TEXT NOT NULL,
        body TEXT NOT NULL
    )";

/// The student columns, in the order every student query selects them.
pub const STUDENT_COLUMNS: &str = "id, student_id, first_name, last_name, date_of_birth, \
     email, phone, department, enrollment_date";

/// SQL statement to insert a student row.
///
/// Used by both single and batch insert.
pub const INSERT_STUDENT: &str = r"
    INSERT INTO students
    (student_id, first_name, last_name, date_of_birth, email, phone, department, enrollment_date)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

/// SQL statement to insert an enrollment row.
pub const INSERT_ENROLLMENT: &str = r"
    INSERT INTO student_courses (student_id, course_id, enrollment_date)
    VALUES (?1, ?2, ?3)
";
