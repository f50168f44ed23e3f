//! Course catalog.
//!
//! Courses are the targets of enrollment rows. The catalog registers them
//! and lists the enrollments of a student.

use chrono::NaiveDate;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::student::{CourseId, StudentId};

const MAX_COURSE_CODE_LEN: usize = 20;
const MAX_COURSE_NAME_LEN: usize = 100;
const MAX_DEPARTMENT_LEN: usize = 50;

const INSERT_COURSE: &str = r"
    INSERT INTO courses (course_code, course_name, credits, department)
    VALUES (?1, ?2, ?3, ?4)
";

const SELECT_COURSES: &str = r"
    SELECT id, course_code, course_name, credits, department
    FROM courses
    ORDER BY course_code
";

const SELECT_ENROLLMENTS: &str = r"
    SELECT student_id, course_id, enrollment_date, grade
    FROM student_courses
    WHERE student_id = ?1
    ORDER BY course_id
";

/// A registered course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Surrogate identifier assigned by the store.
    pub id: CourseId,
    /// Unique course code, e.g. `CS101`.
    pub course_code: String,
    /// Descriptive name.
    pub course_name: String,
    /// Credit points.
    pub credits: u32,
    /// Department offering the course.
    pub department: String,
}

/// A course that has not been registered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    /// Unique course code.
    pub course_code: String,
    /// Descriptive name.
    pub course_name: String,
    /// Credit points.
    pub credits: u32,
    /// Department offering the course.
    pub department: String,
}

impl NewCourse {
    /// Creates a new course, trimming every text field.
    #[must_use]
    pub fn new(
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        credits: u32,
        department: impl Into<String>,
    ) -> Self {
        Self {
            course_code: course_code.into().trim().to_string(),
            course_name: course_name.into().trim().to_string(),
            credits,
            department: department.into().trim().to_string(),
        }
    }

    /// Validates the course against the column widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value, max_len) in [
            ("course_code", &self.course_code, MAX_COURSE_CODE_LEN),
            ("course_name", &self.course_name, MAX_COURSE_NAME_LEN),
            ("department", &self.department, MAX_DEPARTMENT_LEN),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    field: field.into(),
                    message: "Cannot be empty or only whitespace".into(),
                });
            }
            if value.chars().count() > max_len {
                return Err(Error::Validation {
                    field: field.into(),
                    message: format!("Cannot exceed {max_len} characters"),
                });
            }
        }
        Ok(())
    }
}

/// An enrollment row: a student taking a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Surrogate id of the student.
    pub student_id: StudentId,
    /// Surrogate id of the course.
    pub course_id: CourseId,
    /// Date the enrollment was recorded.
    pub enrollment_date: NaiveDate,
    /// Grade, once awarded.
    pub grade: Option<String>,
}

/// Registers courses and lists enrollments.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    db: Database,
}

impl CourseCatalog {
    /// Creates a catalog over a pooled database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Registers a course.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an invalid course,
    /// [`Error::Duplicate`] if the course code is taken, or a database error.
    pub fn add_course(&self, course: &NewCourse) -> Result<Course> {
        course.validate()?;

        let conn = self.db.acquire()?;
        conn.execute(
            INSERT_COURSE,
            params![
                course.course_code,
                course.course_name,
                course.credits,
                course.department
            ],
        )
        .map_err(|e| {
            let err = Error::from_sqlite(e);
            log::warn!("Failed to add course {}: {err}", course.course_code);
            err
        })?;

        let id = conn.last_insert_rowid();
        log::info!("Added course {} (id {id})", course.course_code);
        Ok(Course {
            id,
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            credits: course.credits,
            department: course.department.clone(),
        })
    }

    /// Lists every course ordered by course code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_courses(&self) -> Result<Vec<Course>> {
        let conn = self.db.acquire()?;
        let mut stmt = conn.prepare_cached(SELECT_COURSES)?;
        let courses = stmt
            .query_map([], row_to_course)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(courses)
    }

    /// Lists the enrollments of a student ordered by course id.
    ///
    /// An unknown student simply has no enrollments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn enrollments_for(&self, student: StudentId) -> Result<Vec<Enrollment>> {
        let conn = self.db.acquire()?;
        let mut stmt = conn.prepare_cached(SELECT_ENROLLMENTS)?;
        let enrollments = stmt
            .query_map([student], |row| {
                Ok(Enrollment {
                    student_id: row.get("student_id")?,
                    course_id: row.get("course_id")?,
                    enrollment_date: row.get("enrollment_date")?,
                    grade: row.get("grade")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(enrollments)
    }
}

fn row_to_course(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get("id")?,
        course_code: row.get("course_code")?,
        course_name: row.get("course_name")?,
        credits: row.get("credits")?,
        department: row.get("department")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, create_test_student};
    use crate::{EnrollmentRequest, StudentRepository};

    #[test]
    fn test_add_and_list_courses() {
        let catalog = CourseCatalog::new(create_test_database());
        catalog
            .add_course(&NewCourse::new("MA201", "Linear Algebra", 4, "Mathematics"))
            .unwrap();
        let cs = catalog
            .add_course(&NewCourse::new(" CS101 ", "Programming", 3, "Computer Science"))
            .unwrap();
        assert_eq!(cs.course_code, "CS101");

        let codes: Vec<_> = catalog
            .list_courses()
            .unwrap()
            .into_iter()
            .map(|c| c.course_code)
            .collect();
        assert_eq!(codes, vec!["CS101", "MA201"]);
    }

    #[test]
    fn test_duplicate_course_code() {
        let catalog = CourseCatalog::new(create_test_database());
        let course = NewCourse::new("CS101", "Programming", 3, "Computer Science");
        catalog.add_course(&course).unwrap();

        let err = catalog.add_course(&course).unwrap_err();
        assert!(matches!(err, Error::Duplicate { ref field } if field == "course_code"));
    }

    #[test]
    fn test_invalid_course_rejected() {
        let catalog = CourseCatalog::new(create_test_database());
        let err = catalog
            .add_course(&NewCourse::new("", "Nameless", 3, "X"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "course_code"));
    }

    #[test]
    fn test_enrollments_for_student() {
        let db = create_test_database();
        let catalog = CourseCatalog::new(db.clone());
        let repo = StudentRepository::new(db);

        let b = catalog
            .add_course(&NewCourse::new("B", "Second", 3, "X"))
            .unwrap();
        let a = catalog
            .add_course(&NewCourse::new("A", "First", 3, "X"))
            .unwrap();
        let student = repo
            .add(
                &EnrollmentRequest::new(create_test_student("STU1", "A", "B", "X"))
                    .with_courses([b.id, a.id]),
            )
            .unwrap();

        let enrollments = catalog.enrollments_for(student.id).unwrap();
        let courses: Vec<_> = enrollments.iter().map(|e| e.course_id).collect();
        assert_eq!(courses, vec![b.id.min(a.id), b.id.max(a.id)]);
        assert!(enrollments.iter().all(|e| e.grade.is_none()));

        assert!(catalog.enrollments_for(9999).unwrap().is_empty());
    }
}
