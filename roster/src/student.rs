//! Student types.
//!
//! [`Student`] is a persisted row of the `students` table. Creation input is
//! modelled separately: a [`NewStudent`] carries the column values and an
//! [`EnrollmentRequest`] pairs it with the courses selected at creation time.
//! The course selection drives rows in the join table and is never part of a
//! fetched [`Student`].

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Store-assigned surrogate key of a student row.
pub type StudentId = i64;

/// Store-assigned surrogate key of a course row.
pub type CourseId = i64;

/// Column widths of the `students` table.
pub(crate) const MAX_STUDENT_ID_LEN: usize = 20;
pub(crate) const MAX_NAME_LEN: usize = 50;
pub(crate) const MAX_EMAIL_LEN: usize = 100;
pub(crate) const MAX_PHONE_LEN: usize = 15;
pub(crate) const MAX_DEPARTMENT_LEN: usize = 50;

/// A student as stored in the database.
///
/// The surrogate `id` is assigned by the store on insert and never changes.
/// Only the name, date of birth, email, phone and department can be updated;
/// the external `student_id` and `enrollment_date` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Surrogate identifier assigned by the store.
    pub id: StudentId,
    /// External identifier supplied by the caller (unique).
    pub student_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Email address (unique).
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Department the student belongs to.
    pub department: String,
    /// Date the student enrolled.
    pub enrollment_date: NaiveDate,
}

impl Student {
    /// Combines a surrogate id with the creation fields.
    #[must_use]
    pub fn from_new(id: StudentId, new: NewStudent) -> Self {
        Self {
            id,
            student_id: new.student_id,
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            email: new.email,
            phone: new.phone,
            department: new.department,
            enrollment_date: new.enrollment_date,
        }
    }

    /// Full display name, "first last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Validates the fields that an update writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate_mutable(&self) -> Result<()> {
        validate_required("first_name", &self.first_name, MAX_NAME_LEN)?;
        validate_required("last_name", &self.last_name, MAX_NAME_LEN)?;
        validate_email(&self.email)?;
        validate_phone(self.phone.as_deref())?;
        validate_required("department", &self.department, MAX_DEPARTMENT_LEN)
    }
}

/// Column values of a student that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// External identifier supplied by the caller (unique).
    pub student_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Email address (unique).
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Department the student belongs to.
    pub department: String,
    /// Date the student enrolled.
    pub enrollment_date: NaiveDate,
}

impl NewStudent {
    /// Starts building a new student from the required fields.
    ///
    /// The enrollment date defaults to today's local date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roster::NewStudent;
    ///
    /// let student = NewStudent::builder("STU101", "Rohan", "Rana")
    ///     .date_of_birth(NaiveDate::from_ymd_opt(2005, 2, 2).unwrap())
    ///     .email("rohan@example.com")
    ///     .phone(Some("9876543210".to_string()))
    ///     .department("Computer Science")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(student.student_id, "STU101");
    /// ```
    #[must_use]
    pub fn builder(
        student_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> NewStudentBuilder {
        NewStudentBuilder {
            student_id: student_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
            email: String::new(),
            phone: None,
            department: String::new(),
            enrollment_date: None,
        }
    }

    /// Validates every field against the column constraints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_required("student_id", &self.student_id, MAX_STUDENT_ID_LEN)?;
        validate_required("first_name", &self.first_name, MAX_NAME_LEN)?;
        validate_required("last_name", &self.last_name, MAX_NAME_LEN)?;
        validate_email(&self.email)?;
        validate_phone(self.phone.as_deref())?;
        validate_required("department", &self.department, MAX_DEPARTMENT_LEN)
    }
}

/// Builder for [`NewStudent`].
#[derive(Debug, Clone)]
pub struct NewStudentBuilder {
    student_id: String,
    first_name: String,
    last_name: String,
    date_of_birth: Option<NaiveDate>,
    email: String,
    phone: Option<String>,
    department: String,
    enrollment_date: Option<NaiveDate>,
}

impl NewStudentBuilder {
    /// Sets the date of birth (required).
    #[must_use]
    pub fn date_of_birth(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    /// Sets the email address (required).
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    /// Sets the department (required).
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Overrides the enrollment date.
    #[must_use]
    pub fn enrollment_date(mut self, date: NaiveDate) -> Self {
        self.enrollment_date = Some(date);
        self
    }

    /// Builds and validates the student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the date of birth is missing or any
    /// field violates the column constraints.
    pub fn build(self) -> Result<NewStudent> {
        let date_of_birth = self.date_of_birth.ok_or_else(|| Error::Validation {
            field: "date_of_birth".into(),
            message: "date of birth is required".into(),
        })?;

        let student = NewStudent {
            student_id: self.student_id.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            date_of_birth,
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            department: self.department.trim().to_string(),
            enrollment_date: self
                .enrollment_date
                .unwrap_or_else(|| Local::now().date_naive()),
        };
        student.validate()?;
        Ok(student)
    }
}

/// Input to the add operation: a new student plus the courses selected at
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    /// The student row to insert.
    pub student: NewStudent,
    /// Courses to enroll the student in, in insertion order.
    #[serde(default)]
    pub course_ids: Vec<CourseId>,
}

impl EnrollmentRequest {
    /// Creates a request without any course selection.
    #[must_use]
    pub fn new(student: NewStudent) -> Self {
        Self {
            student,
            course_ids: Vec::new(),
        }
    }

    /// Sets the selected courses.
    #[must_use]
    pub fn with_courses(mut self, course_ids: impl IntoIterator<Item = CourseId>) -> Self {
        self.course_ids = course_ids.into_iter().collect();
        self
    }
}

impl From<NewStudent> for EnrollmentRequest {
    fn from(student: NewStudent) -> Self {
        Self::new(student)
    }
}

fn validate_required(field: &str, value: &str, max_len: usize) -> Result<()> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: field.into(),
            message: "Cannot be empty or only whitespace".into(),
        });
    }

    // The builder trims; values assembled by hand must already be trimmed
    if trimmed.len() != value.len() {
        return Err(Error::Validation {
            field: field.into(),
            message: "Cannot start or end with whitespace".into(),
        });
    }

    if trimmed.contains('\0') {
        return Err(Error::Validation {
            field: field.into(),
            message: "Cannot contain null bytes".into(),
        });
    }

    if trimmed.chars().count() > max_len {
        return Err(Error::Validation {
            field: field.into(),
            message: format!("Cannot exceed {max_len} characters"),
        });
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    validate_required("email", email, MAX_EMAIL_LEN)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::Validation {
            field: "email".into(),
            message: format!("'{email}' is not an email address"),
        }),
    }
}

fn validate_phone(phone: Option<&str>) -> Result<()> {
    match phone {
        Some(phone) => validate_required("phone", phone, MAX_PHONE_LEN),
        None => Ok(()),
    }
}
