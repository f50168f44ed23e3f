//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the roster library.

pub mod database;

use chrono::NaiveDate;
use roster::{EnrollmentRequest, NewStudent};

/// Builder for creating test students with sensible defaults.
///
/// # Examples
///
/// ```no_run
/// # use common::StudentFixture;
/// let student = StudentFixture::new("STU1")
///     .with_name("Ada", "Lovelace")
///     .with_department("Mathematics")
///     .build();
/// ```
#[allow(dead_code)]
pub struct StudentFixture {
    student_id: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    department: String,
    date_of_birth: NaiveDate,
}

#[allow(dead_code)]
impl StudentFixture {
    /// Creates a new fixture builder with default values.
    ///
    /// Defaults:
    /// - name: "Test Student"
    /// - email: derived from the identifier
    /// - phone: None
    /// - department: "Computer Science"
    /// - date of birth: 2005-02-02
    pub fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            first_name: "Test".to_string(),
            last_name: "Student".to_string(),
            email: None,
            phone: None,
            department: "Computer Science".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2005, 2, 2).unwrap(),
        }
    }

    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = first.to_string();
        self.last_name = last.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = department.to_string();
        self
    }

    /// Builds the new student.
    pub fn build(self) -> NewStudent {
        let email = self
            .email
            .unwrap_or_else(|| format!("{}@example.com", self.student_id.to_lowercase()));

        NewStudent::builder(self.student_id, self.first_name, self.last_name)
            .date_of_birth(self.date_of_birth)
            .email(email)
            .phone(self.phone)
            .department(self.department)
            .build()
            .unwrap()
    }

    /// Builds an enrollment request for the given courses.
    pub fn enroll(self, course_ids: &[i64]) -> EnrollmentRequest {
        EnrollmentRequest::new(self.build()).with_courses(course_ids.iter().copied())
    }
}

/// The student the demo flow creates.
#[allow(dead_code)]
pub fn rohan_rana() -> NewStudent {
    StudentFixture::new("STU101")
        .with_name("Rohan", "Rana")
        .with_email("rohan@example.com")
        .with_phone("9876543210")
        .with_department("Computer Science")
        .build()
}
