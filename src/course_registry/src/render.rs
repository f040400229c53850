//! Text rendering of service state and outcomes.
//!
//! These are the two panes of the registration form (course list and a
//! student's registered courses) plus the one-line messages shown after each
//! action.

use std::fmt;

use crate::catalog::Catalog;
use crate::errors::{RegistrationError, ValidationError};
use crate::roster::Student;

/// Which action produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `register`
    Register,
    /// `drop`
    Drop,
}

impl Action {
    /// Message shown when the action succeeded.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Register => "Course registered successfully.",
            Self::Drop => "Course dropped successfully.",
        }
    }

    /// Message shown when the action failed with `err`.
    pub fn failure_message(self, err: &RegistrationError) -> &'static str {
        match (self, err) {
            (_, RegistrationError::Validation(ValidationError::MissingField(_))) => {
                "Please fill in all fields."
            }
            (Self::Drop, RegistrationError::Validation(ValidationError::UnknownCourse(_))) => {
                "Course does not exist."
            }
            (_, RegistrationError::Validation(ValidationError::UnknownCourse(_)))
            | (_, RegistrationError::Capacity { .. }) => "Course is full or does not exist.",
            (_, RegistrationError::DuplicateRegistration { .. }) => {
                "Already registered for this course or capacity reached."
            }
            (_, RegistrationError::NotFound { .. })
            | (_, RegistrationError::NotRegistered { .. }) => "Not registered for this course.",
            (_, RegistrationError::SeatAccounting { .. }) => {
                "Registration records are inconsistent; please contact the registrar."
            }
        }
    }
}

/// Course list pane: header plus one line per course in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct CourseList<'a>(pub &'a Catalog);

impl fmt::Display for CourseList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available Courses:")?;
        for course in self.0.iter() {
            writeln!(f, "{course}")?;
        }
        Ok(())
    }
}

/// Registered-courses pane for one student.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredCourses<'a> {
    /// Whose courses to show.
    pub student: &'a Student,
    /// Where course titles are looked up.
    pub catalog: &'a Catalog,
}

impl fmt::Display for RegisteredCourses<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registered Courses for {}:", self.student.name())?;
        for code in self.student.registered_courses() {
            match self.catalog.get(code) {
                Some(course) => writeln!(f, "{} - {}", course.code(), course.title())?,
                None => writeln!(f, "{code}")?,
            }
        }
        Ok(())
    }
}
