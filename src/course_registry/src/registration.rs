//! Registration service: the only entry point that mutates catalog and roster.
//!
//! ## What this does
//! - Validates the request (non-empty fields, course code resolves).
//! - Checks capacity before touching the roster.
//! - Updates the course seat counter and the student's course list together.
//!
//! ## Consistency
//! Every public mutation takes `&mut self`, so calls are serialized by the
//! borrow checker and each one is a single step from the caller's view. A
//! failed call leaves catalog and roster exactly as they were.

use tracing::{debug, info};

use crate::catalog::{Catalog, Course};
use crate::errors::{Field, RegistrationError, ValidationError};
use crate::roster::{EnrollmentError, Roster, Student};

/// Result of a successful registration, borrowed from the service.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    /// The student after the change.
    pub student: &'a Student,
    /// The course after the change.
    pub course: &'a Course,
}

/// Owns the catalog and roster and applies register/drop requests to them.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    catalog: Catalog,
    roster: Roster,
}

fn required(value: &str, field: Field) -> Result<&str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

fn unknown_course(code: &str) -> ValidationError {
    ValidationError::UnknownCourse(code.trim().to_string())
}

impl RegistrationService {
    /// Service over `catalog` with an empty roster.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            roster: Roster::new(),
        }
    }

    /// Current catalog state.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current roster state.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Shorthand for `self.catalog().get(code)`.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.catalog.get(code)
    }

    /// Shorthand for `self.roster().get(id)` (id is trimmed).
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.roster.get(id.trim())
    }

    /// Register `student_id` for `course_code`.
    ///
    /// Unknown students are created with `student_name`; known students keep the
    /// name they were created with.
    ///
    /// Errors, checked in this order:
    /// - [`RegistrationError::Validation`]: empty id/name or unknown course
    /// - [`RegistrationError::Capacity`]: course has no free seat
    /// - [`RegistrationError::DuplicateRegistration`]: already registered
    pub fn register(
        &mut self,
        student_id: &str,
        student_name: &str,
        course_code: &str,
    ) -> Result<Registration<'_>, RegistrationError> {
        let student_id = required(student_id, Field::StudentId)?;
        let student_name = required(student_name, Field::StudentName)?;
        let course = self
            .catalog
            .get_mut(course_code)
            .ok_or_else(|| unknown_course(course_code))?;

        if course.available() == 0 {
            debug!(student = %student_id, course = %course.code(), "course full");
            return Err(RegistrationError::Capacity {
                course: course.code().to_string(),
            });
        }

        let code = course.code().to_string();
        let student = self
            .roster
            .enroll(student_id, student_name, course)
            .map_err(|reason| RegistrationError::DuplicateRegistration {
                student_id: student_id.to_string(),
                course: code.clone(),
                reason,
            })?;

        info!(
            student = %student_id,
            course = %code,
            available = course.available(),
            "registered"
        );
        Ok(Registration {
            student,
            course: &*course,
        })
    }

    /// Drop `course_code` for `student_id`, returning the updated student.
    ///
    /// Errors, checked in this order:
    /// - [`RegistrationError::Validation`]: empty id or unknown course
    /// - [`RegistrationError::NotFound`]: student never registered
    /// - [`RegistrationError::NotRegistered`]: student does not hold the course
    pub fn drop_course(
        &mut self,
        student_id: &str,
        course_code: &str,
    ) -> Result<&Student, RegistrationError> {
        let student_id = required(student_id, Field::StudentId)?;
        let course = self
            .catalog
            .get_mut(course_code)
            .ok_or_else(|| unknown_course(course_code))?;
        let student = self
            .roster
            .get_mut(student_id)
            .ok_or_else(|| RegistrationError::NotFound {
                student_id: student_id.to_string(),
            })?;

        let code = course.code().to_string();
        student
            .drop_course(course)
            .map_err(|reason| match reason {
                EnrollmentError::NotRegistered => RegistrationError::NotRegistered {
                    student_id: student_id.to_string(),
                    course: code.clone(),
                },
                other => RegistrationError::SeatAccounting {
                    course: code.clone(),
                    reason: other,
                },
            })?;

        info!(
            student = %student_id,
            course = %code,
            available = course.available(),
            "dropped"
        );
        Ok(&*student)
    }
}
