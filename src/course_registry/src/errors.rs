//! Error types surfaced by the registration service.

use std::fmt;

use thiserror::Error;

use crate::roster::EnrollmentError;

/// Input fields a caller must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Student identifier.
    StudentId,
    /// Student display name.
    StudentName,
    /// Course code.
    CourseCode,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StudentId => "student id",
            Self::StudentName => "student name",
            Self::CourseCode => "course code",
        })
    }
}

/// The request itself is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty (after trimming).
    #[error("missing required field: {0}")]
    MissingField(Field),
    /// The course code does not name a catalog entry.
    #[error("unknown course code: {0:?}")]
    UnknownCourse(String),
}

/// The unified error type for registration requests.
///
/// Every variant is recoverable; the service state is unchanged whenever one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Missing field or unresolvable course code.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The course has no available seats.
    #[error("course {course} has no available seats")]
    Capacity {
        /// Code of the full course.
        course: String,
    },

    /// The student already holds the course, or the last seat went away between
    /// the capacity check and the seat claim.
    #[error("student {student_id} cannot register for {course} again")]
    DuplicateRegistration {
        /// Requesting student.
        student_id: String,
        /// Requested course.
        course: String,
        /// What the student/course pair reported.
        #[source]
        reason: EnrollmentError,
    },

    /// Drop requested for a student id that never registered.
    #[error("unknown student id: {student_id}")]
    NotFound {
        /// Requested student id.
        student_id: String,
    },

    /// Drop requested for a course the student does not hold.
    #[error("student {student_id} is not registered for {course}")]
    NotRegistered {
        /// Requesting student.
        student_id: String,
        /// Requested course.
        course: String,
    },

    /// Seat counter and course lists disagree. Not reachable through the
    /// public API.
    #[error("seat accounting for {course} is inconsistent")]
    SeatAccounting {
        /// Affected course.
        course: String,
        /// Underlying seat failure.
        #[source]
        reason: EnrollmentError,
    },
}
