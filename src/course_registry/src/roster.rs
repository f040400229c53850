//! Students known to the system and the courses each one holds.
//!
//! A [`Student`] references courses by code only; the [`Course`] records stay
//! owned by the catalog. Seat counters and course lists are updated together by
//! [`Student::register`] and [`Student::drop_course`], which either change both
//! sides or neither.

use indexmap::{IndexMap, map::Entry};
use thiserror::Error;

use crate::catalog::{Course, SeatError};

/// Why a student-level enrollment change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    /// The course is already in the student's list.
    #[error("already registered for this course")]
    AlreadyRegistered,
    /// The course is not in the student's list.
    #[error("not registered for this course")]
    NotRegistered,
    /// The course refused to hand out or take back a seat.
    #[error(transparent)]
    Seat(#[from] SeatError),
}

/// A student and their registered courses, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: String,
    name: String,
    courses: Vec<String>,
}

impl Student {
    /// A student with no registrations.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            courses: Vec::new(),
        }
    }

    /// Roster key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name given on first registration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Codes of the registered courses.
    pub fn registered_courses(&self) -> &[String] {
        &self.courses
    }

    /// True if the student holds `code` (exact, already-normalized code).
    pub fn is_registered(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c == code)
    }

    /// Register for `course`, taking one of its seats.
    ///
    /// Duplicates are detected by course code. If the course has no seat left
    /// the student's list is left unchanged.
    pub fn register(&mut self, course: &mut Course) -> Result<(), EnrollmentError> {
        if self.is_registered(course.code()) {
            return Err(EnrollmentError::AlreadyRegistered);
        }
        course.try_occupy_seat()?;
        self.courses.push(course.code().to_string());
        Ok(())
    }

    /// Drop `course`, giving its seat back.
    ///
    /// A registered student always holds a seat, so a failing release means the
    /// counters are out of sync with the course lists. That is reported as
    /// [`EnrollmentError::Seat`] and neither record is changed.
    pub fn drop_course(&mut self, course: &mut Course) -> Result<(), EnrollmentError> {
        let Some(pos) = self.courses.iter().position(|c| c == course.code()) else {
            return Err(EnrollmentError::NotRegistered);
        };
        debug_assert!(
            course.occupied() > 0,
            "student {} holds {} but the course has no occupied seat",
            self.id,
            course.code()
        );
        if let Err(err) = course.release_seat() {
            tracing::warn!(
                student = %self.id,
                course = %course.code(),
                %err,
                "seat release failed for an enrolled student"
            );
            return Err(err.into());
        }
        self.courses.remove(pos);
        Ok(())
    }
}

/// Every student that has successfully registered at least once.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: IndexMap<String, Student>,
}

impl Roster {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a student by id.
    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.get_mut(id)
    }

    /// Register `id` for `course`, creating the student on first success.
    ///
    /// A new student is only inserted when the registration goes through, so a
    /// refused first attempt leaves the roster untouched. For a known id the
    /// stored name is kept even if `name` differs.
    pub(crate) fn enroll(
        &mut self,
        id: &str,
        name: &str,
        course: &mut Course,
    ) -> Result<&Student, EnrollmentError> {
        match self.students.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                let student = entry.into_mut();
                if student.name() != name {
                    tracing::debug!(
                        student = %id,
                        kept = %student.name(),
                        ignored = %name,
                        "keeping first registered name"
                    );
                }
                student.register(course)?;
                Ok(&*student)
            }
            Entry::Vacant(entry) => {
                let mut student = Student::new(id, name);
                student.register(course)?;
                tracing::debug!(student = %id, "student added to roster");
                Ok(&*entry.insert(student))
            }
        }
    }

    /// Students in order of first registration.
    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Number of known students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// True before the first successful registration.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
