//! One course offering and its seat occupancy.
//!
//! A [`Course`] only tracks *how many* seats are taken, never *who* took them.
//! The student side of the relationship lives in [`crate::roster`].

use std::fmt;

use thiserror::Error;

/// Why a seat could not be claimed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeatError {
    /// Every seat is taken.
    #[error("all {capacity} seats are occupied")]
    Full {
        /// Capacity of the course at the time of the attempt.
        capacity: u32,
    },
    /// Release requested while no seat is occupied.
    #[error("no occupied seat to release")]
    NoneOccupied,
}

/// A course in the catalog.
///
/// Invariant: `occupied <= capacity`. The counter only moves through
/// [`Course::try_occupy_seat`] and [`Course::release_seat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    code: String,
    title: String,
    description: String,
    capacity: u32,
    occupied: u32,
    schedule: String,
}

impl Course {
    /// Create an empty course (no occupied seats).
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: u32,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            capacity,
            occupied: 0,
            schedule: schedule.into(),
        }
    }

    /// Catalog key, e.g. `"CSE101"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Meeting times as entered in the seed data. Informational only.
    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    /// Total seats.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Seats currently taken.
    pub const fn occupied(&self) -> u32 {
        self.occupied
    }

    /// Seats still free (`capacity - occupied`).
    pub const fn available(&self) -> u32 {
        self.capacity - self.occupied
    }

    /// True when no seat is left.
    pub const fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }

    /// Claim one seat. Leaves the counter untouched on failure.
    pub fn try_occupy_seat(&mut self) -> Result<(), SeatError> {
        if self.is_full() {
            return Err(SeatError::Full {
                capacity: self.capacity,
            });
        }
        self.occupied += 1;
        Ok(())
    }

    /// Give one seat back. Leaves the counter untouched on failure.
    pub fn release_seat(&mut self) -> Result<(), SeatError> {
        if self.occupied == 0 {
            return Err(SeatError::NoneOccupied);
        }
        self.occupied -= 1;
        Ok(())
    }
}

/// `CSE101 - Intro to Computer Science (30 slots available)`
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} slots available)",
            self.code,
            self.title,
            self.available()
        )
    }
}
