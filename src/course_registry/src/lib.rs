//! Course registration bookkeeping: a fixed course catalog, a lazily grown
//! student roster, and the register/drop operations that keep seat counters and
//! course lists consistent.
//!
//! ```
//! use course_registry::catalog::{Catalog, config::reference_catalog};
//! use course_registry::registration::RegistrationService;
//!
//! let catalog = Catalog::from_config(reference_catalog()).unwrap();
//! let mut service = RegistrationService::new(catalog);
//!
//! let reg = service.register("S1", "Alice", "CSE101").unwrap();
//! assert_eq!(reg.course.available(), 29);
//! ```

#![deny(missing_docs)]

pub mod catalog;
pub mod errors;
pub mod registration;
pub mod render;
pub mod roster;
pub mod session;
