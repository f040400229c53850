//! Catalog subsystem.
//!
//! The catalog is the fixed set of offered courses. It is built once from a
//! seed (see [`crate::catalog::config`]) and never grows or shrinks; only the
//! per-course seat counters change afterwards, and only through
//! [`crate::registration::RegistrationService`].

pub mod config;
mod course;

use indexmap::IndexMap;

use config::{CatalogCfg, normalize_catalog};

pub use course::{Course, SeatError};

/// Canonical form of a course code: trimmed, upper-case.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// The fixed set of courses, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: IndexMap<String, Course>,
}

impl Catalog {
    /// Build a catalog from a raw seed, normalizing it first.
    ///
    /// This is the only place seeds are normalized; loaders hand over what
    /// they parsed.
    pub fn from_config(mut cfg: CatalogCfg) -> anyhow::Result<Self> {
        let report = normalize_catalog(&mut cfg)?;
        if report.codes_renamed > 0 || report.fields_trimmed > 0 {
            tracing::info!(
                renamed = report.codes_renamed,
                trimmed = report.fields_trimmed,
                "normalized catalog seed"
            );
        }

        let courses: IndexMap<String, Course> = cfg
            .courses
            .into_iter()
            .map(|(code, c)| {
                let course = Course::new(
                    code.clone(),
                    c.title,
                    c.description,
                    c.capacity,
                    c.schedule,
                );
                (code, course)
            })
            .collect();

        let catalog = Self { courses };
        tracing::info!(courses = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Look up a course; `code` is normalized before the lookup.
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.get(&normalize_code(code))
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.get_mut(&normalize_code(code))
    }

    /// True if `code` names a course in this catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Courses in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Never true for a catalog built by [`Catalog::from_config`].
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
