//! Catalog seed configuration: parsing, normalization, and loading.
//!
//! The catalog is fixed for the lifetime of the process, so this module is the
//! only place courses come from. A seed is a TOML document keyed by course code:
//!
//! ```toml
//! [courses.CSE101]
//! title = "Intro to Computer Science"
//! description = "Basics of CS"
//! capacity = 30
//! schedule = "Mon-Wed-Fri 10:00-11:00"
//! ```
//!
//! Key behaviors:
//! - Loading only parses; [`crate::catalog::Catalog::from_config`] runs
//!   [`normalize_catalog`] once when the catalog is built.
//! - Course codes are trimmed and upper-cased ("cse101 " -> "CSE101"); lookups in
//!   [`crate::catalog::Catalog`] apply the same rule.
//! - Declaration order is preserved, which is the order the course list renders in.
//! - Empty codes, empty titles, and codes that collide after normalization are errors.
//!
//! Entrypoints:
//! - Parse from a TOML string: [`load_catalog_str`]
//! - Parse from a file path: [`load_catalog_path`]
//! - Built-in four-course seed: [`reference_catalog`]
//! - Pick a seed from a CLI flag / environment value: [`CatalogSource::select`]

use std::{
    mem,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared_utils::env::EnvPathError;
use toml::from_str;

/// Environment variable consulted for a catalog file when no flag is given.
pub const CATALOG_ENV: &str = "REGISTRAR_CATALOG";

/// Top-level seed mapping course codes to their configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogCfg {
    /// Map of course code -> configuration.
    ///
    /// Codes are normalized (trimmed, upper-case) by [`normalize_catalog`].
    pub courses: IndexMap<String, CourseCfg>,
}

/// Seed payload for one course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseCfg {
    /// Human-readable title (e.g., "Calculus I").
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Total seats; fixed once the catalog is built.
    pub capacity: u32,
    /// Meeting times (e.g., "Tue-Thu 14:00-15:30"). Stored, never interpreted.
    #[serde(default)]
    pub schedule: String,
}

impl CourseCfg {
    /// Course with a title and capacity; description and schedule left empty.
    pub fn new(title: impl Into<String>, capacity: u32) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            capacity,
            schedule: String::new(),
        }
    }
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Number of course codes that changed when trimming/upper-casing.
    pub codes_renamed: usize,
    /// Number of titles, descriptions, or schedules that had surrounding whitespace.
    pub fields_trimmed: usize,
}

fn trim_in_place(field: &mut String, report: &mut NormalizationReport) {
    let trimmed = field.trim();
    if trimmed.len() != field.len() {
        *field = trimmed.to_string();
        report.fields_trimmed += 1;
    }
}

/// Normalize a seed in place.
///
/// - Trim + upper-case course codes; reject empty codes and duplicates after normalization
/// - Trim titles (must stay non-empty), descriptions, and schedules
/// - Reject a seed with no courses
pub fn normalize_catalog(cat: &mut CatalogCfg) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();
    let mut rebuilt: IndexMap<String, CourseCfg> = IndexMap::with_capacity(cat.courses.len());

    for (raw_code, mut cfg) in mem::take(&mut cat.courses) {
        let code = super::normalize_code(&raw_code);
        if code.is_empty() {
            bail!("course code cannot be empty after trimming");
        }
        if code != raw_code {
            report.codes_renamed += 1;
        }
        if rebuilt.contains_key(&code) {
            bail!("duplicate course code after normalization: {code}");
        }

        trim_in_place(&mut cfg.title, &mut report);
        if cfg.title.is_empty() {
            bail!("course {code} has an empty title");
        }
        trim_in_place(&mut cfg.description, &mut report);
        trim_in_place(&mut cfg.schedule, &mut report);

        rebuilt.insert(code, cfg);
    }

    if rebuilt.is_empty() {
        bail!("catalog must declare at least one course");
    }

    cat.courses = rebuilt;
    Ok(report)
}

/// Parse a seed from a TOML string. Codes are left as written.
///
/// Errors on TOML parse failures, including unknown fields and negative
/// capacities.
pub fn load_catalog_str(toml_str: &str) -> anyhow::Result<CatalogCfg> {
    from_str(toml_str).context("failed to parse catalog TOML")
}

/// Read a seed TOML file from disk and parse it.
pub fn load_catalog_path(path: impl AsRef<Path>) -> anyhow::Result<CatalogCfg> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read catalog file {}", path.as_ref().display()))?;
    load_catalog_str(&text)
}

/// The four courses the registration form ships with.
pub fn reference_catalog() -> CatalogCfg {
    let seed = [
        (
            "CSE101",
            "Intro to Computer Science",
            "Basics of CS",
            30,
            "Mon-Wed-Fri 10:00-11:00",
        ),
        (
            "MAT201",
            "Calculus I",
            "Differential Calculus",
            25,
            "Tue-Thu 14:00-15:30",
        ),
        ("PHY101", "Physics I", "Mechanics", 20, "Mon-Wed 09:00-10:30"),
        (
            "ENG101",
            "English Literature",
            "Introduction to Literature",
            35,
            "Fri 13:00-15:00",
        ),
    ];

    let courses = seed
        .into_iter()
        .map(|(code, title, description, capacity, schedule)| {
            (
                code.to_string(),
                CourseCfg {
                    title: title.into(),
                    description: description.into(),
                    capacity,
                    schedule: schedule.into(),
                },
            )
        })
        .collect();
    CatalogCfg { courses }
}

/// Where the seed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A TOML file on disk.
    File(PathBuf),
    /// [`reference_catalog`].
    Reference,
}

impl CatalogSource {
    /// An explicit flag wins, then the [`CATALOG_ENV`] path, then the reference seed.
    ///
    /// Any path the environment yields is used, including one that is not valid
    /// unicode; only an unset or blank variable falls back.
    pub fn select(flag: Option<PathBuf>, env: Result<PathBuf, EnvPathError>) -> Self {
        if let Some(path) = flag {
            return Self::File(path);
        }
        match env {
            Ok(path) => Self::File(path),
            Err(EnvPathError::Missing(_)) => Self::Reference,
            Err(err @ EnvPathError::Empty(_)) => {
                tracing::debug!(%err, "using built-in catalog");
                Self::Reference
            }
        }
    }

    /// Produce the seed, not yet normalized.
    pub fn load(&self) -> anyhow::Result<CatalogCfg> {
        match self {
            Self::File(path) => load_catalog_path(path),
            Self::Reference => Ok(reference_catalog()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk() -> CatalogCfg {
        let mut courses = IndexMap::new();
        courses.insert(
            " cse101".to_string(),
            CourseCfg {
                title: "  Intro to Computer Science ".into(),
                description: "Basics of CS".into(),
                capacity: 30,
                schedule: String::new(),
            },
        );
        courses.insert("MAT201".to_string(), CourseCfg::new("Calculus I", 25));
        CatalogCfg { courses }
    }

    #[test]
    fn normalizes_codes_and_trims_titles() {
        let mut cat = mk();
        let report = normalize_catalog(&mut cat).unwrap();

        assert_eq!(
            report,
            NormalizationReport {
                codes_renamed: 1,
                fields_trimmed: 1,
            }
        );
        let codes: Vec<&str> = cat.courses.keys().map(String::as_str).collect();
        assert_eq!(codes, ["CSE101", "MAT201"]); // declaration order kept
        assert_eq!(cat.courses["CSE101"].title, "Intro to Computer Science");
    }

    #[test]
    fn duplicate_code_collision_errors() {
        let mut cat = mk();
        cat.courses.insert("Cse101".into(), CourseCfg::new("Other", 5));
        let err = normalize_catalog(&mut cat).unwrap_err();
        assert!(err.to_string().contains("duplicate course code"));
    }

    #[test]
    fn empty_title_errors() {
        let mut cat = mk();
        cat.courses.insert("PHY101".into(), CourseCfg::new("   ", 20));
        let err = normalize_catalog(&mut cat).unwrap_err();
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn empty_catalog_errors() {
        let mut cat = CatalogCfg::default();
        assert!(normalize_catalog(&mut cat).is_err());
    }

    #[test]
    fn parses_toml_with_defaults() {
        let cat = load_catalog_str(
            r#"
            [courses.phy101]
            title = "Physics I"
            capacity = 20
            "#,
        )
        .unwrap();
        let phy = &cat.courses["phy101"];
        assert_eq!(phy.capacity, 20);
        assert_eq!(phy.description, "");
        assert_eq!(phy.schedule, "");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = load_catalog_str(
            r#"
            [courses.PHY101]
            title = "Physics I"
            capacity = 20
            room = "B12"
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("room"));
    }

    #[test]
    fn negative_capacity_is_a_parse_error() {
        let res = load_catalog_str(
            r#"
            [courses.PHY101]
            title = "Physics I"
            capacity = -1
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn reference_catalog_is_already_normalized() {
        let mut cat = reference_catalog();
        let report = normalize_catalog(&mut cat).unwrap();
        assert_eq!(report, NormalizationReport::default());
        assert_eq!(cat.courses.len(), 4);
        assert_eq!(cat.courses["ENG101"].capacity, 35);
    }

    #[test]
    fn source_selection_prefers_flag_then_env() {
        let env_ok = || Ok::<_, EnvPathError>(PathBuf::from("/etc/catalog.toml"));
        let env_missing = || Err(EnvPathError::Missing(CATALOG_ENV.to_string()));

        assert_eq!(
            CatalogSource::select(Some("a.toml".into()), env_ok()),
            CatalogSource::File("a.toml".into())
        );
        assert_eq!(
            CatalogSource::select(None, env_ok()),
            CatalogSource::File("/etc/catalog.toml".into())
        );
        assert_eq!(
            CatalogSource::select(None, env_missing()),
            CatalogSource::Reference
        );
        assert_eq!(
            CatalogSource::select(None, Err(EnvPathError::Empty(CATALOG_ENV.to_string()))),
            CatalogSource::Reference
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_env_path_is_not_ignored() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = PathBuf::from(OsString::from_vec(b"/srv/cat\xffalog.toml".to_vec()));
        assert_eq!(
            CatalogSource::select(None, Ok(raw.clone())),
            CatalogSource::File(raw)
        );
    }

    #[test]
    fn reference_source_is_returned_raw() {
        let cat = CatalogSource::Reference.load().unwrap();
        assert_eq!(cat.courses, reference_catalog().courses);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn codes_uppercased_and_unique(
            codes in proptest::collection::vec("[a-zA-Z0-9 ]{1,8}", 1..6),
        ) {
            let mut cat = CatalogCfg::default();
            for code in &codes {
                cat.courses.insert(code.clone(), CourseCfg::new("Title", 10));
            }

            if normalize_catalog(&mut cat).is_ok() {
                prop_assert!(cat.courses.keys().all(|k| !k.chars().any(char::is_lowercase)));
                prop_assert!(cat.courses.keys().all(|k| k.trim() == k && !k.is_empty()));
            }
        }
    }
}
