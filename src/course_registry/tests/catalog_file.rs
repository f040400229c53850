use std::io::Write;

use course_registry::catalog::Catalog;
use course_registry::catalog::config::{CatalogSource, load_catalog_path};
use shared_utils::env::EnvPathError;
use course_registry::registration::RegistrationService;
use tempfile::NamedTempFile;

fn write_catalog(text: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(text.as_bytes()).expect("write catalog");
    tmp
}

#[test]
fn file_catalog_drives_the_service() {
    let tmp = write_catalog(
        r#"
[courses."bio110 "]
title = "Biology"
capacity = 1

[courses.CHM120]
title = "Chemistry"
description = "General chemistry"
capacity = 12
schedule = "Tue 08:00-10:00"
"#,
    );

    let cfg = load_catalog_path(tmp.path()).expect("load");
    assert!(cfg.courses.contains_key("bio110 "));

    let catalog = Catalog::from_config(cfg).unwrap();
    assert_eq!(catalog.get("BIO110").map(|c| c.code()), Some("BIO110"));
    let mut svc = RegistrationService::new(catalog);
    svc.register("S1", "Alice", "bio110").unwrap();
    assert!(svc.course("BIO110").unwrap().is_full());
    assert_eq!(svc.course("chm120").unwrap().description(), "General chemistry");
}

#[test]
fn source_file_variant_loads_from_disk() {
    let tmp = write_catalog("[courses.X1]\ntitle = \"X\"\ncapacity = 3\n");
    let cfg = CatalogSource::File(tmp.path().to_path_buf())
        .load()
        .expect("load");
    assert_eq!(cfg.courses["X1"].capacity, 3);
}

#[test]
fn missing_file_reports_path() {
    let err = load_catalog_path("/definitely/not/here/catalog.toml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here/catalog.toml"));
}

#[test]
fn shipped_catalog_matches_builtin_seed() {
    let shipped = load_catalog_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../configs/catalog.toml"
    ))
    .expect("shipped catalog");
    let builtin = CatalogSource::Reference.load().unwrap();
    assert_eq!(shipped.courses, builtin.courses);
}

#[test]
fn blank_env_value_falls_back_to_builtin_seed() {
    let blank = Err(EnvPathError::Empty("REGISTRAR_CATALOG".into()));
    let source = CatalogSource::select(None, blank);
    let catalog = Catalog::from_config(source.load().unwrap()).unwrap();
    assert_eq!(catalog.len(), 4);
}

#[cfg(unix)]
#[test]
fn non_unicode_env_path_is_loaded() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir
        .path()
        .join(OsString::from_vec(b"cat\xffalog.toml".to_vec()));
    std::fs::write(&path, "[courses.X1]\ntitle = \"X\"\ncapacity = 3\n").expect("write");

    let source = CatalogSource::select(None, Ok(path.clone()));
    assert_eq!(source, CatalogSource::File(path));
    let catalog = Catalog::from_config(source.load().expect("load")).unwrap();
    assert!(catalog.contains("X1"));
    assert!(!catalog.contains("CSE101"));
}
