#![allow(dead_code)]

use course_registry::catalog::Catalog;
use course_registry::catalog::config::{CatalogCfg, CourseCfg, reference_catalog};
use course_registry::registration::RegistrationService;

/// Service over the built-in four-course catalog.
pub fn reference_service() -> RegistrationService {
    RegistrationService::new(Catalog::from_config(reference_catalog()).expect("reference catalog"))
}

/// Service over ad-hoc `(code, capacity)` courses.
pub fn service_with(courses: &[(&str, u32)]) -> RegistrationService {
    let mut cfg = CatalogCfg::default();
    for (code, capacity) in courses {
        cfg.courses
            .insert((*code).to_string(), CourseCfg::new(format!("Course {code}"), *capacity));
    }
    RegistrationService::new(Catalog::from_config(cfg).expect("catalog"))
}

/// Seats taken in `code`.
pub fn occupied(svc: &RegistrationService, code: &str) -> u32 {
    svc.course(code).expect("course exists").occupied()
}

/// Seats free in `code`.
pub fn available(svc: &RegistrationService, code: &str) -> u32 {
    svc.course(code).expect("course exists").available()
}

/// Every course's counter agrees with the roster and stays within capacity.
pub fn assert_consistent(svc: &RegistrationService) {
    for course in svc.catalog().iter() {
        assert!(course.occupied() <= course.capacity(), "{course:?} over capacity");
        let holders = svc
            .roster()
            .iter()
            .filter(|s| s.is_registered(course.code()))
            .count();
        assert_eq!(
            holders as u32,
            course.occupied(),
            "seat counter for {} disagrees with roster",
            course.code()
        );
    }
}
