//! Tests for CourseLevelService orchestration

use std::sync::Arc;

use coursetree::application::{ApplicationError, CourseLevelService};
use coursetree::config::DisplaySettings;
use coursetree::domain::builder::{BuilderOptions, EnrolmentLookup};
use coursetree::domain::entities::{
    CourseRecord, PlatformCourseRef, PlatformUser, ProgrammeRecord, UnitRecord,
};
use coursetree::domain::key::AosKey;
use coursetree::cli::output::render_view;
use coursetree::infrastructure::traits::RecordsProvider;
use coursetree::infrastructure::{ProviderError, ProviderResult, Snapshot, SnapshotProvider};

fn sample_snapshot() -> Snapshot {
    Snapshot {
        programmes: vec![ProgrammeRecord {
            full_name: "BA Fashion".to_string(),
            short_name: "BAFD".to_string(),
            aos_code: "BAFD".to_string(),
            aos_period: "01P".to_string(),
            acad_period: "2024".to_string(),
        }],
        courses: vec![
            CourseRecord {
                full_name: "Fashion Year 1".to_string(),
                short_name: "FY1".to_string(),
                id_number: "fy1".to_string(),
                platform_id: 11,
                aos_code: "FSHN".to_string(),
                aos_period: "01A".to_string(),
                acad_period: "2024".to_string(),
                parent: Some(AosKey::new("BAFD", "01P", "2024")),
            },
            CourseRecord {
                full_name: "Fashion Year 2".to_string(),
                short_name: "FY2".to_string(),
                id_number: "fy2".to_string(),
                platform_id: 12,
                aos_code: "FSHN".to_string(),
                aos_period: "01B".to_string(),
                acad_period: "2024".to_string(),
                parent: Some(AosKey::new("BAFD", "01P", "2024")),
            },
        ],
        units: vec![UnitRecord {
            full_name: "Pattern Cutting".to_string(),
            short_name: "PC".to_string(),
            platform_id: 21,
            aos_link_code: "PTCT".to_string(),
            link_aos_period: "01U".to_string(),
            link_period: "2024".to_string(),
            parent: Some(AosKey::new("FSHN", "01A", "2024")),
        }],
        platform_courses: vec![PlatformCourseRef {
            id: 99,
            full_name: "Staff Sandbox".to_string(),
            short_name: "sandbox".to_string(),
        }],
        enrolments: vec![(7, 11)],
        ..Snapshot::default()
    }
}

fn service_with(snapshot: Snapshot) -> CourseLevelService {
    CourseLevelService::new(
        Some(Arc::new(SnapshotProvider::new(snapshot))),
        BuilderOptions::default(),
    )
}

#[test]
fn given_no_provider_when_building_then_view_is_empty() {
    // Arrange
    let service = CourseLevelService::new(None, BuilderOptions::default());

    // Act
    let page = service.build_view(&PlatformUser::new(7, "jdoe")).unwrap();

    // Assert: capability degradation, not an error
    assert!(page.view.is_empty());
    assert!(page.view.orphaned_courses.is_empty());
    assert!(page.view.orphaned_units.is_empty());
    assert!(page.platform_courses.is_empty());
}

#[test]
fn given_provider_when_building_then_view_and_platform_courses_populated() {
    // Arrange
    let service = service_with(sample_snapshot());

    // Act
    let page = service.build_view(&PlatformUser::new(7, "jdoe")).unwrap();

    // Assert
    assert!(!page.view.is_empty());
    assert_eq!(page.platform_courses.len(), 1);
    assert_eq!(page.platform_courses[0].id, 99);

    let rendered = render_view(&page.view, &DisplaySettings::default());
    assert!(rendered.contains("FY1 *"), "enrolled course starred: {rendered}");
    assert!(rendered.contains("PC"));
    assert!(rendered.contains("Homepage"));
}

#[test]
fn given_same_snapshot_when_building_twice_then_renders_identically() {
    // Determinism over the full pipeline
    let service = service_with(sample_snapshot());
    let display = DisplaySettings::default();

    let first = service.build_view(&PlatformUser::new(7, "jdoe")).unwrap();
    let second = service.build_view(&PlatformUser::new(7, "jdoe")).unwrap();

    assert_eq!(
        render_view(&first.view, &display),
        render_view(&second.view, &display)
    );
}

struct FailingProvider;

impl EnrolmentLookup for FailingProvider {
    fn enrolled(&self, _user_id: u64, _platform_id: u64) -> bool {
        false
    }
}

impl RecordsProvider for FailingProvider {
    fn resolve_username(&self, platform_username: &str) -> ProviderResult<String> {
        Ok(platform_username.to_string())
    }

    fn get_user_units(&self, _username: &str) -> ProviderResult<Vec<UnitRecord>> {
        Err(ProviderError::Io {
            path: "/dev/null/records".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "records system down"),
        })
    }

    fn get_user_courses(&self, _username: &str) -> ProviderResult<Vec<CourseRecord>> {
        Ok(Vec::new())
    }

    fn get_user_programmes(&self, _username: &str) -> ProviderResult<Vec<ProgrammeRecord>> {
        Ok(Vec::new())
    }

    fn get_moodle_courses(
        &self,
        _user_id: u64,
        _username: &str,
    ) -> ProviderResult<Vec<PlatformCourseRef>> {
        Ok(Vec::new())
    }
}

#[test]
fn given_failing_provider_when_building_then_error_propagates() {
    // Arrange
    let service = CourseLevelService::new(Some(Arc::new(FailingProvider)), BuilderOptions::default());

    // Act
    let result = service.build_view(&PlatformUser::new(7, "jdoe"));

    // Assert: no retries, no partial results
    assert!(matches!(
        result,
        Err(ApplicationError::Provider(ProviderError::Io { .. }))
    ));
}
