//! Tests for trim policy and tree rendering

use rstest::rstest;

use coursetree::cli::output::{render_view, trim, NO_COURSES};
use coursetree::config::{DisplaySettings, TrimMode};
use coursetree::domain::builder::{EnrolmentLookup, ViewTreeBuilder};
use coursetree::domain::entities::{CourseRecord, ProgrammeRecord};
use coursetree::domain::key::AosKey;

struct NoEnrolment;

impl EnrolmentLookup for NoEnrolment {
    fn enrolled(&self, _user_id: u64, _platform_id: u64) -> bool {
        false
    }
}

#[rstest]
#[case(TrimMode::Right, "abcdefghij", 4, "abcd...")]
#[case(TrimMode::Left, "abcdefghij", 4, "...ghij")]
#[case(TrimMode::Center, "abcdefghij", 4, "ab...ij")]
#[case(TrimMode::Center, "abcdefghijk", 5, "abc...jk")]
fn test_trim_modes(
    #[case] mode: TrimMode,
    #[case] text: &str,
    #[case] length: usize,
    #[case] expected: &str,
) {
    assert_eq!(trim(text, mode, length), expected);
}

#[rstest]
#[case("short", 10)]
#[case("exactly at limit plus slack!!", 26)]
fn test_trim_noop_within_slack(#[case] text: &str, #[case] length: usize) {
    // Names within length + 3 pass through untouched
    assert_eq!(trim(text, TrimMode::Right, length), text);
}

#[test]
fn test_trim_boundary() {
    // 13 chars, limit 10: exactly at the slack boundary, no trim
    assert_eq!(trim("abcdefghijklm", TrimMode::Right, 10), "abcdefghijklm");
    // one more char tips it over
    assert_eq!(trim("abcdefghijklmn", TrimMode::Right, 10), "abcdefghij...");
}

#[test]
fn test_trim_counts_characters_not_bytes() {
    let text = "Ääöüßéèêëñ çîïôœ";
    let trimmed = trim(text, TrimMode::Right, 8);
    assert_eq!(trimmed, format!("{}...", text.chars().take(8).collect::<String>()));
}

fn display() -> DisplaySettings {
    DisplaySettings::default()
}

#[test]
fn given_empty_view_then_no_courses_message() {
    let view = ViewTreeBuilder::new().build(1, &[], &[], &[], &NoEnrolment);
    let rendered = render_view(&view, &display());
    assert!(rendered.contains(NO_COURSES));
}

#[test]
fn given_view_then_rendered_as_indented_forest() {
    // Arrange
    let programmes = vec![ProgrammeRecord {
        full_name: "BA Fashion".to_string(),
        short_name: String::new(),
        aos_code: "BAFD".to_string(),
        aos_period: "01P".to_string(),
        acad_period: "2024".to_string(),
    }];
    let courses = vec![CourseRecord {
        full_name: "Fashion Year One".to_string(),
        short_name: String::new(),
        id_number: "fy1".to_string(),
        platform_id: 0,
        aos_code: "FSHN".to_string(),
        aos_period: "01A".to_string(),
        acad_period: "2024".to_string(),
        parent: Some(AosKey::new("BAFD", "01P", "2024")),
    }];
    let view = ViewTreeBuilder::new().build(1, &programmes, &courses, &[], &NoEnrolment);

    // Act
    let rendered = render_view(&view, &display());

    // Assert: the grouping heads the tree, members are branch lines;
    // empty short names fall back to full names
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "FSHN012024");
    assert!(lines[1].contains("Fashion Year One"));
    assert!(lines[2].contains("Homepage"));
    assert!(lines[1].starts_with("├──") || lines[1].starts_with("|--"));
}

#[test]
fn given_long_names_then_rendering_applies_trim() {
    // Arrange
    let name = "A very long course title that will certainly exceed the configured trim length";
    let courses = vec![CourseRecord {
        full_name: name.to_string(),
        short_name: name.to_string(),
        id_number: "long".to_string(),
        platform_id: 0,
        aos_code: "LONG".to_string(),
        aos_period: "01A".to_string(),
        acad_period: "2024".to_string(),
        parent: None,
    }];
    let view = ViewTreeBuilder::new().build(1, &[], &courses, &[], &NoEnrolment);

    let settings = DisplaySettings {
        trim_length: 20,
        ..DisplaySettings::default()
    };

    // Act
    let rendered = render_view(&view, &settings);

    // Assert
    assert!(rendered.contains("A very long course t..."));
    assert!(!rendered.contains(name));
}
