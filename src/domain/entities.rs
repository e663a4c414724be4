//! Domain entities: enrolment records as supplied by the institutional
//! records system.

use serde::{Deserialize, Serialize};

use crate::domain::key::{AosKey, UnitKey, YearGroupKey};

/// Top-level academic offering. Programmes group courses and are never
/// individually enrolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeRecord {
    pub full_name: String,
    #[serde(default)]
    pub short_name: String,
    pub aos_code: String,
    pub aos_period: String,
    pub acad_period: String,
}

impl ProgrammeRecord {
    pub fn key(&self) -> AosKey {
        AosKey::new(&self.aos_code, &self.aos_period, &self.acad_period)
    }
}

/// One academic year's instance of a subject of study.
///
/// `id_number` is the stable identifier used for year-group matching;
/// `platform_id` links to the host platform's course record (0 when there
/// is none). `parent` references a programme, `None` marks an orphan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub full_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub platform_id: u64,
    pub aos_code: String,
    pub aos_period: String,
    pub acad_period: String,
    #[serde(default)]
    pub parent: Option<AosKey>,
}

impl CourseRecord {
    pub fn key(&self) -> AosKey {
        AosKey::new(&self.aos_code, &self.aos_period, &self.acad_period)
    }

    pub fn year_group(&self) -> YearGroupKey {
        YearGroupKey::of(&self.key())
    }
}

/// A single taught module, child of a course. `parent` references a course
/// by its composite key, `None` marks an orphan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub full_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub platform_id: u64,
    pub aos_link_code: String,
    pub link_aos_period: String,
    pub link_period: String,
    #[serde(default)]
    pub parent: Option<AosKey>,
}

impl UnitRecord {
    pub fn key(&self) -> UnitKey {
        UnitKey {
            aos_link_code: self.aos_link_code.clone(),
            link_aos_period: self.link_aos_period.clone(),
            link_period: self.link_period.clone(),
        }
    }
}

/// A course known to the host platform but possibly absent from the
/// records feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCourseRef {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub short_name: String,
}

/// The host platform's view of the requesting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUser {
    pub id: u64,
    pub username: String,
}

impl PlatformUser {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
