//! Records provider boundary for the institutional data source.
//!
//! The trait abstracts the external records system, allowing the service
//! to be tested with in-memory implementations. The builder never talks
//! to the wire itself: providers hand over already-fetched flat
//! collections.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::builder::EnrolmentLookup;
use crate::domain::entities::{CourseRecord, PlatformCourseRef, ProgrammeRecord, UnitRecord};
use crate::infrastructure::error::{ProviderError, ProviderResult};

/// Institutional records source.
pub trait RecordsProvider: EnrolmentLookup + Send + Sync {
    /// Translate the platform username into the records-system username.
    /// The platform name may be historical; unknown names pass through.
    fn resolve_username(&self, platform_username: &str) -> ProviderResult<String>;

    /// Units this user is enrolled on.
    fn get_user_units(&self, username: &str) -> ProviderResult<Vec<UnitRecord>>;

    /// Courses this user is enrolled on.
    fn get_user_courses(&self, username: &str) -> ProviderResult<Vec<CourseRecord>>;

    /// Programmes this user is enrolled on.
    fn get_user_programmes(&self, username: &str) -> ProviderResult<Vec<ProgrammeRecord>>;

    /// Platform enrolments with no counterpart in the records feed.
    fn get_moodle_courses(
        &self,
        user_id: u64,
        username: &str,
    ) -> ProviderResult<Vec<PlatformCourseRef>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// One user's already-fetched feed, as stored in a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Platform username → records-system username overrides
    pub usernames: HashMap<String, String>,
    pub programmes: Vec<ProgrammeRecord>,
    pub courses: Vec<CourseRecord>,
    pub units: Vec<UnitRecord>,
    pub platform_courses: Vec<PlatformCourseRef>,
    /// (user id, platform course id) enrolment pairs
    pub enrolments: Vec<(u64, u64)>,
}

/// Records provider backed by a JSON snapshot.
///
/// Stands in for the live institutional client: the CLI and tests feed it
/// a snapshot file, the service consumes it like any other provider.
#[derive(Debug, Default)]
pub struct SnapshotProvider {
    snapshot: Snapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_file(path: &Path) -> ProviderResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot =
            serde_json::from_str(&content).map_err(|source| ProviderError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(snapshot))
    }
}

impl EnrolmentLookup for SnapshotProvider {
    fn enrolled(&self, user_id: u64, platform_id: u64) -> bool {
        platform_id != 0
            && self
                .snapshot
                .enrolments
                .contains(&(user_id, platform_id))
    }
}

impl RecordsProvider for SnapshotProvider {
    fn resolve_username(&self, platform_username: &str) -> ProviderResult<String> {
        Ok(self
            .snapshot
            .usernames
            .get(platform_username)
            .cloned()
            .unwrap_or_else(|| platform_username.to_string()))
    }

    fn get_user_units(&self, _username: &str) -> ProviderResult<Vec<UnitRecord>> {
        Ok(self.snapshot.units.clone())
    }

    fn get_user_courses(&self, _username: &str) -> ProviderResult<Vec<CourseRecord>> {
        Ok(self.snapshot.courses.clone())
    }

    fn get_user_programmes(&self, _username: &str) -> ProviderResult<Vec<ProgrammeRecord>> {
        Ok(self.snapshot.programmes.clone())
    }

    fn get_moodle_courses(
        &self,
        _user_id: u64,
        _username: &str,
    ) -> ProviderResult<Vec<PlatformCourseRef>> {
        Ok(self.snapshot.platform_courses.clone())
    }
}
