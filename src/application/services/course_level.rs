//! Course level service
//!
//! Fetches a user's enrolment records from the institutional provider and
//! runs the view tree builder over them.

use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::builder::{BuilderOptions, CourseLevelView, ViewTreeBuilder};
use crate::domain::entities::{PlatformCourseRef, PlatformUser};
use crate::infrastructure::traits::RecordsProvider;

/// Output of one view request: the built tree view plus the platform
/// enrolments the records feed knows nothing about.
#[derive(Debug, Default)]
pub struct CourseLevel {
    pub view: CourseLevelView,
    pub platform_courses: Vec<PlatformCourseRef>,
}

/// Service orchestrating provider lookups and tree construction.
pub struct CourseLevelService {
    provider: Option<Arc<dyn RecordsProvider>>,
    options: BuilderOptions,
}

impl CourseLevelService {
    /// Create a new course level service. `None` means the institutional
    /// client is not deployed; views are then empty rather than an error.
    pub fn new(provider: Option<Arc<dyn RecordsProvider>>, options: BuilderOptions) -> Self {
        Self { provider, options }
    }

    /// Build the course level view for one user.
    ///
    /// One forward pipeline over snapshot data: resolve the username,
    /// fetch the three collections and the platform course refs, run the
    /// builder. Provider failures propagate; there are no retries and no
    /// partial results.
    pub fn build_view(&self, user: &PlatformUser) -> ApplicationResult<CourseLevel> {
        let Some(provider) = &self.provider else {
            debug!("records provider not configured, view is empty");
            return Ok(CourseLevel::default());
        };

        // The platform username may be an LDAP or historical name
        let username = provider.resolve_username(&user.username)?;
        debug!(platform = %user.username, resolved = %username, "resolved username");

        let units = provider.get_user_units(&username)?;
        let courses = provider.get_user_courses(&username)?;
        let programmes = provider.get_user_programmes(&username)?;
        let platform_courses = provider.get_moodle_courses(user.id, &username)?;

        let builder = ViewTreeBuilder::with_options(self.options.clone());
        let view = builder.build(user.id, &programmes, &courses, &units, provider.as_ref());

        Ok(CourseLevel {
            view,
            platform_courses,
        })
    }
}
