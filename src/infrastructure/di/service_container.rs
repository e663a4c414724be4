//! Service container for dependency injection
//!
//! Wires up the course level service with its provider.

use std::sync::Arc;

use crate::application::services::CourseLevelService;
use crate::config::Settings;
use crate::domain::builder::BuilderOptions;
use crate::infrastructure::traits::RecordsProvider;

/// Container holding the application services.
///
/// The records provider is an explicit, optional dependency: a deployment
/// without the institutional client configures `None` and every view
/// degrades to empty instead of failing.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Course level orchestration
    pub course_level: CourseLevelService,
}

impl ServiceContainer {
    /// Create a container with the given provider (or none).
    pub fn new(settings: Settings, provider: Option<Arc<dyn RecordsProvider>>) -> Self {
        let settings = Arc::new(settings);
        let options = BuilderOptions {
            unresolved_parents: settings.builder.unresolved_parents,
            homepage_label: settings.display.homepage_label.clone(),
        };
        let course_level = CourseLevelService::new(provider, options);

        Self {
            settings,
            course_level,
        }
    }
}
