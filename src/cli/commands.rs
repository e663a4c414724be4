//! Command dispatch

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, CourseLevel};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{Settings, TrimMode};
use crate::domain::entities::PlatformUser;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::SnapshotProvider;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree {
            snapshot,
            user,
            user_id,
            trim_mode,
            trim_length,
        }) => _tree(snapshot, user, *user_id, *trim_mode, *trim_length),
        Some(Commands::Orphans {
            snapshot,
            user,
            user_id,
        }) => _orphans(snapshot, user, *user_id),
        Some(Commands::Config {
            command: ConfigCommands::Show,
        }) => _config_show(),
        None => Ok(()),
    }
}

fn build_page(
    snapshot: &Path,
    user: &str,
    user_id: u64,
    settings: &Settings,
) -> CliResult<CourseLevel> {
    let provider = SnapshotProvider::from_file(snapshot).map_err(ApplicationError::from)?;
    let container = ServiceContainer::new(settings.clone(), Some(Arc::new(provider)));
    let page = container
        .course_level
        .build_view(&PlatformUser::new(user_id, user))?;
    Ok(page)
}

#[instrument]
fn _tree(
    snapshot: &Path,
    user: &str,
    user_id: u64,
    trim_mode: Option<TrimMode>,
    trim_length: Option<usize>,
) -> CliResult<()> {
    debug!("snapshot: {:?}", snapshot);
    let mut settings = Settings::load()?;
    if let Some(mode) = trim_mode {
        settings.display.trim_mode = mode;
    }
    if let Some(length) = trim_length {
        settings.display.trim_length = length;
    }

    let page = build_page(snapshot, user, user_id, &settings)?;
    output::info(output::render_view(&page.view, &settings.display).trim_end());
    Ok(())
}

#[instrument]
fn _orphans(snapshot: &Path, user: &str, user_id: u64) -> CliResult<()> {
    debug!("snapshot: {:?}", snapshot);
    let settings = Settings::load()?;
    let page = build_page(snapshot, user, user_id, &settings)?;
    let view = &page.view;

    if view.orphaned_courses.is_empty() && view.orphaned_units.is_empty() {
        output::info("No orphaned records");
        return Ok(());
    }

    output::header(&format!(
        "Orphaned courses ({})",
        view.orphaned_courses.len()
    ));
    for &idx in &view.orphaned_courses {
        if let Some(node) = view.tree.node(idx) {
            output::detail(&node.data);
        }
    }

    output::header(&format!("Orphaned units ({})", view.orphaned_units.len()));
    for &idx in &view.orphaned_units {
        if let Some(node) = view.tree.node(idx) {
            output::detail(&node.data);
        }
    }

    output::warning("orphaned records render at the end of the tree");
    Ok(())
}

#[instrument]
fn _config_show() -> CliResult<()> {
    let settings = Settings::load()?;
    let rendered = toml::to_string_pretty(&settings).map_err(|e| ApplicationError::Config {
        message: e.to_string(),
    })?;
    output::info(rendered.trim_end());
    Ok(())
}
