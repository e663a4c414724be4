//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursetree/coursetree.toml`
//! 3. Environment variables: `COURSETREE_*` prefix (`__` as separator,
//!    e.g. `COURSETREE_DISPLAY__TRIM_LENGTH=30`)

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::builder::UnresolvedParentPolicy;

/// Display-name trimming strategy for rendered nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrimMode {
    Right,
    Left,
    Center,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub trim_mode: TrimMode,
    /// Names longer than this (plus ellipsis slack) are truncated
    pub trim_length: usize,
    /// Label for the synthetic homepage leaves
    pub homepage_label: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            trim_mode: TrimMode::Right,
            trim_length: 50,
            homepage_label: "Homepage".to_string(),
        }
    }
}

/// Tree construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BuilderSettings {
    /// Drop records with unresolved parent keys (feed-integrity
    /// assumption) or route them to the orphan lists
    pub unresolved_parents: UnresolvedParentPolicy,
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub builder: BuilderSettings,
}

impl Settings {
    /// Load settings with the full layering: defaults, then the global
    /// config file (if present), then environment overrides.
    pub fn load() -> ApplicationResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        Self::build_from(builder)
    }

    /// Load settings from an explicit file plus environment overrides.
    pub fn from_file(path: &Path) -> ApplicationResult<Self> {
        Self::build_from(Config::builder().add_source(File::from(path.to_path_buf())))
    }

    /// Path of the global config file, platform dependent.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "coursetree")
            .map(|dirs| dirs.config_dir().join("coursetree.toml"))
    }

    fn build_from(
        builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
    ) -> ApplicationResult<Self> {
        let config = builder
            .add_source(
                Environment::with_prefix("COURSETREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        config.try_deserialize().map_err(config_error)
    }
}

fn config_error(err: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: err.to_string(),
    }
}
