//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outliner/outliner.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `OUTLINER_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{OutlineError, OutlineResult};

/// How the reference renderer lays out an outline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Spaces per depth level
    pub indent_width: usize,
    /// Write the body line under each title
    pub show_body: bool,
    /// Append `:tag1:tag2:` to title lines
    pub show_tags: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            indent_width: 5,
            show_body: true,
            show_tags: false,
        }
    }
}

/// Raw render settings for intermediate parsing (`None` → inherit from the layer below).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub indent_width: Option<usize>,
    pub show_body: Option<bool>,
    pub show_tags: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderSettings,
}

impl RenderSettings {
    fn merge(&self, overlay: &RawRenderSettings) -> Self {
        Self {
            indent_width: overlay.indent_width.unwrap_or(self.indent_width),
            show_body: overlay.show_body.unwrap_or(self.show_body),
            show_tags: overlay.show_tags.unwrap_or(self.show_tags),
        }
    }
}

/// Unified configuration for outliner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
}

/// Get the XDG config directory for outliner.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outliner").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outliner.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> OutlineResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| OutlineError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| OutlineError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> OutlineError {
    OutlineError::Config {
        message: e.to_string(),
    }
}

/// `None` when the variable is unset; a malformed value is an error.
fn env_value<T>(result: Result<T, ConfigError>) -> OutlineResult<Option<T>> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: self.render.merge(&overlay.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional file layered on top of the global config; must exist
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> OutlineResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply OUTLINER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> OutlineResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OUTLINER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_int("render.indent_width"))? {
            settings.render.indent_width = usize::try_from(val).map_err(|_| OutlineError::Config {
                message: format!("render.indent_width must not be negative: {}", val),
            })?;
        }
        if let Some(val) = env_value(config.get_bool("render.show_body"))? {
            settings.render.show_body = val;
        }
        if let Some(val) = env_value(config.get_bool("render.show_tags"))? {
            settings.render.show_tags = val;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_fields() {
        let base = RenderSettings::default();
        let overlay = RawRenderSettings {
            indent_width: Some(2),
            ..Default::default()
        };
        let merged = base.merge(&overlay);
        assert_eq!(merged.indent_width, 2);
        assert!(merged.show_body);
        assert!(!merged.show_tags);
    }

    #[test]
    fn test_env_value_separates_unset_from_malformed() {
        assert!(matches!(env_value::<i64>(Err(ConfigError::NotFound("render.indent_width".into()))), Ok(None)));
        assert!(matches!(env_value(Ok(3_i64)), Ok(Some(3))));
        assert!(matches!(
            env_value::<bool>(Err(ConfigError::Message("invalid type".into()))),
            Err(OutlineError::Config { .. })
        ));
    }

    #[test]
    fn test_env_override_wins() {
        std::env::set_var("OUTLINER_RENDER__SHOW_TAGS", "true");
        let settings = Settings::apply_env_overrides(Settings::default()).unwrap();
        std::env::remove_var("OUTLINER_RENDER__SHOW_TAGS");
        assert!(settings.render.show_tags);
    }
}
