//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sdui/sdui.toml`
//! 3. Local config: `<dir>/.sdui.toml` (usually the working directory)
//! 4. Environment variables: `SDUI_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};

/// How `render` presents a view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tree outline of stacks and labels
    Outline,
    /// Displayed text, top to bottom
    Text,
    /// View tree as JSON
    Json,
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub format: Option<OutputFormat>,
    pub warn_duplicate_ids: Option<bool>,
}

/// Unified configuration for sdui.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum component nesting accepted by the decoder (root is depth 1)
    pub max_depth: usize,
    /// Default presentation for `render`
    pub format: OutputFormat,
    /// Report ids used by more than one component
    pub warn_duplicate_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            format: OutputFormat::Outline,
            warn_duplicate_ids: true,
        }
    }
}

/// Get the XDG config directory for sdui.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sdui").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sdui.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".sdui.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            format: overlay.format.unwrap_or(self.format),
            warn_duplicate_ids: overlay.warn_duplicate_ids.unwrap_or(self.warn_duplicate_ids),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.sdui.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/sdui/sdui.toml`
    /// 3. Local config: `<local_dir>/.sdui.toml`
    /// 4. Environment variables: `SDUI_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Load settings with an explicit global config file instead of the XDG one.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply SDUI_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SDUI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        match config.get_int("max_depth") {
            Ok(val) => {
                settings.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("SDUI_MAX_DEPTH must be a positive integer, got {val}"),
                })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get::<OutputFormat>("format") {
            Ok(val) => settings.format = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_bool("warn_duplicate_ids") {
            Ok(val) => settings.warn_duplicate_ids = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if !(1..=MAX_SUPPORTED_DEPTH).contains(&self.max_depth) {
            return Err(ApplicationError::Config {
                message: format!(
                    "max_depth must be between 1 and {MAX_SUPPORTED_DEPTH}, got {}",
                    self.max_depth
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# sdui configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/sdui/sdui.toml
#   Local:  ./.sdui.toml
#   Env:    SDUI_* environment variables (e.g. SDUI_MAX_DEPTH=16)

# Maximum component nesting accepted when decoding (root is depth 1, at most {MAX_SUPPORTED_DEPTH})
# max_depth = {DEFAULT_MAX_DEPTH}

# Default output of `sdui render`: "outline", "text" or "json"
# format = "outline"

# Warn about component ids used more than once
# warn_duplicate_ids = true
"#
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None).expect("load defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_default_settings_then_has_expected_values() {
        let settings = Settings::default();
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(settings.format, OutputFormat::Outline);
        assert!(settings.warn_duplicate_ids);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let base = Settings::default();
        let overlay = RawSettings {
            max_depth: Some(8),
            ..RawSettings::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.max_depth, 8);
        assert_eq!(merged.format, base.format);
        assert_eq!(merged.warn_duplicate_ids, base.warn_duplicate_ids);
    }

    #[test]
    fn given_zero_depth_when_validating_then_config_error() {
        let settings = Settings {
            max_depth: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_depth_above_ceiling_when_validating_then_config_error() {
        let at_ceiling = Settings {
            max_depth: MAX_SUPPORTED_DEPTH,
            ..Settings::default()
        };
        assert!(at_ceiling.validate().is_ok());

        let too_deep = Settings {
            max_depth: MAX_SUPPORTED_DEPTH + 1,
            ..Settings::default()
        };
        assert!(matches!(
            too_deep.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn test_settings_to_toml_round_trips() {
        let settings = Settings {
            max_depth: 12,
            format: OutputFormat::Json,
            warn_duplicate_ids: false,
        };
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_template_is_valid_toml() {
        let parsed: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(parsed.max_depth.is_none());
    }
}
