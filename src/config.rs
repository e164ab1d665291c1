//! Worker configuration module.
//!
//! Handles loading, validating, and merging `photo-organiser.toml`. Stock
//! defaults are overridden by the user file, which only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [sources]
//! photo = "photos/photo.jpg"          # JPEG whose EXIF thumbnail is extracted
//! animation = "samples/animation.gif" # GIF to coalesce and resize to 200px wide
//! still = "samples/still.png"         # Image to resize to exactly 100x100
//!
//! [output]
//! dir = "output"                      # Where results and report.json are written
//!
//! [logging]
//! level = "info"                      # trace | debug | info | warn | error
//! format = "pretty"                   # pretty | json
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = "photo-organiser.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Worker configuration loaded from `photo-organiser.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerConfig {
    /// Input files, one per operation.
    pub sources: SourcesConfig,
    /// Output location.
    pub output: OutputConfig,
    /// Log level and format.
    pub logging: LoggingConfig,
}

/// Input file for each operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub photo: PathBuf,
    pub animation: PathBuf,
    pub still: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            photo: PathBuf::from("photos/photo.jpg"),
            animation: PathBuf::from("samples/animation.gif"),
            still: PathBuf::from("samples/still.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [
            ("sources.photo", &self.sources.photo),
            ("sources.animation", &self.sources.animation),
            ("sources.still", &self.sources.still),
            ("output.dir", &self.output.dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    /// Resolve relative paths against `base` (the config directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        self.sources.photo = resolve(self.sources.photo);
        self.sources.animation = resolve(self.sources.animation);
        self.sources.still = resolve(self.sources.still);
        self.output.dir = resolve(self.output.dir);
        self
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(WorkerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `photo-organiser.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<WorkerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: WorkerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `photo-organiser.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// validates, and resolves relative paths against `dir`.
pub fn load_config(dir: &Path) -> Result<WorkerConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    Ok(resolve_config(base, overlay)?.resolve_paths(dir))
}

/// Returns a fully-commented stock `photo-organiser.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Organiser Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the directory holding this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Inputs, one file per operation
# ---------------------------------------------------------------------------
[sources]
# JPEG whose embedded EXIF thumbnail is extracted.
photo = "photos/photo.jpg"

# Animated GIF: coalesced, then every frame resized to 200px wide.
animation = "samples/animation.gif"

# Still image resized to exactly 100x100 (aspect ratio ignored).
still = "samples/still.png"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Directory for generated images and report.json. Created if missing.
dir = "output"

# ---------------------------------------------------------------------------
# Logging (stderr)
# ---------------------------------------------------------------------------
[logging]
# One of: trace, debug, info, warn, error. RUST_LOG overrides this.
level = "info"

# "pretty" for humans, "json" for log collectors.
format = "pretty"
"##
}
