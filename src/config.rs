//! Render configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. Stock
//! defaults are overridden by an optional `config.toml` inside the input
//! directory, which is in turn overridden by a file passed with `--config`.
//!
//! ## Config File Location
//!
//! ```text
//! frames/
//! ├── config.toml              # Picked up automatically (optional)
//! ├── 0001.jpg
//! ├── 0002.jpg
//! └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [input]
//! extension = "jpg"         # Photo extension to pick up (case-insensitive)
//!
//! [animation]
//! delay_ms = 0              # Per-frame delay; 0 leaves timing to the viewer
//! loops = 0                 # 0 = loop forever, n = play n times
//! speed = 10                # GIF quantizer speed, 1 (best) to 30 (fastest)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::supported_input_extensions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file picked up from the input directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Render configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Which files in the input directory become frames.
    pub input: InputConfig,
    /// GIF timing, looping and quantization.
    pub animation: AnimationConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl RenderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.input.extension;
        if ext.is_empty() {
            return Err(ConfigError::Validation(
                "input.extension must not be empty".into(),
            ));
        }
        if ext.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "input.extension must not start with a dot (got \"{ext}\")"
            )));
        }
        let lowered = ext.to_ascii_lowercase();
        if !supported_input_extensions().contains(&lowered.as_str()) {
            return Err(ConfigError::Validation(format!(
                "input.extension \"{ext}\" has no decoder; supported: {}",
                supported_input_extensions().join(", ")
            )));
        }
        if !(1..=30).contains(&self.animation.speed) {
            return Err(ConfigError::Validation(
                "animation.speed must be 1-30".into(),
            ));
        }
        Ok(())
    }
}

/// Input discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// File extension (without the dot) of the photographs to animate.
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: "jpg".to_string(),
        }
    }
}

/// Output animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Delay between frames in milliseconds. `0` is what `image::Frame::new`
    /// writes and leaves the pacing to the viewer.
    pub delay_ms: u32,
    /// Number of times to play the animation; `0` loops forever.
    pub loops: u16,
    /// NeuQuant speed used to build each frame's palette (1-30).
    pub speed: i32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            loops: 0,
            speed: 10,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel frame workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(RenderConfig::default()).expect("default config must serialize")
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

/// Read a TOML file as a raw value.
pub fn load_raw_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.is_file() {
        return Ok(None);
    }
    load_raw_file(&config_path).map(Some)
}

/// Merge overlays (lowest precedence first) onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<RenderConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: RenderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config for a run.
///
/// Layers: stock defaults, then `<input_dir>/config.toml` if present, then
/// `explicit` (which must exist when given).
pub fn load_config(input_dir: &Path, explicit: Option<&Path>) -> Result<RenderConfig, ConfigError> {
    let mut overlays = Vec::new();
    if let Some(dir_config) = load_raw_config(input_dir)? {
        overlays.push(dir_config);
    }
    if let Some(path) = explicit {
        overlays.push(load_raw_file(path)?);
    }
    resolve_config(stock_defaults_value(), overlays)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `--gen-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# kaleidogif Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config is read from (later wins):
#   <input-dir>/config.toml
#   --config <path>
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Input discovery
# ---------------------------------------------------------------------------
[input]
# Extension of the photographs to animate, without the dot.
# Matched case-insensitively; files are ordered by name.
extension = "jpg"

# ---------------------------------------------------------------------------
# Output animation
# ---------------------------------------------------------------------------
[animation]
# Delay between frames in milliseconds. 0 leaves pacing to the viewer.
delay_ms = 0

# How many times the animation plays. 0 loops forever.
loops = 0

# Palette quantizer speed: 1 gives the best colors, 30 is fastest.
speed = 10

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel frame workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
