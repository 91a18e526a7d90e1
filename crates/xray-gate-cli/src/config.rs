//! Configuration file support for xray-gate.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/xray-gate/config.toml` (lowest priority)
//! - Project-local: `.xray-gate.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// File name of the project-local config.
pub const PROJECT_CONFIG_FILE: &str = ".xray-gate.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Validator thresholds.
    pub validator: ValidatorSection,
    /// Model artifact settings.
    pub model: ModelConfig,
    /// Dataset settings.
    pub dataset: DatasetConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Validator thresholds; unset values keep the built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorSection {
    /// Minimum width and height in pixels.
    pub min_dimension: Option<u32>,
    /// Largest tolerated channel difference (0-255).
    pub max_channel_diff: Option<u8>,
    /// Lowest accepted mean intensity (0.0-1.0).
    pub min_mean: Option<f64>,
    /// Highest accepted mean intensity (0.0-1.0).
    pub max_mean: Option<f64>,
    /// Lowest accepted intensity standard deviation (0.0-1.0).
    pub min_std_dev: Option<f64>,
    /// Highest accepted intensity standard deviation (0.0-1.0).
    pub max_std_dev: Option<f64>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Custom artifact path.
    pub path: Option<PathBuf>,
}

/// Dataset configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset root directory.
    pub dir: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/xray-gate/config.toml`
    /// 2. Project-local: `.xray-gate.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. An invalid merged config is
    /// reported and replaced by the defaults.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}; ignoring config files");
            return Self::default();
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let v = &self.validator;
        if v.min_dimension == Some(0) {
            return Err("validator.min_dimension must be at least 1".to_string());
        }
        for (name, value) in [
            ("validator.min_mean", v.min_mean),
            ("validator.max_mean", v.max_mean),
            ("validator.min_std_dev", v.min_std_dev),
            ("validator.max_std_dev", v.max_std_dev),
        ] {
            if let Some(t) = value {
                if !(0.0..=1.0).contains(&t) {
                    return Err(format!("{name} must be 0.0-1.0, got {t}"));
                }
            }
        }
        if let (Some(lo), Some(hi)) = (v.min_mean, v.max_mean) {
            if lo > hi {
                return Err(format!(
                    "validator.min_mean ({lo}) must not exceed validator.max_mean ({hi})"
                ));
            }
        }
        if let (Some(lo), Some(hi)) = (v.min_std_dev, v.max_std_dev) {
            if lo > hi {
                return Err(format!(
                    "validator.min_std_dev ({lo}) must not exceed validator.max_std_dev ({hi})"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        let v = &mut self.validator;
        v.min_dimension = other.validator.min_dimension.or(v.min_dimension);
        v.max_channel_diff = other.validator.max_channel_diff.or(v.max_channel_diff);
        v.min_mean = other.validator.min_mean.or(v.min_mean);
        v.max_mean = other.validator.max_mean.or(v.max_mean);
        v.min_std_dev = other.validator.min_std_dev.or(v.min_std_dev);
        v.max_std_dev = other.validator.max_std_dev.or(v.max_std_dev);

        self.model.path = other.model.path.or_else(|| self.model.path.take());
        self.dataset.dir = other.dataset.dir.or_else(|| self.dataset.dir.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("xray-gate").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.xray-gate.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
