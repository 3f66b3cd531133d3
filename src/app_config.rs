use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Editor configuration module
/// This module handles the editor configuration including loading,
/// validating and saving configuration settings.
/// Represents the editor configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    /// Timing settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// Video settings
    #[serde(default)]
    pub video: VideoConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Timing and undo grouping
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    // @field: Length of lines created at the end of the file
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,

    // @field: Window in which repeated text edits share one commit
    #[serde(default = "default_undo_coalesce_ms")]
    pub undo_coalesce_ms: u64,
}

impl TimingConfig {
    pub fn coalesce_window(&self) -> Duration {
        Duration::from_millis(self.undo_coalesce_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            undo_coalesce_ms: default_undo_coalesce_ms(),
        }
    }
}

/// Video interaction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoConfig {
    // @field: Seek video to the start of a newly activated line
    #[serde(default = "default_true")]
    pub subtitle_sync: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            subtitle_sync: default_true(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_duration_ms() -> u64 {
    2000
}

fn default_undo_coalesce_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

impl EditorConfig {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.default_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.default_duration_ms must be greater than zero".to_string(),
            ));
        }
        if self.timing.undo_coalesce_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.undo_coalesce_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, writing the defaults there if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = EditorConfig::default();
            config.save(path)?;
            return Ok(config);
        }

        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: EditorConfig = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate().context("Configuration validation failed")?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// `assedit.json` in the user's config directory, or the working directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("assedit").join("assedit.json"))
            .filter(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from("assedit.json"))
    }
}

/// Default implementation for EditorConfig
impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            timing: TimingConfig::default(),
            video: VideoConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
