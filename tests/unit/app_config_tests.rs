/*!
 * Tests for application configuration functionality
 */

use std::fs;
use std::time::Duration;

use anyhow::Result;
use assedit::app_config::{EditorConfig, LogLevel};
use assedit::errors::ConfigError;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = EditorConfig::default();

    assert_eq!(config.timing.default_duration_ms, 2000);
    assert_eq!(config.timing.undo_coalesce_ms, 10_000);
    assert_eq!(config.timing.coalesce_window(), Duration::from_secs(10));
    assert!(config.video.subtitle_sync);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withZeroTimings_shouldFail() {
    let mut config = EditorConfig::default();
    config.timing.undo_coalesce_ms = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = EditorConfig::default();
    config.timing.default_duration_ms = 0;
    assert!(config.validate().is_err());
}

/// Missing sections fall back to their defaults
#[test]
fn test_fromJson_withPartialConfig_shouldFillDefaults() {
    let config = EditorConfig::from_json(r#"{ "video": { "subtitle_sync": false }, "log_level": "debug" }"#)
        .expect("valid partial config");

    assert!(!config.video.subtitle_sync);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.timing.default_duration_ms, 2000);
}

#[test]
fn test_fromJson_withMalformedJson_shouldReturnParseError() {
    assert!(matches!(EditorConfig::from_json("{ timing: "), Err(ConfigError::Parse(_))));
}

/// A missing file is created with the defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("assedit.json");

    let config = EditorConfig::load_or_create(&path)?;

    assert_eq!(config, EditorConfig::default());
    assert!(path.exists());
    let written: EditorConfig = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written, config);
    Ok(())
}

#[test]
fn test_saveThenLoad_withCustomValues_shouldPreserveThem() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("custom.json");

    let mut config = EditorConfig::default();
    config.timing.default_duration_ms = 5000;
    config.log_level = LogLevel::Trace;
    config.save(&path)?;

    assert_eq!(EditorConfig::load_or_create(&path)?, config);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidValues_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "timing": { "undo_coalesce_ms": 0 } }"#)?;

    assert!(EditorConfig::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
