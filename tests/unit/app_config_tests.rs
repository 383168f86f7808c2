/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use glsmark::app_config::{Config, LogLevel, OutputConfig};
use glsmark::errors::ConfigError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.markup.definition_command, "newglossaryentry");
    assert_eq!(config.markup.reference_command, "gls");
    assert_eq!(config.output.preview_limit, 10);
    assert_eq!(config.output.suffix, "gls");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.markup.reference_command = "gls{".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Glossary(_))));
    config.markup.reference_command = "glspl".to_string();
    assert!(config.validate().is_ok());

    config.output.suffix = String::new();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

    config.output.suffix = "a.b".to_string();
    assert!(config.validate().is_err());

    config.output.suffix = "linked".to_string();
    assert!(config.validate().is_ok());
}

/// Test that partial JSON falls back to field defaults
#[test]
fn test_fromJson_partialDocument_shouldFillDefaults() -> Result<()> {
    let json = r#"{"markup": {"reference_command": "acrshort"}, "log_level": "debug"}"#;
    let config = Config::from_json(json, "inline")?;

    assert_eq!(config.markup.definition_command, "newglossaryentry");
    assert_eq!(config.markup.reference_command, "acrshort");
    assert_eq!(config.output, OutputConfig::default());
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);

    Ok(())
}

/// Test that malformed JSON is reported with its origin
#[test]
fn test_fromJson_malformed_shouldReturnParseError() {
    let err = Config::from_json("{ not json", "broken.json").unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

/// Test that a missing config file yields defaults
#[test]
fn test_loadOrDefault_missingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("absent.json"))?;

    assert_eq!(config, Config::default());
    Ok(())
}

/// Test that a saved config can be loaded back
#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("glsmark.json");

    let mut config = Config::default();
    config.output.preview_limit = 3;
    config.markup.definition_command = "newacronym".to_string();
    config.save(&path)?;

    let loaded = Config::load_or_default(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}
