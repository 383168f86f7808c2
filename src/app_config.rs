use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::glossary::MarkupSyntax;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Definition and reference command names
    #[serde(default)]
    pub markup: MarkupSyntax,

    /// Output and reporting settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output and reporting settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Number of replacements listed in the run summary
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Suffix inserted before the extension of derived output files
    /// (`chapter.tex` -> `chapter.gls.tex`)
    #[serde(default = "default_output_suffix")]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preview_limit: default_preview_limit(),
            suffix: default_output_suffix(),
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

fn default_preview_limit() -> usize {
    10
}

fn default_output_suffix() -> String {
    "gls".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.markup.validate()?;

        let suffix = &self.output.suffix;
        if suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.suffix".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if suffix.contains(['/', '\\', '.']) || suffix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "output.suffix".to_string(),
                message: format!("'{}' must not contain separators, dots or whitespace", suffix),
            });
        }

        Ok(())
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load the configuration file, falling back to defaults when it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let json = FileManager::read_to_string(path)?;
        let config = Self::from_json(&json, &path.to_string_lossy())?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            markup: MarkupSyntax::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
