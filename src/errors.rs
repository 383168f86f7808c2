/*!
 * Error types for the glsmark application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while preparing the glossary scanner
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// A configured command name cannot be used as a LaTeX control word
    #[error("Invalid {role} command '{name}': expected ASCII letters, optionally followed by '*'")]
    InvalidCommand {
        /// Which marker was rejected ("definition" or "reference")
        role: &'static str,
        /// The rejected command name
        name: String,
    },

    /// Error compiling a generated matching pattern
    #[error("Failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be parsed
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// Path of the offending file
        path: String,
        /// Parser message
        message: String,
    },

    /// A configuration value is out of range or malformed
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidValue {
        /// Dotted field name, e.g. `output.suffix`
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Error from marker validation
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from glossary scanning
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
