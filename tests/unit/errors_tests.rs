/*!
 * Tests for error types and conversions
 */

use glsmark::errors::{AppError, ConfigError, GlossaryError};

#[test]
fn test_glossaryError_invalidCommand_shouldDisplayRoleAndName() {
    let error = GlossaryError::InvalidCommand {
        role: "reference",
        name: "g ls".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("reference"));
    assert!(display.contains("g ls"));
}

#[test]
fn test_configError_invalidValue_shouldDisplayField() {
    let error = ConfigError::InvalidValue {
        field: "output.suffix".to_string(),
        message: "must not be empty".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("output.suffix"));
    assert!(display.contains("must not be empty"));
}

#[test]
fn test_configError_fromGlossaryError_shouldWrapCorrectly() {
    let glossary_error = GlossaryError::InvalidCommand {
        role: "definition",
        name: String::new(),
    };
    let config_error: ConfigError = glossary_error.into();
    assert!(format!("{}", config_error).contains("Glossary error"));
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let config_error = ConfigError::Parse {
        path: "glsmark.json".to_string(),
        message: "EOF".to_string(),
    };
    let app_error: AppError = config_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Config error"));
    assert!(display.contains("glsmark.json"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_appError_debug_shouldBeImplemented() {
    let error = AppError::File("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("File"));
}
