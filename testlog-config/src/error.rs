//! Errors raised while loading or validating a logger configuration

use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("testlog config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid testlog config:\n{}", describe(.0))]
    Validation(#[source] ValidationErrors),

    /// Extraction failed (unknown level, wrong type, malformed yaml).
    #[error("cannot read testlog config: {0}")]
    Parsing(#[source] Box<figment::Error>),
}

fn describe(errors: &ValidationErrors) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    for (field, errors) in errors.field_errors() {
        for error in errors {
            let reason = error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), |msg| msg.to_string());
            let _ = writeln!(output, "  {field}: {reason}");
        }
    }
    output
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Parsing(Box::new(error))
    }
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}
