//! Structured error types for configuration assembly.
//!
//! Every failure aborts the whole build: no partially assembled
//! [`Configuration`](crate::config::Configuration) is ever handed back.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input document errors
    ConfigNotFound,
    IoError,
    ParseError,
    InvalidDocument,
    InvalidSection,

    // Assembly errors
    MissingEnvironmentVariable,
    RepositoryRootNotFound,
    UnknownSetting,
    InvalidSetting,
    MalformedBondPair,
    InvalidAlgorithmConfig,

    // Downstream components
    CollaboratorError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigNotFound => "CONFIG_NOT_FOUND",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::InvalidDocument => "INVALID_DOCUMENT",
            ErrorCode::InvalidSection => "INVALID_SECTION",
            ErrorCode::MissingEnvironmentVariable => "MISSING_ENVIRONMENT_VARIABLE",
            ErrorCode::RepositoryRootNotFound => "REPOSITORY_ROOT_NOT_FOUND",
            ErrorCode::UnknownSetting => "UNKNOWN_SETTING",
            ErrorCode::InvalidSetting => "INVALID_SETTING",
            ErrorCode::MalformedBondPair => "MALFORMED_BOND_PAIR",
            ErrorCode::InvalidAlgorithmConfig => "INVALID_ALGORITHM_CONFIG",
            ErrorCode::CollaboratorError => "COLLABORATOR_ERROR",
        }
    }
}

/// Errors raised while assembling a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The settings file exists but could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML.
    #[error("Failed to parse configuration file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The parsed document is not a mapping at the top level.
    #[error("Configuration document must be a mapping, found {found}")]
    InvalidDocument { found: String },

    /// A top-level section has the wrong shape or contents.
    #[error("Invalid '{section}' section: {reason}")]
    InvalidSection { section: String, reason: String },

    /// A `${NAME}` placeholder refers to an undefined variable.
    #[error("'{name}' not in environment variables")]
    MissingEnvironmentVariable { name: String },

    /// No `.git` directory was found between the start directory and the filesystem root.
    #[error("No repository root (.git directory) found above {}", start.display())]
    RepositoryRootNotFound { start: PathBuf },

    /// A search setting that the search record does not have.
    #[error("Could not find attribute to set: {key}")]
    UnknownSetting { key: String },

    /// A known search setting whose value has the wrong type.
    #[error("Invalid value for search setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// A bond list that is not a list of two-element integer lists.
    #[error("Malformed bond pairs in '{key}': {reason}")]
    MalformedBondPair { key: String, reason: String },

    /// `algorithm_config` was given something other than a mapping.
    #[error("algorithm_config settings need to be a mapping, found {found}")]
    InvalidAlgorithmConfig { found: String },

    /// A downstream component rejected its section.
    #[error("Failed to load '{section}' section: {reason}")]
    Collaborator { section: String, reason: String },
}

impl ConfigError {
    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            ConfigError::Io { .. } => ErrorCode::IoError,
            ConfigError::Parse { .. } => ErrorCode::ParseError,
            ConfigError::InvalidDocument { .. } => ErrorCode::InvalidDocument,
            ConfigError::InvalidSection { .. } => ErrorCode::InvalidSection,
            ConfigError::MissingEnvironmentVariable { .. } => {
                ErrorCode::MissingEnvironmentVariable
            }
            ConfigError::RepositoryRootNotFound { .. } => ErrorCode::RepositoryRootNotFound,
            ConfigError::UnknownSetting { .. } => ErrorCode::UnknownSetting,
            ConfigError::InvalidSetting { .. } => ErrorCode::InvalidSetting,
            ConfigError::MalformedBondPair { .. } => ErrorCode::MalformedBondPair,
            ConfigError::InvalidAlgorithmConfig { .. } => ErrorCode::InvalidAlgorithmConfig,
            ConfigError::Collaborator { .. } => ErrorCode::CollaboratorError,
        }
    }

    // Convenience constructors

    pub fn invalid_section(section: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSection {
            section: section.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_setting(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed_bonds(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedBondPair {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn collaborator(section: &str, reason: impl std::fmt::Display) -> Self {
        Self::Collaborator {
            section: section.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Describe the JSON type of a value for error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a mapping",
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_names_variable() {
        let err = ConfigError::MissingEnvironmentVariable {
            name: "MODEL_DIR".to_string(),
        };
        assert_eq!(err.to_string(), "'MODEL_DIR' not in environment variables");
        assert_eq!(err.code(), ErrorCode::MissingEnvironmentVariable);
    }

    #[test]
    fn test_unknown_setting_names_key() {
        let err = ConfigError::UnknownSetting {
            key: "unknown_field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not find attribute to set: unknown_field"
        );
    }

    #[test]
    fn test_code_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::MalformedBondPair).unwrap();
        assert_eq!(json, "\"MALFORMED_BOND_PAIR\"");
        assert_eq!(ErrorCode::MalformedBondPair.as_str(), "MALFORMED_BOND_PAIR");
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&serde_json::json!([1, 2])), "a list");
        assert_eq!(kind_of(&serde_json::json!({"a": 1})), "a mapping");
        assert_eq!(kind_of(&serde_json::Value::Null), "null");
    }
}
