//! Core error types for block operations.
//!
//! Errors are split into two families. Recoverable errors describe a bad
//! per-signal configuration value: the block logs them and drops that one
//! signal. Everything else is fatal for the signal and surfaces to the host.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for block operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Recoverable, per-signal errors
    #[error("unexpected type for custom namespace: {type_name}")]
    InvalidCustomNamespaceType { type_name: String },

    #[error("custom namespace selected but no custom namespace value was given (got {value})")]
    MissingCustomNamespace { value: String },

    #[error("\"name\" parameter is required for UUID version {version}")]
    MissingName { version: u8 },

    // Fatal errors
    #[error("malformed namespace value: {reason}")]
    MalformedNamespace { reason: String },

    #[error("invalid value for property '{property}': {reason}")]
    InvalidProperty { property: String, reason: String },

    #[error("block '{name}' has not been started")]
    BlockNotStarted { name: String },

    // Configuration and host I/O
    #[error("configuration parse error: {reason}")]
    ConfigParseFailed { reason: String },

    #[error("failed to read file '{}': {reason}", .path.display())]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },
}

impl Error {
    /// Create an invalid custom namespace type error.
    pub fn invalid_custom_namespace_type(type_name: impl Into<String>) -> Self {
        Self::InvalidCustomNamespaceType {
            type_name: type_name.into(),
        }
    }

    /// Create a missing custom namespace error naming the blank value.
    pub fn missing_custom_namespace(value: impl Into<String>) -> Self {
        Self::MissingCustomNamespace {
            value: value.into(),
        }
    }

    /// Create a missing name error for the given UUID version.
    pub const fn missing_name(version: u8) -> Self {
        Self::MissingName { version }
    }

    /// Create a malformed namespace error.
    pub fn malformed_namespace(reason: impl Into<String>) -> Self {
        Self::MalformedNamespace {
            reason: reason.into(),
        }
    }

    /// Create an invalid property error.
    pub fn invalid_property(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create a block not started error.
    pub fn block_not_started(name: impl Into<String>) -> Self {
        Self::BlockNotStarted { name: name.into() }
    }

    /// Create a configuration parse error.
    pub fn config_parse_failed(reason: impl Into<String>) -> Self {
        Self::ConfigParseFailed {
            reason: reason.into(),
        }
    }

    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }

    /// Whether the block should log this error and drop the signal
    /// instead of failing the batch.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidCustomNamespaceType { .. }
                | Self::MissingCustomNamespace { .. }
                | Self::MissingName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_custom_namespace_type("int");
        assert_eq!(err.to_string(), "unexpected type for custom namespace: int");

        let err = Error::missing_custom_namespace("empty bytes");
        assert!(err.to_string().ends_with("(got empty bytes)"));

        let err = Error::missing_name(5);
        assert!(err.to_string().contains("version 5"));

        let err = Error::invalid_property("uuid_version", "2 is not a supported version");
        assert!(err.to_string().contains("uuid_version"));
        assert!(err.to_string().contains("not a supported version"));
    }

    #[test]
    fn test_recoverable_split() {
        assert!(Error::invalid_custom_namespace_type("float").is_recoverable());
        assert!(Error::missing_custom_namespace("null").is_recoverable());
        assert!(Error::missing_name(3).is_recoverable());

        assert!(!Error::malformed_namespace("bad hex").is_recoverable());
        assert!(!Error::invalid_property("binary", "expected bool").is_recoverable());
        assert!(!Error::block_not_started("uuid").is_recoverable());
        assert!(!Error::config_parse_failed("eof").is_recoverable());
    }

    #[test]
    fn test_file_read_error_keeps_path() {
        let err = Error::file_read_failed("/tmp/missing.toml", "not found");
        assert!(err.to_string().contains("/tmp/missing.toml"));
    }
}
