//! Error types for issuelog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using IssuelogError
pub type Result<T> = std::result::Result<T, IssuelogError>;

/// Main error type for issuelog operations
#[derive(Debug, Error)]
pub enum IssuelogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Hosting source errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading from a hosting source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Snapshot file not found
    #[error("Snapshot not found at {0}")]
    SnapshotNotFound(PathBuf),

    /// Snapshot could not be decoded
    #[error("Failed to decode snapshot {path}: {source}")]
    SnapshotDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error reading source: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The release source yielded nothing
    #[error("No releases found")]
    NoReleasesFound,

    /// A timestamp field could not be parsed
    #[error("Invalid timestamp for {subject}: '{value}' ({source})")]
    InvalidTimestamp {
        subject: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A required timestamp field is absent
    #[error("Missing timestamp for {subject}")]
    MissingTimestamp { subject: String },

    /// No formatter registered for the configured format
    #[error("Unsupported changelog format: {0}")]
    UnsupportedFormat(String),

    /// Failed to write changelog
    #[error("Failed to write changelog to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
