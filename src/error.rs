//! Error types for review-dispatch.
//!
//! The assignment engine itself is infallible: empty inputs and missing
//! candidates are outcomes recorded in the plan. Errors only arise at the
//! edges, from configuration and from the collaborators that feed and store
//! a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for review-dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration loading or validation error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value is out of range or unparsable.
    #[error("invalid configuration for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the assignment service.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A collaborator failed to supply run input (roster or pending batch).
    #[error("failed to load {source_name}: {message}")]
    Source {
        source_name: &'static str,
        message: String,
    },

    /// An assignment could not be written to the assignment store.
    ///
    /// `persisted` counts the assignments of the same run that were stored
    /// before the failure.
    #[error("failed to persist assignment for resource {resource_id} ({persisted} stored before failure): {message}")]
    Persist {
        resource_id: String,
        persisted: usize,
        message: String,
    },
}

impl Error {
    /// Creates a source error.
    pub fn source(source_name: &'static str, message: impl Into<String>) -> Self {
        Error::Source {
            source_name,
            message: message.into(),
        }
    }

    /// Whether retrying the run may succeed.
    ///
    /// Collaborator failures are transient; configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Source { .. } | Error::Persist { .. })
    }
}
