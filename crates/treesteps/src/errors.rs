//! Error types for the navigator's ambient surfaces.
//!
//! Navigation itself never fails: a selector that resolves to nothing is a
//! no-op (or a fallback to the root), and reachability violations are
//! recovered by redirecting. The errors here cover configuration loading and
//! decoding of history state payloads.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`NavigatorConfig`](crate::NavigatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The config file content could not be parsed.
    #[error("Failed to parse config file {path}: {reason}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// The config file extension is not one of the supported formats.
    #[error("Unsupported config format for {path} (expected .toml or .json)")]
    UnsupportedFormat {
        /// Offending file
        path: PathBuf,
    },

    /// A config value failed validation.
    #[error("Invalid config value for '{key}': {reason}")]
    Invalid {
        /// Dotted config key
        key: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Build an [`ConfigError::Invalid`] for `key`.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while decoding a history state payload into a node id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The history entry carries no state at all.
    #[error("History entry has no state payload")]
    Missing,

    /// The payload does not start with the configured prefix.
    #[error("State payload '{payload}' does not start with prefix '{prefix}'")]
    ForeignPrefix {
        /// Expected prefix
        prefix: String,
        /// Payload as found on the history entry
        payload: String,
    },

    /// The payload is just the prefix with nothing after it.
    #[error("State payload '{payload}' carries an empty node id")]
    EmptyId {
        /// Payload as found on the history entry
        payload: String,
    },
}
