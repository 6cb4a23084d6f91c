//! # Navigator Configuration
//!
//! Runtime knobs for the navigator: the history state prefix, the default
//! error time-to-live, and the behaviour of the default route matcher.
//!
//! Configuration is layered: defaults, then an optional file (`.toml` or
//! `.json`), then `TREESTEPS_*` environment variables.
//!
//! ```toml
//! state_prefix = "wizard:"
//! default_error_ttl = 2
//!
//! [routing]
//! exact = true
//! case_sensitive = false
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default prefix for history state payloads.
pub const DEFAULT_STATE_PREFIX: &str = "node:";

/// Default number of backward steps an error survives.
pub const DEFAULT_ERROR_TTL: u32 = 1;

/// Prefix of environment variables read by [`NavigatorConfig::merge_with_env`].
pub const ENV_PREFIX: &str = "TREESTEPS_";

/// Route matching behaviour of the default [`RouteMatcher`](crate::RouteMatcher).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Require the whole location to match (otherwise a prefix match on
    /// segment boundaries is enough).
    pub exact: bool,
    /// Compare literal segments case-sensitively.
    pub case_sensitive: bool,
}

/// Navigator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Prefix prepended to node ids in history state payloads.
    pub state_prefix: String,
    /// Ttl applied by `set_error` when the caller gives none.
    pub default_error_ttl: u32,
    /// Default route matcher behaviour.
    pub routing: RoutingConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            state_prefix: DEFAULT_STATE_PREFIX.to_string(),
            default_error_ttl: DEFAULT_ERROR_TTL,
            routing: RoutingConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".into(),
            reason: e.to_string(),
        })
    }

    /// Load configuration from a `.toml` or `.json` file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |reason: String| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Overlay `TREESTEPS_*` variables from the process environment.
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Overlay `TREESTEPS_*` key/value pairs.
    ///
    /// Recognized keys: `STATE_PREFIX`, `DEFAULT_ERROR_TTL`, `ROUTING_EXACT`,
    /// `ROUTING_CASE_SENSITIVE`. Other keys under the prefix are ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(key) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();
            match key {
                "STATE_PREFIX" => self.state_prefix = value.to_string(),
                "DEFAULT_ERROR_TTL" => {
                    self.default_error_ttl = value.trim().parse().map_err(|_| {
                        ConfigError::invalid("default_error_ttl", format!("not a count: {value}"))
                    })?;
                }
                "ROUTING_EXACT" => self.routing.exact = parse_flag("routing.exact", value)?,
                "ROUTING_CASE_SENSITIVE" => {
                    self.routing.case_sensitive = parse_flag("routing.case_sensitive", value)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Check invariants the navigator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_prefix.is_empty() {
            return Err(ConfigError::invalid("state_prefix", "must not be empty"));
        }
        if self.state_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "state_prefix",
                "must not contain whitespace",
            ));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(key, format!("not a boolean: {other}"))),
    }
}
