//! Builder configuration.

use crate::error::{SqlGenError, SqlGenResult};
use serde::Deserialize;
use std::path::Path;

/// How an `IN` filter over an empty list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInList {
    /// Render `col IN ()` as-is. Most databases reject this; callers are
    /// expected not to pass empty lists.
    #[default]
    Verbatim,
    /// Render the always-false predicate `1=0`.
    AlwaysFalse,
}

/// Configuration for [`QueryBuilder`](crate::QueryBuilder).
///
/// Defaults keep the historical rendering exactly.
///
/// ```toml
/// empty_in = "always_false"
/// warn_on_collision = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Rendering of `IN` filters over empty lists.
    pub empty_in: EmptyInList,
    /// Emit a `tracing` warning when a bind name is overwritten.
    pub warn_on_collision: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            empty_in: EmptyInList::Verbatim,
            warn_on_collision: true,
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty `IN` list policy.
    pub fn with_empty_in(mut self, policy: EmptyInList) -> Self {
        self.empty_in = policy;
        self
    }

    /// Enable or disable collision warnings.
    pub fn with_collision_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_collision = enabled;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> SqlGenResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> SqlGenResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SqlGenError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }
}
