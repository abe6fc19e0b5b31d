//! # Pool Configuration
//!
//! Initial sizes and modes for pools, loaded once at startup from TOML:
//!
//! ```toml
//! initial_size = 1
//! mode = "simple"
//!
//! [types.Bullet]
//! initial_size = 64
//! mode = "dual"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, PoolResult};

/// How a pool tracks its instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolMode {
    /// Free instances in a flat array; checked-out instances are not listed.
    #[default]
    Simple,
    /// Free and used instances both kept in linked lists.
    Dual,
}

/// Per-type settings that take precedence over the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolOverride {
    /// Initial pool size for the type.
    pub initial_size: Option<usize>,
    /// Mode for the type's pool.
    pub mode: Option<PoolMode>,
}

/// Registry-wide pool settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Initial size of a pool created on first acquire.
    pub initial_size: usize,
    /// Mode of a pool created on first acquire.
    pub mode: PoolMode,
    /// Overrides keyed by pooled type name.
    pub types: BTreeMap<String, PoolOverride>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: 1,
            mode: PoolMode::Simple,
            types: BTreeMap::new(),
        }
    }
}

impl PoolConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the text is not a valid config.
    pub fn from_toml_str(text: &str) -> PoolResult<Self> {
        toml::from_str(text).map_err(|e| PoolError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> PoolResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PoolError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            overrides = config.types.len(),
            "loaded pool configuration"
        );
        Ok(config)
    }

    /// Adds or replaces the override for `type_name`.
    #[must_use]
    pub fn with_override(mut self, type_name: impl Into<String>, settings: PoolOverride) -> Self {
        self.types.insert(type_name.into(), settings);
        self
    }

    /// Initial size for a type's pool.
    ///
    /// The type's override wins, then the type's own default, then
    /// [`initial_size`](Self::initial_size).
    #[must_use]
    pub fn initial_size_for(&self, type_name: &str, type_default: Option<usize>) -> usize {
        self.types
            .get(type_name)
            .and_then(|o| o.initial_size)
            .or(type_default)
            .unwrap_or(self.initial_size)
    }

    /// Mode for a type's pool.
    ///
    /// The type's override wins, then the mode the caller asked for, then
    /// [`mode`](Self::mode).
    #[must_use]
    pub fn mode_for(&self, type_name: &str, requested: Option<PoolMode>) -> PoolMode {
        self.types
            .get(type_name)
            .and_then(|o| o.mode)
            .or(requested)
            .unwrap_or(self.mode)
    }
}
