//! Search space configuration loaded from TOML.
//!
//! ```toml
//! cost_type = "plusone"
//! initial_capacity = 100000
//! ```

use std::path::Path;

use planspace_kernel::operators::OperatorCost;

use crate::error::ConfigError;

/// Construction parameters for a [`SearchSpace`](crate::SearchSpace).
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSpaceConfig {
    /// How operator costs enter adjusted g-values.
    #[serde(default)]
    pub cost_type: OperatorCost,

    /// Number of state ids to reserve room for up front.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

fn default_initial_capacity() -> usize {
    0
}

impl Default for SearchSpaceConfig {
    fn default() -> Self {
        Self {
            cost_type: OperatorCost::default(),
            initial_capacity: default_initial_capacity(),
        }
    }
}

impl SearchSpaceConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML, unknown keys, or
    /// an unknown cost type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::from)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            cost_type = %config.cost_type,
            initial_capacity = config.initial_capacity,
            "loaded search space config"
        );
        Ok(config)
    }
}
