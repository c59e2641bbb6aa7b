use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for an in-memory repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name reported in log events and `Debug` output.
    pub name: String,
    /// Upper bound applied to the size of every page request. `None` leaves
    /// requested sizes untouched.
    pub max_page_size: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "repository".into(),
            max_page_size: None,
        }
    }
}

impl StoreConfig {
    /// Default configuration under a different name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(input: &str) -> StoreResult<Self> {
        toml::from_str(input).map_err(|e| StoreError::Config(e.to_string()))
    }
}
