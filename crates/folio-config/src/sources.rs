//! Where the index, the modules and the project annotations live.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_index_path() -> String {
    "index.json".to_string()
}

fn default_modules_root() -> String {
    ".".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Story index document.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Directory import paths are resolved against.
    #[serde(default = "default_modules_root")]
    pub modules_root: String,

    /// Optional JSON file with project annotations.
    #[serde(default)]
    pub project_annotations_path: Option<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            modules_root: default_modules_root(),
            project_annotations_path: None,
        }
    }
}

impl SourcesConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for empty paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sources.index_path".to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
        if self.modules_root.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sources.modules_root".to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
