//! Memo cache sizing for the story store.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_csf_cache_capacity() -> usize {
    1_000
}

const fn default_meta_cache_capacity() -> usize {
    1_000
}

const fn default_story_cache_capacity() -> usize {
    10_000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Processed file records kept per (module, import path, title).
    #[serde(default = "default_csf_cache_capacity")]
    pub csf_cache_capacity: usize,

    /// Resolved metas kept per (component, project, module).
    #[serde(default = "default_meta_cache_capacity")]
    pub meta_cache_capacity: usize,

    /// Resolved stories kept per (story, component, project).
    #[serde(default = "default_story_cache_capacity")]
    pub story_cache_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            csf_cache_capacity: default_csf_cache_capacity(),
            meta_cache_capacity: default_meta_cache_capacity(),
            story_cache_capacity: default_story_cache_capacity(),
        }
    }
}

impl StoreConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if any capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("store.csf_cache_capacity", self.csf_cache_capacity),
            ("store.meta_cache_capacity", self.meta_cache_capacity),
            ("store.story_cache_capacity", self.story_cache_capacity),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "capacity must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}
