//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Keep documentation-only stories in extraction output.
    #[serde(default)]
    pub include_docs_only: bool,

    /// Emit single-line JSON instead of pretty output.
    #[serde(default)]
    pub compact_output: bool,
}
