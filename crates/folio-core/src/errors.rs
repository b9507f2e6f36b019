//! Cross-cutting error types for Folio.
//!
//! Domain-specific errors (`CsfError`, `StoreError`, `ConfigError`) are
//! defined in their respective crates. The CLI converges them through
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised while building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A title or story name sanitized down to an empty id segment.
    #[error("Invalid {part} '{value}': it must contain at least one alphanumeric character")]
    InvalidId { part: &'static str, value: String },

    /// The story index document could not be decoded.
    #[error("Invalid story index: {0}")]
    InvalidIndex(String),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
