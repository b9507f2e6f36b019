//! Module processing error types.

use folio_core::{CoreError, StoryId};
use thiserror::Error;

/// Errors raised while turning a loaded module into a file record.
#[derive(Debug, Error)]
pub enum CsfError {
    /// Two exports of one module normalized to the same story id.
    #[error("duplicate story id '{id}' in {import_path}")]
    DuplicateStoryId { id: StoryId, import_path: String },

    /// A title or story name could not be turned into an id.
    #[error("invalid id in {import_path}: {source}")]
    InvalidId {
        import_path: String,
        #[source]
        source: CoreError,
    },
}
