//! Store and loader error types.

use std::path::PathBuf;

use folio_core::StoryId;
use folio_csf::CsfError;
use thiserror::Error;

/// Failures reported by a [`crate::ModuleLoader`]. The store never inspects
/// them; they are propagated as-is.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("module not found: {0}")]
    NotFound(String),

    #[error("failed to read module {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse module {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load {path}: {reason}")]
    Failed { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The story id is not in the index.
    #[error("no index entry for story '{0}'")]
    EntryNotFound(StoryId),

    /// A documentation entry references a module no index entry uses.
    #[error("no index entry uses import path '{0}'")]
    ImportPathNotFound(String),

    /// The index and the loaded module disagree about a story.
    #[error("story '{id}' is not defined in {import_path}")]
    StoryNotInFile { id: StoryId, import_path: String },

    /// A synchronous bulk operation ran before `materialize_all`.
    #[error("cannot call {operation} before materialize_all")]
    ExtractBeforeMaterialize { operation: &'static str },

    /// The materialized map has no record for an indexed import path.
    #[error("no materialized file record for {0}")]
    MissingFileRecord(String),

    /// Args were updated for a story that was never resolved.
    #[error("no args for story '{0}'; resolve it first")]
    UnknownStoryArgs(StoryId),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Csf(#[from] CsfError),
}
