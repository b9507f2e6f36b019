//! Read access to a swappable story index.

use std::sync::Arc;

use folio_core::{IndexEntry, StoryId, StoryIndex};
use parking_lot::RwLock;

use crate::error::StoreError;

#[derive(Debug)]
pub struct IndexAccessor {
    index: RwLock<Arc<StoryIndex>>,
}

impl IndexAccessor {
    #[must_use]
    pub fn new(index: StoryIndex) -> Self {
        Self {
            index: RwLock::new(Arc::new(index)),
        }
    }

    /// The table as of now. Later swaps do not affect the returned value.
    pub fn snapshot(&self) -> Arc<StoryIndex> {
        Arc::clone(&*self.index.read())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if `id` is not indexed.
    pub fn entry(&self, id: &str) -> Result<IndexEntry, StoreError> {
        self.index
            .read()
            .entry(id)
            .cloned()
            .ok_or_else(|| StoreError::EntryNotFound(StoryId::new(id)))
    }

    /// First entry, in index order, backed by `import_path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ImportPathNotFound`] if no entry uses the path.
    pub fn entry_for_import_path(&self, import_path: &str) -> Result<IndexEntry, StoreError> {
        self.index
            .read()
            .entry_for_import_path(import_path)
            .cloned()
            .ok_or_else(|| StoreError::ImportPathNotFound(import_path.to_string()))
    }

    pub fn replace(&self, index: StoryIndex) {
        *self.index.write() = Arc::new(index);
    }
}
