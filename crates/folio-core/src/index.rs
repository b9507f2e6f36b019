//! The story index: a static table of entries, each locating a story or a
//! documentation page inside a backing module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::StoryId;

/// Whether an entry renders a story or a documentation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Story,
    Docs,
}

/// Static descriptor for one story or documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: StoryId,
    pub title: String,
    pub name: String,
    /// Path handed to the module loader.
    pub import_path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Modules a documentation page may reference. Empty for stories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stories_imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl IndexEntry {
    #[must_use]
    pub fn is_docs(&self) -> bool {
        self.kind == EntryKind::Docs
    }
}

const fn default_version() -> u32 {
    4
}

/// The whole entry table. Iteration order is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryIndex {
    #[serde(default = "default_version")]
    pub v: u32,
    pub entries: IndexMap<StoryId, IndexEntry>,
}

impl StoryIndex {
    /// Build an index from entries, keyed by their ids.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Self {
        Self {
            v: default_version(),
            entries: entries.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// Decode an index document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] for malformed JSON and
    /// [`CoreError::InvalidIndex`] when an entry's `id` disagrees with its key.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let index: Self = serde_json::from_str(json)?;
        if let Some((key, entry)) = index.entries.iter().find(|(key, e)| **key != e.id) {
            return Err(CoreError::InvalidIndex(format!(
                "entry keyed '{key}' declares id '{}'",
                entry.id
            )));
        }
        Ok(index)
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// First entry (in index order) backed by `import_path`.
    #[must_use]
    pub fn entry_for_import_path(&self, import_path: &str) -> Option<&IndexEntry> {
        self.entries.values().find(|e| e.import_path == import_path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    /// Distinct import paths, each paired with the first entry id using it.
    #[must_use]
    pub fn import_path_representatives(&self) -> Vec<(String, StoryId)> {
        let mut seen: IndexMap<&str, &StoryId> = IndexMap::new();
        for entry in self.entries.values() {
            seen.entry(entry.import_path.as_str()).or_insert(&entry.id);
        }
        seen.into_iter()
            .map(|(path, id)| (path.to_string(), id.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
