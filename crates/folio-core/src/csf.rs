//! Structured file records: a loaded module split into normalized
//! component-level and story-level annotations.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::annotations::{DecoratorFn, Map, ModuleExports, PlayFn, RenderFn};
use crate::ids::StoryId;

/// Component-level annotations after normalization.
#[derive(Debug, Clone)]
pub struct NormalizedMeta {
    /// Component id: the explicit meta `id`, else the sanitized title.
    pub id: String,
    /// Title as computed by the index.
    pub title: String,
    pub component: Option<String>,
    /// Includes `fileName` set to the module's import path.
    pub parameters: Map,
    pub args: Map,
    pub arg_types: Map,
    pub tags: Vec<String>,
    pub decorators: Vec<DecoratorFn>,
    pub render: Option<RenderFn>,
    pub play: Option<PlayFn>,
}

/// Story-level annotations after normalization.
#[derive(Debug, Clone)]
pub struct NormalizedStory {
    pub id: StoryId,
    pub name: String,
    pub export_name: String,
    pub parameters: Map,
    pub args: Map,
    pub arg_types: Map,
    pub tags: Vec<String>,
    pub decorators: Vec<DecoratorFn>,
    pub render: Option<RenderFn>,
    pub play: Option<PlayFn>,
}

/// The processed form of one loaded backing module.
#[derive(Debug, Clone)]
pub struct CsfFile {
    pub import_path: String,
    pub meta: Arc<NormalizedMeta>,
    /// Keyed by story id, in export order.
    pub stories: IndexMap<StoryId, Arc<NormalizedStory>>,
    pub module: Arc<ModuleExports>,
}

impl CsfFile {
    #[must_use]
    pub fn story(&self, id: &str) -> Option<&Arc<NormalizedStory>> {
        self.stories.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.stories.contains_key(id)
    }

    pub fn story_ids(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.keys()
    }
}
