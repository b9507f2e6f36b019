use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::annotations::Map;
use crate::hooks::Hooks;
use crate::ids::StoryId;
use crate::resolved::ResolvedStory;

/// Where a story is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Story,
    Docs,
}

/// A resolved story combined with live args, globals and its hook handle.
///
/// Built fresh on every access and never cached.
#[derive(Debug, Clone)]
pub struct StoryContext {
    pub story: Arc<ResolvedStory>,
    /// Args after arg type mappings and conditional filtering.
    pub args: Map,
    /// Args exactly as held by the args store.
    pub unmapped_args: Map,
    pub globals: Map,
    pub hooks: Arc<Hooks>,
    pub view_mode: ViewMode,
}

impl StoryContext {
    #[must_use]
    pub fn id(&self) -> &StoryId {
        &self.story.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.story.name
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.story.title
    }

    #[must_use]
    pub fn parameters(&self) -> &Map {
        &self.story.parameters
    }

    #[must_use]
    pub fn arg_types(&self) -> &Map {
        &self.story.arg_types
    }
}
