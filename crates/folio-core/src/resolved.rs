//! Fully merged, immutable definitions.
//!
//! Neither type carries current args, current globals or a hook handle.
//! Those belong to [`crate::StoryContext`].

use serde_json::Value;

use crate::annotations::{DecoratorFn, Map, PlayFn, RenderFn};
use crate::ids::StoryId;

/// Parameter set on documentation-only stories.
pub const DOCS_ONLY_PARAMETER: &str = "docsOnly";

/// Project annotations merged with one component's annotations.
#[derive(Debug, Clone)]
pub struct ResolvedMeta {
    pub component_id: String,
    pub title: String,
    pub component: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Map,
    pub initial_args: Map,
    pub arg_types: Map,
    pub decorators: Vec<DecoratorFn>,
    pub render: Option<RenderFn>,
    pub play: Option<PlayFn>,
}

/// Project, component and story annotations merged into one definition.
#[derive(Debug, Clone)]
pub struct ResolvedStory {
    pub id: StoryId,
    pub name: String,
    pub title: String,
    pub component_id: String,
    pub component: Option<String>,
    pub export_name: String,
    pub tags: Vec<String>,
    pub parameters: Map,
    pub initial_args: Map,
    pub arg_types: Map,
    /// Innermost first: story, then component, then project decorators.
    pub decorators: Vec<DecoratorFn>,
    pub render: Option<RenderFn>,
    pub play: Option<PlayFn>,
}

impl ResolvedStory {
    /// Legacy name for the title.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.title
    }

    /// Legacy name for the story name.
    #[must_use]
    pub fn story(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_docs_only(&self) -> bool {
        self.parameters
            .get(DOCS_ONLY_PARAMETER)
            .is_some_and(|v| matches!(v, Value::Bool(true)))
    }
}
