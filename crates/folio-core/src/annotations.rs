//! Annotation inputs: what a project, a component (default export) and a
//! story (named export) declare before any merging happens.
//!
//! Data fields deserialize from JSON modules. Callables (render, play,
//! decorators) can only be attached from Rust and are skipped by serde.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::context::StoryContext;

/// JSON object used for parameters, args, arg types and globals.
pub type Map = serde_json::Map<String, Value>;

/// Renders a story from its args and context.
#[derive(Clone)]
pub struct RenderFn(Arc<dyn Fn(&Map, &StoryContext) -> Value + Send + Sync>);

impl RenderFn {
    pub fn new(f: impl Fn(&Map, &StoryContext) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn call(&self, args: &Map, context: &StoryContext) -> Value {
        (self.0)(args, context)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn(..)")
    }
}

/// Wraps the next story function in the chain. The first argument renders
/// everything inside this decorator.
#[derive(Clone)]
pub struct DecoratorFn(
    Arc<dyn Fn(&dyn Fn(&StoryContext) -> Value, &StoryContext) -> Value + Send + Sync>,
);

impl DecoratorFn {
    pub fn new(
        f: impl Fn(&dyn Fn(&StoryContext) -> Value, &StoryContext) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, next: &dyn Fn(&StoryContext) -> Value, context: &StoryContext) -> Value {
        (self.0)(next, context)
    }
}

impl fmt::Debug for DecoratorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecoratorFn(..)")
    }
}

/// Interaction script run after a story renders.
#[derive(Clone)]
pub struct PlayFn(Arc<dyn Fn(&StoryContext) -> anyhow::Result<()> + Send + Sync>);

impl PlayFn {
    pub fn new(f: impl Fn(&StoryContext) -> anyhow::Result<()> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// # Errors
    ///
    /// Propagates whatever the play function reports.
    pub fn call(&self, context: &StoryContext) -> anyhow::Result<()> {
        (self.0)(context)
    }
}

impl fmt::Debug for PlayFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlayFn(..)")
    }
}

/// Cross-cutting configuration shared by every story in a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnnotations {
    #[serde(default)]
    pub parameters: Map,
    #[serde(default)]
    pub args: Map,
    #[serde(default)]
    pub arg_types: Map,
    #[serde(default)]
    pub globals: Map,
    #[serde(default)]
    pub global_types: Map,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub decorators: Vec<DecoratorFn>,
    #[serde(skip)]
    pub render: Option<RenderFn>,
}

/// A module's default export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAnnotations {
    /// Overrides the component id otherwise derived from the title.
    pub id: Option<String>,
    pub title: Option<String>,
    /// Name of the rendered component, used by the default render.
    pub component: Option<String>,
    #[serde(default)]
    pub parameters: Map,
    #[serde(default)]
    pub args: Map,
    #[serde(default)]
    pub arg_types: Map,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Export names to treat as stories. `None` means all of them.
    pub include_stories: Option<Vec<String>>,
    pub exclude_stories: Option<Vec<String>>,
    #[serde(skip)]
    pub decorators: Vec<DecoratorFn>,
    #[serde(skip)]
    pub render: Option<RenderFn>,
    #[serde(skip)]
    pub play: Option<PlayFn>,
}

/// A module's named export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryAnnotations {
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Map,
    #[serde(default)]
    pub args: Map,
    #[serde(default)]
    pub arg_types: Map,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub decorators: Vec<DecoratorFn>,
    #[serde(skip)]
    pub render: Option<RenderFn>,
    #[serde(skip)]
    pub play: Option<PlayFn>,
}

/// A loaded backing module. Its `Arc` allocation is the module's identity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleExports {
    #[serde(default)]
    pub default: Option<ComponentAnnotations>,
    #[serde(default)]
    pub exports: IndexMap<String, StoryAnnotations>,
    /// Explicit export order, when the module declares one.
    #[serde(default, rename = "__namedExportsOrder")]
    pub named_exports_order: Option<Vec<String>>,
}

impl ModuleExports {
    /// Export names in declared order, falling back to definition order.
    #[must_use]
    pub fn ordered_export_names(&self) -> Vec<&str> {
        match &self.named_exports_order {
            Some(order) => order
                .iter()
                .map(String::as_str)
                .filter(|name| self.exports.contains_key(*name))
                .collect(),
            None => self.exports.keys().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn module_deserializes_data_fields() {
        let module: ModuleExports = serde_json::from_str(
            r#"{
                "default": { "title": "Button", "args": { "label": "Hi" },
                             "excludeStories": ["helpers"] },
                "exports": {
                    "Primary": { "args": { "primary": true } },
                    "helpers": {}
                }
            }"#,
        )
        .unwrap();

        let meta = module.default.as_ref().unwrap();
        assert_eq!(meta.title.as_deref(), Some("Button"));
        assert_eq!(meta.exclude_stories, Some(vec!["helpers".to_string()]));
        assert!(meta.render.is_none());
        assert_eq!(module.ordered_export_names(), vec!["Primary", "helpers"]);
    }

    #[test]
    fn explicit_export_order_wins_and_skips_unknown_names() {
        let module: ModuleExports = serde_json::from_str(
            r#"{
                "exports": { "A": {}, "B": {} },
                "__namedExportsOrder": ["B", "Missing", "A"]
            }"#,
        )
        .unwrap();
        assert_eq!(module.ordered_export_names(), vec!["B", "A"]);
    }
}
