//! Turning a loaded module into a structured file record.

use std::sync::Arc;

use folio_core::ids::{component_id, story_name_from_export, to_id};
use folio_core::{
    ComponentAnnotations, CsfFile, ModuleExports, NormalizedMeta, NormalizedStory, StoryId,
};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::CsfError;
use crate::normalize::normalize_input_types;

/// Export name of a documentation-only page.
const PAGE_EXPORT: &str = "__page";

/// Split a loaded module into normalized component annotations and
/// per-story annotations.
///
/// `title` comes from the index, which may have derived it from naming
/// conventions the module itself does not know about. A module without a
/// default export is processed against empty component annotations.
///
/// # Errors
///
/// Returns [`CsfError::InvalidId`] when the title or a story name cannot be
/// sanitized into an id, and [`CsfError::DuplicateStoryId`] when two exports
/// collide.
pub fn process_module(
    module: &Arc<ModuleExports>,
    import_path: &str,
    title: &str,
) -> Result<CsfFile, CsfError> {
    let invalid = |source| CsfError::InvalidId {
        import_path: import_path.to_string(),
        source,
    };

    let empty = ComponentAnnotations::default();
    let default = module.default.as_ref().unwrap_or(&empty);
    let meta = normalize_meta(default, import_path, title).map_err(invalid)?;

    let mut stories: IndexMap<StoryId, Arc<NormalizedStory>> = IndexMap::new();
    for export_name in module.ordered_export_names() {
        if !is_export_story(export_name, default) {
            continue;
        }
        let Some(annotations) = module.exports.get(export_name) else {
            continue;
        };

        let name_from_export = story_name_from_export(export_name);
        let mut parameters = annotations.parameters.clone();
        if export_name == PAGE_EXPORT {
            parameters.insert("docsOnly".to_string(), Value::Bool(true));
        }
        let id = match parameters.get("__id").and_then(Value::as_str) {
            Some(explicit) => StoryId::new(explicit),
            None => to_id(&meta.id, &name_from_export).map_err(invalid)?,
        };

        let story = NormalizedStory {
            id: id.clone(),
            name: annotations.name.clone().unwrap_or(name_from_export),
            export_name: export_name.to_string(),
            parameters,
            args: annotations.args.clone(),
            arg_types: normalize_input_types(&annotations.arg_types),
            tags: annotations.tags.clone(),
            decorators: annotations.decorators.clone(),
            render: annotations.render.clone(),
            play: annotations.play.clone(),
        };

        if stories.insert(id.clone(), Arc::new(story)).is_some() {
            return Err(CsfError::DuplicateStoryId {
                id,
                import_path: import_path.to_string(),
            });
        }
    }

    tracing::trace!(import_path, stories = stories.len(), "processed module");

    Ok(CsfFile {
        import_path: import_path.to_string(),
        meta: Arc::new(meta),
        stories,
        module: Arc::clone(module),
    })
}

fn normalize_meta(
    default: &ComponentAnnotations,
    import_path: &str,
    title: &str,
) -> Result<NormalizedMeta, folio_core::CoreError> {
    let id = component_id(default.id.as_deref().unwrap_or(title))?;
    let mut parameters = default.parameters.clone();
    parameters.insert(
        "fileName".to_string(),
        Value::String(import_path.to_string()),
    );

    Ok(NormalizedMeta {
        id,
        title: title.to_string(),
        component: default.component.clone(),
        parameters,
        args: default.args.clone(),
        arg_types: normalize_input_types(&default.arg_types),
        tags: default.tags.clone(),
        decorators: default.decorators.clone(),
        render: default.render.clone(),
        play: default.play.clone(),
    })
}

fn is_export_story(export_name: &str, meta: &ComponentAnnotations) -> bool {
    let included = meta
        .include_stories
        .as_ref()
        .is_none_or(|names| names.iter().any(|n| n == export_name));
    let excluded = meta
        .exclude_stories
        .as_ref()
        .is_some_and(|names| names.iter().any(|n| n == export_name));
    included && !excluded
}
