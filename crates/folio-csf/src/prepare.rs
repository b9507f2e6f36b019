//! Resolving metas and stories from layered annotations.
//!
//! Precedence is always story over component over project.

use folio_core::{
    Map, ModuleExports, NormalizedMeta, NormalizedStory, ProjectAnnotations, ResolvedMeta,
    ResolvedStory,
};
use serde_json::Value;

use crate::merge::{STORY_TAG, combine_args, combine_parameters, combine_tags};

const IS_ARGS_STORY: &str = "__isArgsStory";

/// Merge project annotations with one component's annotations.
///
/// The module handle is part of the memoization identity only; resolution
/// reads nothing from it beyond what `meta` already carries.
#[must_use]
pub fn prepare_meta(
    meta: &NormalizedMeta,
    project: &ProjectAnnotations,
    _module: &ModuleExports,
) -> ResolvedMeta {
    let arg_types = combine_parameters(&[&project.arg_types, &meta.arg_types]);
    let args = combine_args(&[&project.args, &meta.args]);

    ResolvedMeta {
        component_id: meta.id.clone(),
        title: meta.title.clone(),
        component: meta.component.clone(),
        tags: combine_tags(&[&project.tags, &meta.tags]),
        parameters: combine_parameters(&[&project.parameters, &meta.parameters]),
        initial_args: with_arg_type_defaults(args, &arg_types),
        arg_types,
        decorators: meta
            .decorators
            .iter()
            .chain(&project.decorators)
            .cloned()
            .collect(),
        render: meta.render.clone().or_else(|| project.render.clone()),
        play: meta.play.clone(),
    }
}

/// Merge project, component and story annotations into one definition.
#[must_use]
pub fn prepare_story(
    story: &NormalizedStory,
    meta: &NormalizedMeta,
    project: &ProjectAnnotations,
) -> ResolvedStory {
    let render = story
        .render
        .clone()
        .or_else(|| meta.render.clone())
        .or_else(|| project.render.clone());
    let mut parameters =
        combine_parameters(&[&project.parameters, &meta.parameters, &story.parameters]);
    parameters
        .entry(IS_ARGS_STORY)
        .or_insert(Value::Bool(render.is_some()));

    let arg_types =
        combine_parameters(&[&project.arg_types, &meta.arg_types, &story.arg_types]);
    let args = combine_args(&[&project.args, &meta.args, &story.args]);
    let story_tag = [STORY_TAG.to_string()];

    ResolvedStory {
        id: story.id.clone(),
        name: story.name.clone(),
        title: meta.title.clone(),
        component_id: meta.id.clone(),
        component: meta.component.clone(),
        export_name: story.export_name.clone(),
        tags: combine_tags(&[&project.tags, &meta.tags, &story.tags, &story_tag]),
        parameters,
        initial_args: with_arg_type_defaults(args, &arg_types),
        arg_types,
        decorators: story
            .decorators
            .iter()
            .chain(&meta.decorators)
            .chain(&project.decorators)
            .cloned()
            .collect(),
        render,
        play: story.play.clone().or_else(|| meta.play.clone()),
    }
}

/// Fill args missing from `args` with their arg type's `defaultValue`.
fn with_arg_type_defaults(mut args: Map, arg_types: &Map) -> Map {
    for (key, arg_type) in arg_types {
        if args.contains_key(key) {
            continue;
        }
        if let Some(default) = arg_type.get("defaultValue") {
            args.insert(key.clone(), default.clone());
        }
    }
    args
}
