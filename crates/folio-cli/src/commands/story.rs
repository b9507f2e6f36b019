use anyhow::Context;
use folio_config::FolioConfig;
use folio_core::{Map, StoryId, ViewMode};
use folio_store::{ContextOptions, StoryStore};
use serde::Serialize;
use serde_json::Value;

use crate::cli::root_commands::StoryArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedStory {
    id: StoryId,
    title: String,
    name: String,
    view_mode: ViewMode,
    args: Map,
    globals: Map,
    rendered: Value,
}

/// Handle `folio story`.
pub async fn handle(
    args: &StoryArgs,
    store: &StoryStore,
    config: &FolioConfig,
) -> anyhow::Result<()> {
    let rendered = run(args, store).await?;
    output(&rendered, config.general.compact_output)
}

async fn run(args: &StoryArgs, store: &StoryStore) -> anyhow::Result<RenderedStory> {
    let story = store
        .load_story(&args.id)
        .await
        .with_context(|| format!("failed to load story '{}'", args.id))?;

    if let Some(raw) = &args.args {
        store.update_args(&args.id, parse_object(raw, "--args")?)?;
    }
    if let Some(raw) = &args.globals {
        store.update_globals(parse_object(raw, "--globals")?);
    }

    let view_mode = if args.docs {
        ViewMode::Docs
    } else {
        ViewMode::Story
    };
    let context = store.story_context(
        &story,
        ContextOptions {
            force_initial_args: args.force_initial_args,
            view_mode,
        },
    );
    context.hooks.record_render();
    let rendered = folio_csf::render_story(&context);
    store.release_hooks(&story);

    Ok(RenderedStory {
        id: story.id.clone(),
        title: story.title.clone(),
        name: story.name.clone(),
        view_mode,
        args: context.args,
        globals: context.globals,
        rendered,
    })
}

fn parse_object(raw: &str, flag: &str) -> anyhow::Result<Map> {
    let value: Value =
        serde_json::from_str(raw).with_context(|| format!("{flag} must be valid JSON"))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("{flag} must be a JSON object"),
    }
}
