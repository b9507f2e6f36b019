use folio_config::FolioConfig;
use folio_core::StoryId;
use folio_store::{ExtractOptions, ExtractedStory, StoryStore};
use indexmap::IndexMap;

use crate::cli::root_commands::ExtractArgs;
use crate::output::output;

/// Handle `folio extract`.
pub async fn handle(
    args: &ExtractArgs,
    store: &StoryStore,
    config: &FolioConfig,
) -> anyhow::Result<()> {
    let stories = run(args, store, config).await?;
    output(&stories, config.general.compact_output)
}

async fn run(
    args: &ExtractArgs,
    store: &StoryStore,
    config: &FolioConfig,
) -> anyhow::Result<IndexMap<StoryId, ExtractedStory>> {
    store.materialize_all().await?;
    let options = ExtractOptions {
        include_docs_only: args.include_docs_only || config.general.include_docs_only,
    };
    Ok(store.extract(options)?)
}
