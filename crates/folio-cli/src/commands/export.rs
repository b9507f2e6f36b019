use folio_config::FolioConfig;
use folio_store::StoryStore;
use serde_json::Value;

use crate::cli::root_commands::{ExportArgs, ExportVersion};
use crate::output::output;

/// Handle `folio export`.
pub async fn handle(
    args: &ExportArgs,
    store: &StoryStore,
    config: &FolioConfig,
) -> anyhow::Result<()> {
    let payload = run(args, store).await?;
    output(&payload, config.general.compact_output)
}

async fn run(args: &ExportArgs, store: &StoryStore) -> anyhow::Result<Value> {
    store.materialize_all().await?;
    let payload = match args.version {
        ExportVersion::V2 => serde_json::to_value(store.export_v2()?)?,
        ExportVersion::V3 => serde_json::to_value(store.export_v3()?)?,
    };
    Ok(payload)
}
