use folio_config::FolioConfig;
use folio_core::{EntryKind, StoryId};
use folio_store::StoryStore;
use serde::Serialize;

use crate::cli::root_commands::EntryArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadedFile {
    import_path: String,
    stories: Vec<StoryId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadedEntry {
    id: StoryId,
    kind: EntryKind,
    import_path: String,
    exports: Vec<String>,
    files: Vec<LoadedFile>,
}

/// Handle `folio entry`.
pub async fn handle(
    args: &EntryArgs,
    store: &StoryStore,
    config: &FolioConfig,
) -> anyhow::Result<()> {
    let loaded = run(args, store).await?;
    output(&loaded, config.general.compact_output)
}

async fn run(args: &EntryArgs, store: &StoryStore) -> anyhow::Result<LoadedEntry> {
    let context = store.load_entry(&args.id).await?;
    let files = context
        .file_records
        .iter()
        .map(|record| LoadedFile {
            import_path: record.import_path.clone(),
            stories: record.story_ids().cloned().collect(),
        })
        .collect();

    Ok(LoadedEntry {
        id: context.entry.id,
        kind: context.entry.kind,
        import_path: context.entry.import_path,
        exports: context
            .module
            .ordered_export_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        files,
    })
}
