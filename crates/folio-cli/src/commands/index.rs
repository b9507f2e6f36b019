use folio_config::FolioConfig;
use folio_core::{EntryKind, IndexEntry};
use folio_store::StoryStore;

use crate::cli::root_commands::{EntryKindFilter, IndexArgs};
use crate::output::output;

/// Handle `folio index`.
pub fn handle(args: &IndexArgs, store: &StoryStore, config: &FolioConfig) -> anyhow::Result<()> {
    output(&run(args, store), config.general.compact_output)
}

fn run(args: &IndexArgs, store: &StoryStore) -> Vec<IndexEntry> {
    let wanted = args.kind.map(|kind| match kind {
        EntryKindFilter::Story => EntryKind::Story,
        EntryKindFilter::Docs => EntryKind::Docs,
    });
    store
        .index()
        .entries()
        .filter(|entry| wanted.is_none_or(|kind| entry.kind == kind))
        .cloned()
        .collect()
}
