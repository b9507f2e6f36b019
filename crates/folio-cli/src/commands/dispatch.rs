use folio_config::FolioConfig;
use folio_store::StoryStore;

use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    store: &StoryStore,
    config: &FolioConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Extract(args) => commands::extract::handle(&args, store, config).await,
        Commands::Export(args) => commands::export::handle(&args, store, config).await,
        Commands::Story(args) => commands::story::handle(&args, store, config).await,
        Commands::Index(args) => commands::index::handle(&args, store, config),
        Commands::Entry(args) => commands::entry::handle(&args, store, config).await,
    }
}
