use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Materialize every module and print the extracted stories.
    Extract(ExtractArgs),
    /// Print a legacy stories payload.
    Export(ExportArgs),
    /// Resolve and render one story.
    Story(StoryArgs),
    /// List index entries without loading any module.
    Index(IndexArgs),
    /// Load an entry and the modules it references.
    Entry(EntryArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Keep documentation-only stories
    #[arg(long)]
    pub include_docs_only: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportVersion {
    V2,
    V3,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    pub version: ExportVersion,
}

#[derive(Clone, Debug, Args)]
pub struct StoryArgs {
    /// Story id
    pub id: String,
    /// Render with the story's initial args
    #[arg(long)]
    pub force_initial_args: bool,
    /// JSON object merged into the story's args before rendering
    #[arg(long)]
    pub args: Option<String>,
    /// JSON object merged into the globals before rendering
    #[arg(long)]
    pub globals: Option<String>,
    /// Render as a documentation page would
    #[arg(long)]
    pub docs: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum EntryKindFilter {
    Story,
    Docs,
}

#[derive(Clone, Debug, Args)]
pub struct IndexArgs {
    /// Only list entries of this kind
    #[arg(long)]
    pub kind: Option<EntryKindFilter>,
}

#[derive(Clone, Debug, Args)]
pub struct EntryArgs {
    /// Entry id
    pub id: String,
}
