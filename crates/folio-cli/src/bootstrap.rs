use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use folio_config::FolioConfig;
use folio_core::{ProjectAnnotations, StoryIndex};
use folio_store::{JsonModuleLoader, StoryStore};

use crate::cli::GlobalFlags;

/// Load layered config and apply command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FolioConfig> {
    let mut config = FolioConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, flags);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut FolioConfig, flags: &GlobalFlags) {
    if let Some(index) = &flags.index {
        config.sources.index_path.clone_from(index);
    }
    if let Some(modules) = &flags.modules {
        config.sources.modules_root.clone_from(modules);
    }
    if let Some(annotations) = &flags.annotations {
        config.sources.project_annotations_path = Some(annotations.clone());
    }
    if flags.compact {
        config.general.compact_output = true;
    }
}

/// Read the index and project annotations, then build a store over the
/// JSON modules under `sources.modules_root`.
pub async fn build_store(config: &FolioConfig) -> anyhow::Result<StoryStore> {
    let index_path = Path::new(&config.sources.index_path);
    let raw_index = tokio::fs::read_to_string(index_path)
        .await
        .with_context(|| format!("failed to read story index at {}", index_path.display()))?;
    let index = StoryIndex::from_json(&raw_index)
        .with_context(|| format!("failed to parse story index at {}", index_path.display()))?;

    let project = match &config.sources.project_annotations_path {
        Some(path) => load_project_annotations(Path::new(path)).await?,
        None => ProjectAnnotations::default(),
    };

    tracing::debug!(
        entries = index.len(),
        modules = %config.sources.modules_root,
        "building story store"
    );

    let loader = Arc::new(JsonModuleLoader::new(&config.sources.modules_root));
    Ok(StoryStore::new(index, loader, project, &config.store))
}

async fn load_project_annotations(path: &Path) -> anyhow::Result<ProjectAnnotations> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read project annotations at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse project annotations at {}", path.display()))
}
