//! The story store: lazy loading, memoized resolution and the live state
//! attached to resolved stories.

use std::sync::Arc;

use folio_config::StoreConfig;
use folio_core::{
    CsfFile, Hooks, IndexEntry, Map, ModuleExports, NormalizedMeta, NormalizedStory,
    ProjectAnnotations, ResolvedMeta, ResolvedStory, StoryContext, StoryId, StoryIndex, ViewMode,
};
use folio_csf::{normalize_project_annotations, prepare_context, prepare_meta, prepare_story};
use futures::future::{try_join, try_join_all};
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::args::ArgsStore;
use crate::error::StoreError;
use crate::globals::GlobalsStore;
use crate::hooks::HookRegistry;
use crate::index::IndexAccessor;
use crate::loader::ModuleLoader;
use crate::memo::{CacheStats, Identity, MemoCache};

/// Processed file records keyed by import path, in index order.
pub type FileRecords = IndexMap<String, Arc<CsfFile>>;

type CsfKey = (Identity<ModuleExports>, String, String);
type MetaKey = (
    Identity<NormalizedMeta>,
    Identity<ProjectAnnotations>,
    Identity<ModuleExports>,
);
type StoryKey = (
    Identity<NormalizedStory>,
    Identity<NormalizedMeta>,
    Identity<ProjectAnnotations>,
);

/// New sources for [`StoryStore::on_sources_changed`]. `None` keeps the
/// current value.
#[derive(Default)]
pub struct SourcesUpdate {
    pub loader: Option<Arc<dyn ModuleLoader>>,
    pub index: Option<StoryIndex>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextOptions {
    /// Use the story's initial args instead of the live ones.
    pub force_initial_args: bool,
    pub view_mode: ViewMode,
}

/// What a documentation or story entry needs before it can render.
#[derive(Debug, Clone)]
pub struct EntryContext {
    pub entry: IndexEntry,
    pub module: Arc<ModuleExports>,
    /// One record per related import path, for docs entries only.
    pub file_records: Vec<Arc<CsfFile>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreCacheStats {
    pub csf_files: CacheStats,
    pub metas: CacheStats,
    pub stories: CacheStats,
    pub hooks: usize,
    pub materialized_files: Option<usize>,
}

pub struct StoryStore {
    index: IndexAccessor,
    loader: RwLock<Arc<dyn ModuleLoader>>,
    project: RwLock<Arc<ProjectAnnotations>>,
    csf_files: MemoCache<CsfKey, CsfFile>,
    metas: MemoCache<MetaKey, ResolvedMeta>,
    stories: MemoCache<StoryKey, ResolvedStory>,
    materialized: RwLock<Option<Arc<FileRecords>>>,
    hooks: HookRegistry,
    args: ArgsStore,
    globals: GlobalsStore,
}

impl StoryStore {
    pub fn new(
        index: StoryIndex,
        loader: Arc<dyn ModuleLoader>,
        project: ProjectAnnotations,
        config: &StoreConfig,
    ) -> Self {
        let project = normalize_project_annotations(project);
        let globals = GlobalsStore::new(&project.globals, &project.global_types);
        Self {
            index: IndexAccessor::new(index),
            loader: RwLock::new(loader),
            project: RwLock::new(Arc::new(project)),
            csf_files: MemoCache::new("csf_files", config.csf_cache_capacity),
            metas: MemoCache::new("metas", config.meta_cache_capacity),
            stories: MemoCache::new("stories", config.story_cache_capacity),
            materialized: RwLock::new(None),
            hooks: HookRegistry::new(),
            args: ArgsStore::new(),
            globals,
        }
    }

    /// Replace the project annotations and reset globals to their new
    /// defaults.
    ///
    /// Cached metas and stories keyed on the old annotations stay in their
    /// caches until evicted; lookups with the new annotations miss them.
    pub fn set_project_annotations(&self, project: ProjectAnnotations) {
        let project = normalize_project_annotations(project);
        self.globals.set(&project.globals, &project.global_types);
        *self.project.write() = Arc::new(project);
        tracing::debug!("project annotations replaced");
    }

    #[must_use]
    pub fn project_annotations(&self) -> Arc<ProjectAnnotations> {
        Arc::clone(&*self.project.read())
    }

    /// Swap the loader and/or index. A materialized map is rebuilt against
    /// the new sources right away.
    ///
    /// # Errors
    ///
    /// Returns the rebuild's error. The stale map is dropped in that case,
    /// so synchronous bulk operations fail until the next `materialize_all`.
    pub async fn on_sources_changed(&self, update: SourcesUpdate) -> Result<(), StoreError> {
        if let Some(loader) = update.loader {
            *self.loader.write() = loader;
        }
        if let Some(index) = update.index {
            self.index.replace(index);
        }
        if !self.is_materialized() {
            return Ok(());
        }

        match self.load_all_file_records().await {
            Ok(records) => {
                tracing::debug!(files = records.len(), "materialized map rebuilt");
                *self.materialized.write() = Some(Arc::new(records));
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to rebuild materialized map; clearing it");
                *self.materialized.write() = None;
                Err(error)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if `id` is not indexed.
    pub fn index_entry(&self, id: &str) -> Result<IndexEntry, StoreError> {
        self.index.entry(id)
    }

    #[must_use]
    pub fn index(&self) -> Arc<StoryIndex> {
        self.index.snapshot()
    }

    /// Load the module backing `id` and process it into a file record.
    ///
    /// The title comes from the index entry.
    ///
    /// # Errors
    ///
    /// Index lookup, loader and processing errors.
    pub async fn load_file_record(&self, id: &str) -> Result<Arc<CsfFile>, StoreError> {
        let entry = self.index.entry(id)?;
        let loader = Arc::clone(&*self.loader.read());
        let module = loader.load(&entry.import_path).await?;
        self.process(&module, &entry.import_path, &entry.title)
    }

    /// File records for every import path in the index, loaded
    /// concurrently. The first failure fails the whole call.
    ///
    /// # Errors
    ///
    /// The first error raised by any single load.
    pub async fn load_all_file_records(&self) -> Result<FileRecords, StoreError> {
        let representatives = self.index.snapshot().import_path_representatives();
        let loads = representatives.iter().map(|(import_path, id)| async move {
            let record = self.load_file_record(id.as_str()).await?;
            Ok::<_, StoreError>((import_path.clone(), record))
        });
        let records = try_join_all(loads).await?;
        Ok(records.into_iter().collect())
    }

    /// Load every file record and keep them for synchronous bulk access.
    ///
    /// # Errors
    ///
    /// Same as [`StoryStore::load_all_file_records`]. On error no map is
    /// stored.
    pub async fn materialize_all(&self) -> Result<(), StoreError> {
        let records = self.load_all_file_records().await?;
        tracing::debug!(files = records.len(), "materialized all file records");
        *self.materialized.write() = Some(Arc::new(records));
        Ok(())
    }

    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.materialized.read().is_some()
    }

    pub(crate) fn materialized(
        &self,
        operation: &'static str,
    ) -> Result<Arc<FileRecords>, StoreError> {
        self.materialized
            .read()
            .clone()
            .ok_or(StoreError::ExtractBeforeMaterialize { operation })
    }

    /// Synchronous file record lookup through the materialized map.
    ///
    /// # Errors
    ///
    /// [`StoreError::ExtractBeforeMaterialize`] without a map,
    /// [`StoreError::EntryNotFound`] for unknown ids and
    /// [`StoreError::MissingFileRecord`] if the map lacks the import path.
    pub fn file_record_for_story_sync(&self, id: &str) -> Result<Arc<CsfFile>, StoreError> {
        let records = self.materialized("file_record_for_story_sync")?;
        let entry = self.index.entry(id)?;
        records
            .get(&entry.import_path)
            .cloned()
            .ok_or(StoreError::MissingFileRecord(entry.import_path))
    }

    pub fn resolve_meta(&self, record: &CsfFile) -> Arc<ResolvedMeta> {
        let project = self.project_annotations();
        let key = (
            Identity::of(&record.meta),
            Identity::of(&project),
            Identity::of(&record.module),
        );
        self.metas
            .get_or_insert_with(key, || prepare_meta(&record.meta, &project, &record.module))
    }

    /// Resolve one story of a loaded file, seed its args and make sure it
    /// has a hook handle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StoryNotInFile`] if the record lacks `id`.
    pub fn resolve_story(
        &self,
        id: &str,
        record: &CsfFile,
    ) -> Result<Arc<ResolvedStory>, StoreError> {
        let annotations = record
            .story(id)
            .ok_or_else(|| StoreError::StoryNotInFile {
                id: StoryId::new(id),
                import_path: record.import_path.clone(),
            })?;
        let project = self.project_annotations();
        let key = (
            Identity::of(annotations),
            Identity::of(&record.meta),
            Identity::of(&project),
        );
        let story = self.stories.get_or_insert_with(key, || {
            prepare_story(annotations, &record.meta, &project)
        });

        self.args.set_initial(&story);
        self.hooks.ensure(&story.id);
        Ok(story)
    }

    /// Every indexed story backed by `record`, in index order.
    ///
    /// # Errors
    ///
    /// Same as [`StoryStore::resolve_story`].
    pub fn resolve_stories_in_file(
        &self,
        record: &CsfFile,
    ) -> Result<Vec<Arc<ResolvedStory>>, StoreError> {
        self.index
            .snapshot()
            .entries()
            .filter(|entry| record.contains(entry.id.as_str()))
            .map(|entry| self.resolve_story(entry.id.as_str(), record))
            .collect()
    }

    /// Load and resolve a single story.
    ///
    /// # Errors
    ///
    /// Any error from [`StoryStore::load_file_record`] or
    /// [`StoryStore::resolve_story`].
    pub async fn load_story(&self, id: &str) -> Result<Arc<ResolvedStory>, StoreError> {
        let record = self.load_file_record(id).await?;
        self.resolve_story(id, &record)
    }

    /// Load an entry's module and, for docs entries, the file records of
    /// every module it references. All loads run concurrently.
    ///
    /// # Errors
    ///
    /// [`StoreError::EntryNotFound`] for unknown ids,
    /// [`StoreError::ImportPathNotFound`] for referenced paths no entry uses,
    /// and the first loader or processing error.
    pub async fn load_entry(&self, id: &str) -> Result<EntryContext, StoreError> {
        let entry = self.index.entry(id)?;
        let related: Vec<StoryId> = if entry.is_docs() {
            entry
                .stories_imports
                .iter()
                .map(|path| self.index.entry_for_import_path(path).map(|e| e.id))
                .collect::<Result<_, _>>()?
        } else {
            Vec::new()
        };

        let loader = Arc::clone(&*self.loader.read());
        let primary = async {
            loader
                .load(&entry.import_path)
                .await
                .map_err(StoreError::from)
        };
        let records = try_join_all(related.iter().map(|id| self.load_file_record(id.as_str())));
        let (module, file_records) = try_join(primary, records).await?;

        Ok(EntryContext {
            entry,
            module,
            file_records,
        })
    }

    /// Combine a resolved story with live args, globals and its hook handle.
    #[must_use]
    pub fn story_context(
        &self,
        story: &Arc<ResolvedStory>,
        options: ContextOptions,
    ) -> StoryContext {
        let args = if options.force_initial_args {
            story.initial_args.clone()
        } else {
            self.args
                .get(story.id.as_str())
                .unwrap_or_else(|| story.initial_args.clone())
        };
        let hooks = self.hooks.ensure(&story.id);
        prepare_context(story, args, self.globals.get(), hooks, options.view_mode)
    }

    /// Run the story's hook cleanups and drop its handle. Returns whether a
    /// handle existed.
    pub fn release_hooks(&self, story: &ResolvedStory) -> bool {
        self.hooks.release(story.id.as_str())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::UnknownStoryArgs`] for never-resolved stories.
    pub fn update_args(&self, id: &str, delta: Map) -> Result<Map, StoreError> {
        self.args.update(id, delta)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::UnknownStoryArgs`] for never-resolved stories.
    pub fn reset_args(&self, id: &str, names: Option<&[String]>) -> Result<Map, StoreError> {
        self.args.reset(id, names)
    }

    #[must_use]
    pub fn args(&self, id: &str) -> Option<Map> {
        self.args.get(id)
    }

    pub fn update_globals(&self, delta: Map) -> Map {
        self.globals.update(delta)
    }

    #[must_use]
    pub fn globals(&self) -> Map {
        self.globals.get()
    }

    #[must_use]
    pub fn hook_handle(&self, id: &str) -> Option<Arc<Hooks>> {
        self.hooks.get(id)
    }

    #[must_use]
    pub fn cache_stats(&self) -> StoreCacheStats {
        StoreCacheStats {
            csf_files: self.csf_files.stats(),
            metas: self.metas.stats(),
            stories: self.stories.stats(),
            hooks: self.hooks.len(),
            materialized_files: self.materialized.read().as_ref().map(|m| m.len()),
        }
    }

    fn process(
        &self,
        module: &Arc<ModuleExports>,
        import_path: &str,
        title: &str,
    ) -> Result<Arc<CsfFile>, StoreError> {
        let key = (
            Identity::of(module),
            import_path.to_string(),
            title.to_string(),
        );
        self.csf_files
            .try_get_or_insert_with(key, || {
                folio_csf::process_module(module, import_path, title)
            })
            .map_err(StoreError::from)
    }
}
