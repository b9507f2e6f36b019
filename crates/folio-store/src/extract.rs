//! Read-only projections of the materialized store.

use folio_core::{Map, ResolvedStory, StoryId};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::StoryStore;

/// Parameters kept by the v3 export.
const V3_PARAMETERS: [&str; 5] = ["fileName", "docsOnly", "framework", "__id", "__isArgsStory"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub include_docs_only: bool,
}

/// A resolved story without its callables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedStory {
    pub id: StoryId,
    pub name: String,
    pub title: String,
    pub kind: String,
    pub story: String,
    pub component_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub import_path: String,
    pub export_name: String,
    /// Sorted.
    pub tags: Vec<String>,
    pub parameters: Map,
    pub initial_args: Map,
    /// Same as `initial_args`.
    pub args: Map,
    pub arg_types: Map,
}

impl ExtractedStory {
    fn new(story: &ResolvedStory, import_path: &str) -> Self {
        let mut tags = story.tags.clone();
        tags.sort();
        Self {
            id: story.id.clone(),
            name: story.name.clone(),
            title: story.title.clone(),
            kind: story.kind().to_string(),
            story: story.story().to_string(),
            component_id: story.component_id.clone(),
            component: story.component.clone(),
            import_path: import_path.to_string(),
            export_name: story.export_name.clone(),
            tags,
            parameters: story.parameters.clone(),
            initial_args: story.initial_args.clone(),
            args: story.initial_args.clone(),
            arg_types: story.arg_types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoriesExportV2 {
    pub v: u8,
    pub globals: Map,
    pub global_parameters: Map,
    pub kind_parameters: IndexMap<String, Map>,
    pub stories: IndexMap<StoryId, ExtractedStory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryV3 {
    pub id: StoryId,
    pub title: String,
    pub name: String,
    pub import_path: String,
    pub kind: String,
    pub story: String,
    pub parameters: Map,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoriesExportV3 {
    pub v: u8,
    pub stories: IndexMap<StoryId, StoryV3>,
}

impl StoryStore {
    /// Snapshot every indexed story, in index order.
    ///
    /// Docs entries are skipped. Docs-only stories are skipped unless
    /// `include_docs_only` is set.
    ///
    /// # Errors
    ///
    /// [`StoreError::ExtractBeforeMaterialize`] before `materialize_all`,
    /// [`StoreError::MissingFileRecord`] if an import path was not
    /// materialized.
    pub fn extract(
        &self,
        options: ExtractOptions,
    ) -> Result<IndexMap<StoryId, ExtractedStory>, StoreError> {
        let records = self.materialized("extract")?;
        let index = self.index();

        let mut stories = IndexMap::new();
        for entry in index.entries().filter(|entry| !entry.is_docs()) {
            let record = records
                .get(&entry.import_path)
                .ok_or_else(|| StoreError::MissingFileRecord(entry.import_path.clone()))?;
            let story = self.resolve_story(entry.id.as_str(), record)?;
            if story.is_docs_only() && !options.include_docs_only {
                continue;
            }
            stories.insert(
                story.id.clone(),
                ExtractedStory::new(&story, &entry.import_path),
            );
        }
        Ok(stories)
    }

    /// Flat payload for consumers of the v2 stories format.
    ///
    /// # Errors
    ///
    /// Same as [`StoryStore::extract`].
    pub fn export_v2(&self) -> Result<StoriesExportV2, StoreError> {
        let stories = self.extract(ExtractOptions {
            include_docs_only: true,
        })?;
        let kind_parameters = stories
            .values()
            .map(|story| (story.title.clone(), Map::new()))
            .collect();

        Ok(StoriesExportV2 {
            v: 2,
            globals: self.globals(),
            global_parameters: Map::new(),
            kind_parameters,
            stories,
        })
    }

    /// Payload for consumers of the v3 stories format.
    ///
    /// # Errors
    ///
    /// Same as [`StoryStore::extract`].
    pub fn export_v3(&self) -> Result<StoriesExportV3, StoreError> {
        let stories = self
            .extract(ExtractOptions {
                include_docs_only: true,
            })?
            .into_iter()
            .map(|(id, story)| {
                let mut parameters: Map = V3_PARAMETERS
                    .iter()
                    .filter_map(|key| {
                        story
                            .parameters
                            .get(*key)
                            .map(|value| ((*key).to_string(), value.clone()))
                    })
                    .collect();
                parameters.insert(
                    "fileName".to_string(),
                    Value::String(story.import_path.clone()),
                );

                let v3 = StoryV3 {
                    id: story.id,
                    title: story.title,
                    name: story.name,
                    import_path: story.import_path,
                    kind: story.kind,
                    story: story.story,
                    parameters,
                };
                (id, v3)
            })
            .collect();

        Ok(StoriesExportV3 { v: 3, stories })
    }
}
