//! Stories bound to a ready-made context.

use std::sync::Arc;

use folio_core::{ResolvedStory, StoryContext};
use folio_csf::render_story;
use serde_json::Value;

use crate::error::StoreError;
use crate::extract::ExtractOptions;
use crate::store::{ContextOptions, StoryStore};

/// A resolved story paired with the context it was bound to.
#[derive(Debug, Clone)]
pub struct BoundStory {
    pub story: Arc<ResolvedStory>,
    pub context: StoryContext,
}

impl BoundStory {
    /// Render through the story's decorators.
    #[must_use]
    pub fn call(&self) -> Value {
        self.context.hooks.record_render();
        render_story(&self.context)
    }

    /// Run the play function, if any.
    ///
    /// # Errors
    ///
    /// Whatever the play function reports.
    pub fn play(&self) -> anyhow::Result<()> {
        match &self.story.play {
            Some(play) => play.call(&self.context),
            None => Ok(()),
        }
    }
}

impl StoryStore {
    /// Resolve a story synchronously and bind it to a fresh context.
    ///
    /// Prefer [`StoryStore::load_story`] with [`StoryStore::story_context`].
    ///
    /// # Errors
    ///
    /// [`StoreError::ExtractBeforeMaterialize`] before `materialize_all`,
    /// checked before any lookup. Otherwise the lookup and resolution errors.
    #[deprecated(note = "use load_story and story_context")]
    pub fn bound_story(&self, id: &str) -> Result<BoundStory, StoreError> {
        self.materialized("bound_story")?;
        let record = self.file_record_for_story_sync(id)?;
        let story = self.resolve_story(id, &record)?;
        let context = self.story_context(&story, ContextOptions::default());
        Ok(BoundStory { story, context })
    }

    /// Every extracted story, bound.
    ///
    /// # Errors
    ///
    /// Same as [`StoryStore::extract`].
    pub fn raw(&self) -> Result<Vec<BoundStory>, StoreError> {
        let ids: Vec<_> = self
            .extract(ExtractOptions::default())?
            .into_keys()
            .collect();
        ids.iter()
            .map(|id| {
                let record = self.file_record_for_story_sync(id.as_str())?;
                let story = self.resolve_story(id.as_str(), &record)?;
                let context = self.story_context(&story, ContextOptions::default());
                Ok(BoundStory { story, context })
            })
            .collect()
    }
}
