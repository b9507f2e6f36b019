//! Live args per story.

use std::collections::HashMap;

use folio_core::{Map, ResolvedStory, StoryId};
use parking_lot::RwLock;

use crate::error::StoreError;

#[derive(Debug, Clone)]
struct ArgsEntry {
    initial: Map,
    current: Map,
}

#[derive(Debug, Default)]
pub struct ArgsStore {
    entries: RwLock<HashMap<StoryId, ArgsEntry>>,
}

impl ArgsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed args for a story seen for the first time.
    ///
    /// When a story comes back with different initial args, the user's
    /// edits (current values that differ from the old initial ones) are
    /// reapplied on top of the new initial args. Untouched keys follow the
    /// new initial values.
    pub fn set_initial(&self, story: &ResolvedStory) {
        let mut entries = self.entries.write();
        let Some(entry) = entries.get_mut(&story.id) else {
            entries.insert(
                story.id.clone(),
                ArgsEntry {
                    initial: story.initial_args.clone(),
                    current: story.initial_args.clone(),
                },
            );
            return;
        };
        if entry.initial == story.initial_args {
            return;
        }

        let edits: Map = entry
            .current
            .iter()
            .filter(|(key, value)| entry.initial.get(*key) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entry.initial = story.initial_args.clone();
        entry.current = entry.initial.clone();
        entry.current.extend(edits);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Map> {
        self.entries.read().get(id).map(|e| e.current.clone())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    /// Shallow-merge `delta` into the current args. `null` is stored as a
    /// value, not treated as removal.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownStoryArgs`] if the story was never seeded.
    pub fn update(&self, id: &str, delta: Map) -> Result<Map, StoreError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownStoryArgs(StoryId::new(id)))?;
        entry.current.extend(delta);
        Ok(entry.current.clone())
    }

    /// Restore `names` (or every arg when `None`) to the initial values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownStoryArgs`] if the story was never seeded.
    pub fn reset(&self, id: &str, names: Option<&[String]>) -> Result<Map, StoreError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownStoryArgs(StoryId::new(id)))?;
        match names {
            None => entry.current = entry.initial.clone(),
            Some(names) => {
                for name in names {
                    match entry.initial.get(name) {
                        Some(value) => entry.current.insert(name.clone(), value.clone()),
                        None => entry.current.remove(name),
                    };
                }
            }
        }
        Ok(entry.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn map(value: Value) -> Map {
        value.as_object().cloned().unwrap()
    }

    fn story(initial_args: Value) -> ResolvedStory {
        ResolvedStory {
            id: StoryId::new("button--primary"),
            name: "Primary".into(),
            title: "Button".into(),
            component_id: "button".into(),
            component: None,
            export_name: "Primary".into(),
            tags: vec!["story".into()],
            parameters: Map::new(),
            initial_args: map(initial_args),
            arg_types: Map::new(),
            decorators: Vec::new(),
            render: None,
            play: None,
        }
    }

    #[test]
    fn seeding_keeps_existing_values() {
        let store = ArgsStore::new();
        store.set_initial(&story(json!({ "label": "Hi" })));
        store
            .update("button--primary", map(json!({ "label": "Edited" })))
            .unwrap();

        store.set_initial(&story(json!({ "label": "Hi" })));

        assert_eq!(
            store.get("button--primary"),
            Some(map(json!({ "label": "Edited" })))
        );
    }

    #[test]
    fn changed_initial_values_keep_user_edits() {
        let store = ArgsStore::new();
        store.set_initial(&story(json!({ "label": "Hi", "size": "s", "gone": 1 })));
        store
            .update("button--primary", map(json!({ "label": "Edited", "size": "m" })))
            .unwrap();

        store.set_initial(&story(json!({ "label": "Hi", "size": "l", "tone": "info" })));

        assert_eq!(
            store.get("button--primary"),
            Some(map(json!({ "label": "Edited", "size": "m", "tone": "info" })))
        );
        let reset = store.reset("button--primary", None).unwrap();
        assert_eq!(reset, map(json!({ "label": "Hi", "size": "l", "tone": "info" })));
    }

    #[test]
    fn untouched_keys_follow_new_initial_values() {
        let store = ArgsStore::new();
        store.set_initial(&story(json!({ "label": "Hi", "size": "s" })));

        store.set_initial(&story(json!({ "label": "Hello", "size": "s" })));

        assert_eq!(
            store.get("button--primary"),
            Some(map(json!({ "label": "Hello", "size": "s" })))
        );
    }

    #[test]
    fn update_keeps_null_and_reset_restores() {
        let store = ArgsStore::new();
        store.set_initial(&story(json!({ "label": "Hi", "size": "s" })));

        let updated = store
            .update("button--primary", map(json!({ "label": null, "extra": true })))
            .unwrap();
        assert_eq!(updated, map(json!({ "label": null, "size": "s", "extra": true })));

        let partial = store
            .reset("button--primary", Some(&["label".to_string(), "extra".to_string()]))
            .unwrap();
        assert_eq!(partial, map(json!({ "label": "Hi", "size": "s" })));

        store
            .update("button--primary", map(json!({ "size": "xl" })))
            .unwrap();
        let full = store.reset("button--primary", None).unwrap();
        assert_eq!(full, map(json!({ "label": "Hi", "size": "s" })));
    }

    #[test]
    fn unseeded_story_is_rejected() {
        let store = ArgsStore::new();
        assert!(matches!(
            store.update("nope", Map::new()),
            Err(StoreError::UnknownStoryArgs(_))
        ));
        assert!(store.get("nope").is_none());
    }
}
