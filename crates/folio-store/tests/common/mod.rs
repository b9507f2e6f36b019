//! Shared fixtures for store integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use folio_config::StoreConfig;
use folio_core::{
    EntryKind, IndexEntry, Map, ModuleExports, ProjectAnnotations, StoryId, StoryIndex,
};
use folio_store::{InMemoryModuleLoader, StoryStore};
use serde_json::{Value, json};

pub const BUTTON: &str = "./Button.stories";
pub const CARD: &str = "./Card.stories";
pub const BUTTON_DOCS: &str = "./Button.mdx";

pub fn map(value: Value) -> Map {
    value.as_object().cloned().expect("object literal")
}

pub fn module(value: Value) -> ModuleExports {
    serde_json::from_value(value).expect("valid module")
}

pub fn story_entry(id: &str, title: &str, name: &str, import_path: &str) -> IndexEntry {
    IndexEntry {
        id: StoryId::new(id),
        title: title.to_string(),
        name: name.to_string(),
        import_path: import_path.to_string(),
        kind: EntryKind::Story,
        stories_imports: Vec::new(),
        tags: Vec::new(),
    }
}

pub fn docs_entry(id: &str, title: &str, import_path: &str, imports: &[&str]) -> IndexEntry {
    IndexEntry {
        id: StoryId::new(id),
        title: title.to_string(),
        name: "Docs".to_string(),
        import_path: import_path.to_string(),
        kind: EntryKind::Docs,
        stories_imports: imports.iter().map(ToString::to_string).collect(),
        tags: vec!["docs".to_string()],
    }
}

pub fn button_module() -> ModuleExports {
    module(json!({
        "default": {
            "title": "Button",
            "component": "Button",
            "args": { "size": "m" },
            "tags": ["autodocs"]
        },
        "exports": {
            "Primary": { "args": { "label": "Hi", "primary": true } },
            "Secondary": { "args": { "label": "Bye" }, "tags": ["beta"] }
        }
    }))
}

pub fn card_module() -> ModuleExports {
    module(json!({
        "default": { "title": "Card" },
        "exports": {
            "Basic": {},
            "__page": { "parameters": { "__id": "card--page" } }
        }
    }))
}

/// Two story modules plus one docs page referencing the button module.
pub fn index() -> StoryIndex {
    StoryIndex::from_entries([
        docs_entry("button--docs", "Button", BUTTON_DOCS, &[BUTTON]),
        story_entry("button--primary", "Button", "Primary", BUTTON),
        story_entry("button--secondary", "Button", "Secondary", BUTTON),
        story_entry("card--basic", "Card", "Basic", CARD),
        story_entry("card--page", "Card", "Page", CARD),
    ])
}

pub fn loader() -> InMemoryModuleLoader {
    InMemoryModuleLoader::new()
        .with_module(BUTTON, button_module())
        .with_module(CARD, card_module())
        .with_module(BUTTON_DOCS, ModuleExports::default())
}

pub fn project() -> ProjectAnnotations {
    serde_json::from_value(json!({
        "parameters": { "layout": "centered" },
        "globals": { "locale": "en" },
        "globalTypes": { "theme": { "defaultValue": "light" } }
    }))
    .expect("valid project annotations")
}

pub fn store_with(loader: Arc<InMemoryModuleLoader>) -> StoryStore {
    StoryStore::new(index(), loader, project(), &StoreConfig::default())
}

pub fn store() -> (StoryStore, Arc<InMemoryModuleLoader>) {
    let loader = Arc::new(loader());
    (store_with(Arc::clone(&loader)), loader)
}
