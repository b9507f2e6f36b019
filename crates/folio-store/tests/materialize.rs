//! Materialization, extraction, legacy exports and bound stories.

mod common;

use std::sync::Arc;

use folio_core::{ModuleExports, RenderFn, StoryIndex};
use folio_store::{ExtractOptions, InMemoryModuleLoader, SourcesUpdate, StoreError};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{BUTTON, BUTTON_DOCS, CARD, loader, map, story_entry, store, store_with};

#[tokio::test]
async fn extract_requires_materialization() {
    let (store, _) = store();

    let err = store.extract(ExtractOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ExtractBeforeMaterialize { operation: "extract" }
    ));

    store.materialize_all().await.unwrap();
    let stories = store.extract(ExtractOptions::default()).unwrap();

    let ids: Vec<&str> = stories.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["button--primary", "button--secondary", "card--basic"]);
    assert!(!stories.contains_key("button--docs"));
}

#[tokio::test]
async fn docs_only_stories_are_opt_in() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let stories = store
        .extract(ExtractOptions {
            include_docs_only: true,
        })
        .unwrap();

    assert!(stories.contains_key("card--page"));
    assert_eq!(stories["card--page"].parameters["docsOnly"], json!(true));
    assert!(!stories.contains_key("button--docs"));
}

#[tokio::test]
async fn one_failed_load_fails_materialization() {
    let loader = Arc::new(loader().with_failure(CARD, "disk on fire"));
    let store = store_with(Arc::clone(&loader));

    let err = store.materialize_all().await.unwrap_err();

    assert!(matches!(err, StoreError::Loader(_)));
    assert!(!store.is_materialized());
    assert!(matches!(
        store.extract(ExtractOptions::default()),
        Err(StoreError::ExtractBeforeMaterialize { .. })
    ));
    assert_eq!(loader.calls(CARD), 1);
}

#[tokio::test]
async fn materialization_loads_each_module_once() {
    let (store, loader) = store();

    let records = store.load_all_file_records().await.unwrap();

    let paths: Vec<&str> = records.keys().map(String::as_str).collect();
    assert_eq!(paths, vec![BUTTON_DOCS, BUTTON, CARD]);
    assert_eq!(loader.calls(BUTTON), 1);
    assert_eq!(loader.calls(CARD), 1);
    assert_eq!(loader.calls(BUTTON_DOCS), 1);
}

#[tokio::test]
async fn extracted_snapshot_strips_callables_and_sorts_tags() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let stories = store.extract(ExtractOptions::default()).unwrap();
    let secondary = &stories["button--secondary"];

    assert_eq!(secondary.tags, vec!["autodocs", "beta", "story"]);
    assert_eq!(secondary.kind, "Button");
    assert_eq!(secondary.story, "Secondary");
    assert_eq!(secondary.import_path, BUTTON);
    assert_eq!(secondary.args, secondary.initial_args);

    let value = serde_json::to_value(secondary).unwrap();
    assert_eq!(value["componentId"], json!("button"));
    assert_eq!(value["args"], json!({ "size": "m", "label": "Bye" }));
    assert!(value.get("render").is_none());
}

#[tokio::test]
async fn export_v2_is_a_flat_payload() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let export = store.export_v2().unwrap();
    let value = serde_json::to_value(&export).unwrap();

    assert_eq!(value["v"], json!(2));
    assert_eq!(value["globals"], json!({ "locale": "en", "theme": "light" }));
    assert_eq!(value["globalParameters"], json!({}));
    assert_eq!(value["kindParameters"], json!({ "Button": {}, "Card": {} }));
    assert!(export.stories.contains_key("card--page"));
    assert_eq!(export.stories.len(), 4);
}

#[tokio::test]
async fn export_v3_filters_parameters() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let export = store.export_v3().unwrap();
    let value = serde_json::to_value(&export).unwrap();
    let primary = &value["stories"]["button--primary"];

    assert_eq!(value["v"], json!(3));
    assert_eq!(
        *primary,
        json!({
            "id": "button--primary",
            "title": "Button",
            "name": "Primary",
            "importPath": BUTTON,
            "kind": "Button",
            "story": "Primary",
            "parameters": { "fileName": BUTTON, "__isArgsStory": false }
        })
    );
    assert_eq!(
        value["stories"]["card--page"]["parameters"],
        json!({ "fileName": CARD, "docsOnly": true, "__id": "card--page", "__isArgsStory": false })
    );
}

#[tokio::test]
async fn project_render_marks_stories_as_args_stories() {
    let (store, _) = store();
    let mut annotations = common::project();
    annotations.render = Some(RenderFn::new(|args, _| Value::Object(args.clone())));
    store.set_project_annotations(annotations);
    store.materialize_all().await.unwrap();

    let export = store.export_v3().unwrap();
    let value = serde_json::to_value(&export).unwrap();

    assert_eq!(
        value["stories"]["button--primary"]["parameters"]["__isArgsStory"],
        json!(true)
    );
}

#[tokio::test]
async fn source_change_rebuilds_the_materialized_map() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let replacement = Arc::new(
        InMemoryModuleLoader::new().with_module(
            BUTTON,
            common::module(json!({
                "default": { "title": "Button" },
                "exports": { "Primary": { "args": { "label": "New" } } }
            })),
        ),
    );
    store
        .on_sources_changed(SourcesUpdate {
            loader: Some(Arc::clone(&replacement) as _),
            index: Some(StoryIndex::from_entries([story_entry(
                "button--primary",
                "Button",
                "Primary",
                BUTTON,
            )])),
        })
        .await
        .unwrap();

    assert_eq!(replacement.calls(BUTTON), 1);
    let stories = store.extract(ExtractOptions::default()).unwrap();
    assert_eq!(stories.len(), 1);
    assert_eq!(stories["button--primary"].args, map(json!({ "label": "New" })));
}

#[tokio::test]
async fn failed_rebuild_clears_the_map() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let err = store
        .on_sources_changed(SourcesUpdate {
            loader: Some(Arc::new(InMemoryModuleLoader::new()) as _),
            index: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Loader(_)));
    assert!(!store.is_materialized());
}

#[tokio::test]
async fn source_change_without_map_is_lazy() {
    let (store, _) = store();
    let replacement = Arc::new(InMemoryModuleLoader::new());

    store
        .on_sources_changed(SourcesUpdate {
            loader: Some(Arc::clone(&replacement) as _),
            index: None,
        })
        .await
        .unwrap();

    assert_eq!(replacement.total_calls(), 0);
    assert!(store.load_file_record("button--primary").await.is_err());
}

#[tokio::test]
async fn sync_record_lookup_goes_through_the_map() {
    let (store, _) = store();
    assert!(matches!(
        store.file_record_for_story_sync("button--primary"),
        Err(StoreError::ExtractBeforeMaterialize { .. })
    ));

    store.materialize_all().await.unwrap();
    let record = store.file_record_for_story_sync("button--primary").unwrap();
    assert_eq!(record.import_path, BUTTON);
    assert!(matches!(
        store.file_record_for_story_sync("missing"),
        Err(StoreError::EntryNotFound(_))
    ));
}

#[tokio::test]
#[allow(deprecated)]
async fn bound_story_requires_materialization_first() {
    let (store, _) = store();

    let err = store.bound_story("missing").unwrap_err();
    assert!(matches!(
        err,
        StoreError::ExtractBeforeMaterialize { operation: "bound_story" }
    ));

    store.materialize_all().await.unwrap();
    let bound = store.bound_story("button--primary").unwrap();

    assert_eq!(
        bound.call(),
        json!({
            "component": "Button",
            "args": { "size": "m", "label": "Hi", "primary": true }
        })
    );
    assert_eq!(bound.context.hooks.render_count(), 1);
    assert!(bound.play().is_ok());
}

#[tokio::test]
async fn raw_binds_every_extracted_story() {
    let (store, _) = store();
    store.materialize_all().await.unwrap();

    let ids: Vec<String> = store
        .raw()
        .unwrap()
        .iter()
        .map(|bound| bound.story.id.to_string())
        .collect();

    assert_eq!(ids, vec!["button--primary", "button--secondary", "card--basic"]);
}

#[tokio::test]
async fn docs_entry_loads_referenced_records() {
    let (store, loader) = store();

    let context = store.load_entry("button--docs").await.unwrap();

    assert_eq!(context.entry.import_path, BUTTON_DOCS);
    assert_eq!(context.file_records.len(), 1);
    assert_eq!(context.file_records[0].import_path, BUTTON);
    assert_eq!(loader.calls(BUTTON_DOCS), 1);
    assert_eq!(loader.calls(BUTTON), 1);

    let story_context = store.load_entry("card--basic").await.unwrap();
    assert!(story_context.file_records.is_empty());
    assert_eq!(loader.calls(CARD), 1);
}

#[tokio::test]
async fn docs_entry_with_unknown_reference_fails() {
    let index = StoryIndex::from_entries([common::docs_entry(
        "intro--docs",
        "Intro",
        "./Intro.mdx",
        &["./Nowhere.stories"],
    )]);
    let loader = Arc::new(
        InMemoryModuleLoader::new().with_module("./Intro.mdx", ModuleExports::default()),
    );
    let store = folio_store::StoryStore::new(
        index,
        Arc::clone(&loader) as _,
        common::project(),
        &folio_config::StoreConfig::default(),
    );

    let err = store.load_entry("intro--docs").await.unwrap_err();

    assert!(matches!(err, StoreError::ImportPathNotFound(ref path) if path == "./Nowhere.stories"));
    assert_eq!(loader.total_calls(), 0);
}
