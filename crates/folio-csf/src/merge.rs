//! Layered merging of parameter maps and tag lists.
//!
//! Layers are passed lowest precedence first: project, component, story.

use folio_core::Map;
use indexmap::IndexSet;
use serde_json::Value;

/// Tag every story carries.
pub const STORY_TAG: &str = "story";

/// Deep-merge parameter maps. For each key, if every layer defining it holds
/// an object the objects are merged recursively; otherwise the last layer
/// wins outright. Arrays are replaced, never concatenated.
#[must_use]
pub fn combine_parameters(layers: &[&Map]) -> Map {
    let mut combined = Map::new();
    let mut keys: IndexSet<&str> = IndexSet::new();
    for layer in layers {
        keys.extend(layer.keys().map(String::as_str));
    }

    for key in keys {
        let values: Vec<&Value> = layers.iter().filter_map(|layer| layer.get(key)).collect();
        let merged = if values.iter().all(|v| v.is_object()) {
            let maps: Vec<&Map> = values.iter().filter_map(|v| v.as_object()).collect();
            Value::Object(combine_parameters(&maps))
        } else {
            values.last().map_or(Value::Null, |v| (*v).clone())
        };
        combined.insert(key.to_string(), merged);
    }
    combined
}

/// Apply tag layers in order. `!name` removes a tag added by an earlier
/// layer, and a later layer may add it back. Duplicates keep their first
/// position.
#[must_use]
pub fn combine_tags(layers: &[&[String]]) -> Vec<String> {
    let mut tags: IndexSet<&str> = IndexSet::new();
    for tag in layers.iter().flat_map(|layer| layer.iter()) {
        match tag.strip_prefix('!') {
            Some(removed) => {
                tags.shift_remove(removed);
            }
            None => {
                tags.insert(tag.as_str());
            }
        }
    }
    tags.into_iter().map(str::to_string).collect()
}

/// Shallow merge: later layers overwrite earlier keys.
pub(crate) fn combine_args(layers: &[&Map]) -> Map {
    let mut combined = Map::new();
    for layer in layers {
        for (key, value) in *layer {
            combined.insert(key.clone(), value.clone());
        }
    }
    combined
}
