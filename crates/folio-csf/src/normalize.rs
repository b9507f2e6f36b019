use folio_core::{Map, ProjectAnnotations};
use serde_json::Value;

/// Canonicalize an arg type or global type table.
///
/// Each entry becomes an object carrying `name` = its key. A string `type`
/// is expanded to `{ "name": <string> }`. Non-object entries are replaced by
/// `{ "name": key }`.
#[must_use]
pub fn normalize_input_types(types: &Map) -> Map {
    types
        .iter()
        .map(|(key, value)| {
            let mut entry = value.as_object().cloned().unwrap_or_default();
            if let Some(Value::String(type_name)) = entry.get("type") {
                let expanded = serde_json::json!({ "name": type_name });
                entry.insert("type".to_string(), expanded);
            }
            entry
                .entry("name")
                .or_insert_with(|| Value::String(key.clone()));
            (key.clone(), Value::Object(entry))
        })
        .collect()
}

/// Normalize project annotations once, before they are stored.
#[must_use]
pub fn normalize_project_annotations(project: ProjectAnnotations) -> ProjectAnnotations {
    ProjectAnnotations {
        arg_types: normalize_input_types(&project.arg_types),
        global_types: normalize_input_types(&project.global_types),
        ..project
    }
}
