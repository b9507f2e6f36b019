//! Assembling the transient story context.

use std::sync::Arc;

use folio_core::{Hooks, Map, ResolvedStory, StoryContext, ViewMode};
use serde_json::Value;

/// Combine a resolved story with live args, globals and its hook handle.
///
/// Args pass through arg type `mapping` tables, then arg types whose `if`
/// condition does not hold are dropped. The story itself is never touched.
#[must_use]
pub fn prepare_context(
    story: &Arc<ResolvedStory>,
    args: Map,
    globals: Map,
    hooks: Arc<Hooks>,
    view_mode: ViewMode,
) -> StoryContext {
    let mapped = map_args(&args, &story.arg_types);
    let included = mapped
        .iter()
        .filter(|(key, _)| {
            story
                .arg_types
                .get(key.as_str())
                .is_none_or(|arg_type| include_conditional_arg(arg_type, &mapped, &globals))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    StoryContext {
        story: Arc::clone(story),
        args: included,
        unmapped_args: args,
        globals,
        hooks,
        view_mode,
    }
}

/// Replace arg values through their arg type's `mapping` table. Arrays are
/// mapped element-wise; values without a mapping entry pass through.
#[must_use]
pub fn map_args(args: &Map, arg_types: &Map) -> Map {
    args.iter()
        .map(|(key, value)| {
            let mapping = arg_types
                .get(key)
                .and_then(|t| t.get("mapping"))
                .and_then(Value::as_object);
            let mapped = match (mapping, value) {
                (None, _) => value.clone(),
                (Some(mapping), Value::Array(items)) => {
                    Value::Array(items.iter().map(|v| map_value(mapping, v)).collect())
                }
                (Some(mapping), _) => map_value(mapping, value),
            };
            (key.clone(), mapped)
        })
        .collect()
}

fn map_value(mapping: &Map, value: &Value) -> Value {
    value
        .as_str()
        .and_then(|s| mapping.get(s))
        .unwrap_or(value)
        .clone()
}

/// Evaluate an arg type's `if` condition against args and globals.
///
/// The condition names its subject with `arg` or `global` and tests it with
/// one of `eq`, `neq`, `exists` or `truthy` (default: truthy).
#[must_use]
pub fn include_conditional_arg(arg_type: &Value, args: &Map, globals: &Map) -> bool {
    let Some(condition) = arg_type.get("if").and_then(Value::as_object) else {
        return true;
    };

    let subject = if let Some(name) = condition.get("arg").and_then(Value::as_str) {
        args.get(name)
    } else if let Some(name) = condition.get("global").and_then(Value::as_str) {
        globals.get(name)
    } else {
        tracing::warn!(?condition, "conditional arg type names neither an arg nor a global");
        return true;
    };

    if let Some(expected) = condition.get("eq") {
        return subject == Some(expected);
    }
    if let Some(expected) = condition.get("neq") {
        return subject != Some(expected);
    }
    if let Some(exists) = condition.get("exists").and_then(Value::as_bool) {
        return subject.is_some() == exists;
    }
    let want_truthy = condition
        .get("truthy")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    subject.is_some_and(is_truthy) == want_truthy
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::StoryId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn map(value: Value) -> Map {
        value.as_object().cloned().unwrap()
    }

    fn story(arg_types: Value) -> Arc<ResolvedStory> {
        Arc::new(ResolvedStory {
            id: StoryId::new("icon--default"),
            name: "Default".into(),
            title: "Icon".into(),
            component_id: "icon".into(),
            component: None,
            export_name: "Default".into(),
            tags: vec![],
            parameters: Map::new(),
            initial_args: Map::new(),
            arg_types: map(arg_types),
            decorators: vec![],
            render: None,
            play: None,
        })
    }

    #[test]
    fn maps_values_and_arrays() {
        let arg_types = map(json!({
            "icon": { "mapping": { "star": "★", "heart": "♥" } },
            "icons": { "mapping": { "star": "★" } }
        }));
        let args = map(json!({ "icon": "heart", "icons": ["star", "moon"], "size": 3 }));
        assert_eq!(
            Value::Object(map_args(&args, &arg_types)),
            json!({ "icon": "♥", "icons": ["★", "moon"], "size": 3 })
        );
    }

    #[rstest]
    #[case(json!({ "arg": "on" }), json!({ "on": true }), true)]
    #[case(json!({ "arg": "on" }), json!({ "on": 0 }), false)]
    #[case(json!({ "arg": "on", "truthy": false }), json!({}), true)]
    #[case(json!({ "arg": "on", "exists": true }), json!({ "on": null }), true)]
    #[case(json!({ "arg": "on", "exists": false }), json!({ "on": 1 }), false)]
    #[case(json!({ "arg": "mode", "eq": "dark" }), json!({ "mode": "dark" }), true)]
    #[case(json!({ "arg": "mode", "neq": "dark" }), json!({ "mode": "dark" }), false)]
    fn arg_conditions(#[case] condition: Value, #[case] args: Value, #[case] expected: bool) {
        let arg_type = json!({ "if": condition });
        assert_eq!(
            include_conditional_arg(&arg_type, &map(args), &Map::new()),
            expected
        );
    }

    #[test]
    fn global_conditions_read_globals() {
        let arg_type = json!({ "if": { "global": "theme", "eq": "dark" } });
        let globals = map(json!({ "theme": "dark" }));
        assert!(include_conditional_arg(&arg_type, &Map::new(), &globals));
    }

    #[test]
    fn context_filters_and_keeps_unmapped_args() {
        let s = story(json!({
            "label": { "if": { "arg": "showLabel" } },
            "color": { "mapping": { "brand": "#ff4785" } }
        }));
        let args = map(json!({ "label": "Hi", "showLabel": false, "color": "brand" }));
        let hooks = Arc::new(Hooks::new(s.id.clone()));

        let ctx = prepare_context(&s, args.clone(), Map::new(), hooks, ViewMode::Story);

        assert_eq!(
            Value::Object(ctx.args.clone()),
            json!({ "showLabel": false, "color": "#ff4785" })
        );
        assert_eq!(ctx.unmapped_args, args);
        assert!(s.initial_args.is_empty());
    }
}
