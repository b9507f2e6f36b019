//! Story ids and the naming rules used to derive them.
//!
//! A story id is `<component-id>--<story-name>`, where both halves are
//! sanitized: lowercased, every run of non-alphanumeric characters collapsed
//! into a single `-`, and leading/trailing dashes trimmed.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Unique, stable identifier of an index entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for StoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Lowercase `value` and collapse every run of non-alphanumeric characters
/// into a single dash, trimming dashes at both ends.
#[must_use]
pub fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

fn sanitize_part(value: &str, part: &'static str) -> Result<String, CoreError> {
    let sanitized = sanitize(value);
    if sanitized.is_empty() {
        return Err(CoreError::InvalidId {
            part,
            value: value.to_string(),
        });
    }
    Ok(sanitized)
}

/// Build a story id from a component id (or title) and a story name.
///
/// # Errors
///
/// Returns [`CoreError::InvalidId`] if either half sanitizes to nothing.
pub fn to_id(kind: &str, name: &str) -> Result<StoryId, CoreError> {
    let kind = sanitize_part(kind, "kind")?;
    if name.is_empty() {
        return Ok(StoryId(kind));
    }
    let name = sanitize_part(name, "name")?;
    Ok(StoryId(format!("{kind}--{name}")))
}

/// Derive a component id from a title (or an explicit meta `id`).
///
/// # Errors
///
/// Returns [`CoreError::InvalidId`] if the value sanitizes to nothing.
pub fn component_id(value: &str) -> Result<String, CoreError> {
    sanitize_part(value, "kind")
}

/// Turn an export name into a display name: `primaryButton` becomes
/// `Primary Button`, `with_icon` becomes `With Icon`.
#[must_use]
pub fn story_name_from_export(key: &str) -> String {
    split_words(key)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && ch.is_uppercase())
                || (prev.is_alphabetic() && ch.is_numeric())
                || (prev.is_numeric() && ch.is_alphabetic())
                || (prev.is_uppercase()
                    && ch.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
