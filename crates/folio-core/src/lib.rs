//! # folio-core
//!
//! Core types, story ids, and error types for Folio.
//!
//! This crate provides the foundational types shared across all Folio crates:
//! - Story ids and the id sanitization rules used to derive them
//! - Index entries and the story index table
//! - Annotation inputs (project, component, story) and loaded module exports
//! - Normalized file records, resolved metas and resolved stories
//! - The transient story context and the per-story hook handle
//! - Cross-cutting error types

pub mod annotations;
pub mod context;
pub mod csf;
pub mod errors;
pub mod hooks;
pub mod ids;
pub mod index;
pub mod resolved;

pub use annotations::{
    ComponentAnnotations, DecoratorFn, Map, ModuleExports, PlayFn, ProjectAnnotations, RenderFn,
    StoryAnnotations,
};
pub use context::{StoryContext, ViewMode};
pub use csf::{CsfFile, NormalizedMeta, NormalizedStory};
pub use errors::CoreError;
pub use hooks::Hooks;
pub use ids::StoryId;
pub use index::{EntryKind, IndexEntry, StoryIndex};
pub use resolved::{ResolvedMeta, ResolvedStory};
