//! # folio-store
//!
//! Lazy, memoized story resolution for Folio.
//!
//! [`StoryStore`] sits between a story index, an asynchronous
//! [`ModuleLoader`] and the pure transforms in `folio-csf`:
//!
//! - index lookups never touch the loader
//! - a module is loaded the first time one of its stories is needed
//! - processing, meta resolution and story resolution are memoized in
//!   bounded LRU caches keyed by the identity of their inputs
//! - live args, globals and hook handles are kept beside the resolved
//!   stories, never inside them
//! - bulk extraction and the legacy export payloads read an opt-in
//!   materialized map of every file record
//!
//! Loader calls are the only suspension points. Overlapping loads of the
//! same module are not coalesced; both land on the same cache slot.

mod args;
mod bound;
mod error;
mod extract;
mod globals;
mod hooks;
mod index;
mod loader;
mod memo;
mod store;

pub use args::ArgsStore;
pub use bound::BoundStory;
pub use error::{LoaderError, StoreError};
pub use extract::{ExtractOptions, ExtractedStory, StoriesExportV2, StoriesExportV3, StoryV3};
pub use globals::GlobalsStore;
pub use hooks::HookRegistry;
pub use index::IndexAccessor;
pub use loader::{InMemoryModuleLoader, JsonModuleLoader, ModuleLoader};
pub use memo::{CacheStats, Identity, MemoCache};
pub use store::{
    ContextOptions, EntryContext, FileRecords, SourcesUpdate, StoreCacheStats, StoryStore,
};
