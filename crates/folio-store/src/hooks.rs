//! One hook handle per story id.

use std::collections::HashMap;
use std::sync::Arc;

use folio_core::{Hooks, StoryId};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct HookRegistry {
    handles: RwLock<HashMap<StoryId, Arc<Hooks>>>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle for `id`, created on first use.
    pub fn ensure(&self, id: &StoryId) -> Arc<Hooks> {
        if let Some(handle) = self.handles.read().get(id) {
            return Arc::clone(handle);
        }
        Arc::clone(
            self.handles
                .write()
                .entry(id.clone())
                .or_insert_with(|| Arc::new(Hooks::new(id.clone()))),
        )
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Hooks>> {
        self.handles.read().get(id).cloned()
    }

    /// Clean the handle and forget it. Returns whether one existed.
    pub fn release(&self, id: &str) -> bool {
        let removed = self.handles.write().remove(id);
        match removed {
            Some(handle) => {
                handle.clean();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }
}
