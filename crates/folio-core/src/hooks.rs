//! Per-story lifecycle handle.
//!
//! Side effects registered while a story renders leave a cleanup callback
//! here. The handle outlives individual renders and is cleaned explicitly.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::ids::StoryId;

type Cleanup = Box<dyn FnOnce() + Send>;

pub struct Hooks {
    story_id: StoryId,
    cleanups: Mutex<Vec<Cleanup>>,
    renders: AtomicUsize,
    cleans: AtomicUsize,
}

impl Hooks {
    #[must_use]
    pub fn new(story_id: StoryId) -> Self {
        Self {
            story_id,
            cleanups: Mutex::new(Vec::new()),
            renders: AtomicUsize::new(0),
            cleans: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    /// Register a callback to run on the next [`Hooks::clean`].
    pub fn add_cleanup(&self, cleanup: impl FnOnce() + Send + 'static) {
        self.cleanups.lock().push(Box::new(cleanup));
    }

    pub fn record_render(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.lock().len()
    }

    /// How many times [`Hooks::clean`] has run.
    #[must_use]
    pub fn clean_count(&self) -> usize {
        self.cleans.load(Ordering::Relaxed)
    }

    /// Run pending cleanups, most recently registered first. Each callback
    /// runs at most once.
    pub fn clean(&self) {
        let pending = std::mem::take(&mut *self.cleanups.lock());
        for cleanup in pending.into_iter().rev() {
            cleanup();
        }
        self.cleans.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("story_id", &self.story_id)
            .field("pending_cleanups", &self.pending_cleanups())
            .field("renders", &self.render_count())
            .finish()
    }
}
