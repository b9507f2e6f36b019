//! Module loaders.
//!
//! A loader turns an import path into a module handle. The returned `Arc`
//! is the module's identity, so loaders hand out the same allocation for
//! the same path until the loader itself is replaced.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::ModuleExports;
use parking_lot::Mutex;

use crate::error::LoaderError;

#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// # Errors
    ///
    /// Any [`LoaderError`]; the store propagates it unchanged.
    async fn load(&self, import_path: &str) -> Result<Arc<ModuleExports>, LoaderError>;
}

/// Reads data-only modules from `<root>/<import_path>.json`.
#[derive(Debug)]
pub struct JsonModuleLoader {
    root: PathBuf,
    modules: Mutex<HashMap<String, Arc<ModuleExports>>>,
}

impl JsonModuleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, import_path: &str) -> PathBuf {
        let relative = import_path.strip_prefix("./").unwrap_or(import_path);
        self.root.join(format!("{relative}.json"))
    }
}

#[async_trait]
impl ModuleLoader for JsonModuleLoader {
    async fn load(&self, import_path: &str) -> Result<Arc<ModuleExports>, LoaderError> {
        if let Some(module) = self.modules.lock().get(import_path) {
            return Ok(Arc::clone(module));
        }

        let path = self.path_for(import_path);
        tracing::debug!(import_path, path = %path.display(), "loading module");

        let contents = tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoaderError::NotFound(import_path.to_string())
            } else {
                LoaderError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let module: ModuleExports = serde_json::from_str(&contents)
            .map_err(|source| LoaderError::Parse { path, source })?;

        let module = Arc::clone(
            self.modules
                .lock()
                .entry(import_path.to_string())
                .or_insert_with(|| Arc::new(module)),
        );
        Ok(module)
    }
}

/// Map-backed loader that counts calls and can be told to fail.
///
/// Each load yields to the scheduler once so concurrent callers interleave.
#[derive(Debug, Default)]
pub struct InMemoryModuleLoader {
    modules: HashMap<String, Arc<ModuleExports>>,
    failures: HashMap<String, String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl InMemoryModuleLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_module(mut self, import_path: &str, module: ModuleExports) -> Self {
        self.modules
            .insert(import_path.to_string(), Arc::new(module));
        self
    }

    #[must_use]
    pub fn with_failure(mut self, import_path: &str, reason: &str) -> Self {
        self.failures
            .insert(import_path.to_string(), reason.to_string());
        self
    }

    #[must_use]
    pub fn module(&self, import_path: &str) -> Option<Arc<ModuleExports>> {
        self.modules.get(import_path).cloned()
    }

    #[must_use]
    pub fn calls(&self, import_path: &str) -> usize {
        self.calls.lock().get(import_path).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl ModuleLoader for InMemoryModuleLoader {
    async fn load(&self, import_path: &str) -> Result<Arc<ModuleExports>, LoaderError> {
        *self
            .calls
            .lock()
            .entry(import_path.to_string())
            .or_default() += 1;

        tokio::task::yield_now().await;

        if let Some(reason) = self.failures.get(import_path) {
            return Err(LoaderError::Failed {
                path: import_path.to_string(),
                reason: reason.clone(),
            });
        }
        self.modules
            .get(import_path)
            .cloned()
            .ok_or_else(|| LoaderError::NotFound(import_path.to_string()))
    }
}
