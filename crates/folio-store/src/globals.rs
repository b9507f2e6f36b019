//! Process-wide globals for one store instance.

use std::collections::BTreeSet;

use folio_core::Map;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct GlobalsState {
    defaults: Map,
    allowed: BTreeSet<String>,
    current: Map,
}

#[derive(Debug, Default)]
pub struct GlobalsStore {
    state: RwLock<GlobalsState>,
}

impl GlobalsStore {
    #[must_use]
    pub fn new(globals: &Map, global_types: &Map) -> Self {
        let store = Self::default();
        store.set(globals, global_types);
        store
    }

    /// Recompute defaults and reset current values to them.
    ///
    /// Defaults are the global types' `defaultValue`s overridden by
    /// explicit `globals`.
    pub fn set(&self, globals: &Map, global_types: &Map) {
        let mut defaults: Map = global_types
            .iter()
            .filter_map(|(key, global_type)| {
                global_type
                    .get("defaultValue")
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect();
        defaults.extend(globals.iter().map(|(k, v)| (k.clone(), v.clone())));

        let allowed = global_types
            .keys()
            .chain(globals.keys())
            .cloned()
            .collect();

        *self.state.write() = GlobalsState {
            current: defaults.clone(),
            defaults,
            allowed,
        };
    }

    #[must_use]
    pub fn get(&self) -> Map {
        self.state.read().current.clone()
    }

    /// Merge `delta` into the current globals. Names that are neither
    /// declared globals nor global types are dropped.
    pub fn update(&self, delta: Map) -> Map {
        let mut state = self.state.write();
        for (key, value) in delta {
            if state.allowed.contains(&key) {
                state.current.insert(key, value);
            } else {
                tracing::warn!(global = %key, "ignoring update to undeclared global");
            }
        }
        state.current.clone()
    }

    pub fn reset(&self) -> Map {
        let mut state = self.state.write();
        state.current = state.defaults.clone();
        state.current.clone()
    }
}
