use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// What a cached resolution depends on: the slot, the resolved variant
/// assignment and the caller's class tokens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    slot: String,
    assignment: BTreeMap<String, String>,
    classes: Vec<String>,
}

impl CacheKey {
    pub fn new(slot: &str, assignment: &BTreeMap<String, String>, classes: &[String]) -> Self {
        Self {
            slot: slot.to_string(),
            assignment: assignment.clone(),
            classes: classes.to_vec(),
        }
    }
}

/// Bounded memo of resolved class strings.
///
/// Values are computed outside the lock and stored with a single insert, so
/// readers never see a partial entry. When full, the oldest inserted entry
/// is evicted. A miss just means the caller recomputes.
#[derive(Debug)]
pub struct ResolutionCache {
    capacity: usize,
    entries: RwLock<IndexMap<CacheKey, Option<String>>>,
}

impl ResolutionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(IndexMap::with_capacity(capacity)),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Option<String>> {
        self.entries.read().get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, value: Option<String>) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return;
        }
        if entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!(slot = %evicted.slot, "evicted cached resolution");
            }
        }
        entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
