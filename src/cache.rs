//! Extraction cache.
//!
//! A small LRU memoizing full extraction results, keyed by a fingerprint
//! of (URL, raw content). The cache is injected by the caller rather
//! than being process-global, so independent pipelines never share
//! state by accident. Computation happens outside the lock; when two
//! callers race on the same key the first inserted result wins and the
//! loser's computation is discarded.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::result::ProcessedContent;

/// 64-bit FNV-1a fingerprint of (URL, raw content), hex encoded.
#[must_use]
pub fn fingerprint(url: &str, raw: &str) -> String {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in url.bytes().chain([0u8]).chain(raw.bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("{hash:016x}")
}

/// LRU cache of processed extractions.
#[derive(Debug)]
pub struct ExtractionCache {
    state: Mutex<State>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct State {
    // Most recently used last. Linear scan is fine at these sizes.
    entries: Vec<(String, Arc<ProcessedContent>)>,
}

impl ExtractionCache {
    /// Create a cache holding at most `capacity` results.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            capacity: capacity.max(1),
        }
    }

    /// Fetch the cached result for `key`, or run `compute` and cache it.
    ///
    /// `compute` runs outside the lock. If another caller inserts the
    /// same key first, their result is returned and this computation is
    /// dropped.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Arc<ProcessedContent>
    where
        F: FnOnce() -> ProcessedContent,
    {
        if let Some(hit) = self.get(key) {
            debug!(key, "cache hit");
            return hit;
        }

        let computed = Arc::new(compute());
        self.insert_if_absent(key, computed)
    }

    /// Look up a key, marking it most recently used on a hit.
    pub fn get(&self, key: &str) -> Option<Arc<ProcessedContent>> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let pos = state.entries.iter().position(|(k, _)| k == key)?;
        let entry = state.entries.remove(pos);
        let value = Arc::clone(&entry.1);
        state.entries.push(entry);
        Some(value)
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: &str, value: Arc<ProcessedContent>) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(pos) = state.entries.iter().position(|(k, _)| k == key) {
            state.entries.remove(pos);
        } else if state.entries.len() >= self.capacity {
            state.entries.remove(0);
        }
        state.entries.push((key.to_string(), value));
    }

    /// Remove every cached entry.
    pub fn clear(&self) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.entries.clear();
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.state.lock() {
            Ok(guard) => guard.entries.len(),
            Err(poisoned) => poisoned.into_inner().entries.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_if_absent(&self, key: &str, value: Arc<ProcessedContent>) -> Arc<ProcessedContent> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // First writer wins; a racing insert for the same key is the hit.
        if let Some(pos) = state.entries.iter().position(|(k, _)| k == key) {
            let entry = state.entries.remove(pos);
            let existing = Arc::clone(&entry.1);
            state.entries.push(entry);
            return existing;
        }

        if state.entries.len() >= self.capacity {
            state.entries.remove(0);
        }
        state.entries.push((key.to_string(), Arc::clone(&value)));
        value
    }
}
