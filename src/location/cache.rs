//! Bounded coordinate cache with optional JSON persistence.
//!
//! Keys are the exact query string; no case folding or trimming.
//! Both hits and definitive misses are stored. When full, the least
//! recently used entry is evicted. Persisted entries expire after 30 days.

use super::types::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_TTL_MS: i64 = 30 * 24 * 3600 * 1000; // 30 days in ms

/// Default in-memory bound.
pub const DEFAULT_CAPACITY: usize = 2000;

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    coordinate: Option<Coordinate>,
    timestamp: i64,
    #[serde(skip)]
    last_used: u64,
}

/// The coordinate cache.
pub struct CoordinateCache {
    path: Option<PathBuf>,
    capacity: usize,
    entries: HashMap<String, CacheEntry>,
    clock: u64,
}

impl CoordinateCache {
    /// Process-local cache, nothing written to disk.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            path: None,
            capacity,
            entries: HashMap::new(),
            clock: 0,
        }
    }

    /// Load a persisted cache; missing or corrupt files start empty.
    pub fn load_from(path: PathBuf, capacity: usize) -> Self {
        let mut cache = Self::in_memory(capacity);
        let now = chrono::Utc::now().timestamp_millis();

        let mut loaded: Vec<(String, CacheEntry)> = Self::read_file(&path)
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, e)| now - e.timestamp <= CACHE_TTL_MS)
            .collect();

        // Keep the freshest entries if the file outgrew the bound.
        loaded.sort_by_key(|(_, e)| e.timestamp);
        let skip = loaded.len().saturating_sub(capacity);
        for (key, mut entry) in loaded.into_iter().skip(skip) {
            cache.clock += 1;
            entry.last_used = cache.clock;
            cache.entries.insert(key, entry);
        }

        cache.path = Some(path);
        cache
    }

    /// `<user cache dir>/namesakes/geocode.json`
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("namesakes")
            .join("geocode.json")
    }

    fn read_file(path: &Path) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Outer `None` is a miss; `Some(None)` is a cached "not found".
    pub fn get(&mut self, query: &str) -> Option<Option<Coordinate>> {
        self.clock += 1;
        let tick = self.clock;
        let entry = self.entries.get_mut(query)?;
        entry.last_used = tick;
        Some(entry.coordinate)
    }

    /// Record a resolution. An existing entry for the key is kept as is.
    pub fn put(&mut self, query: &str, coordinate: Option<Coordinate>) {
        if self.capacity == 0 || self.entries.contains_key(query) {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.evict_one();
        }

        self.clock += 1;
        self.entries.insert(
            query.to_string(),
            CacheEntry {
                coordinate,
                timestamp: chrono::Utc::now().timestamp_millis(),
                last_used: self.clock,
            },
        );
        self.persist();
    }

    fn evict_one(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            tracing::debug!(key = %key, "evicting cached coordinate");
            self.entries.remove(&key);
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let result = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "failed to persist geocode cache");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
