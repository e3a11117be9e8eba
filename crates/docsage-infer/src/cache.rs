//! LRU cache for query embeddings.
//!
//! The hashing embedder is deterministic, so repeated queries can reuse
//! their vectors. Corpus insertions never go through the cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

struct CacheEntry {
    embedding: Vec<f32>,
    inserted_at: Instant,
}

/// Thread-safe LRU cache mapping query text to its embedding.
pub struct QueryCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    order: Vec<String>,
    max_size: usize,
    ttl: Duration,
}

impl QueryCache {
    /// Create a cache with the given capacity and TTL.
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
                max_size,
                ttl,
            }),
        }
    }

    /// Cache with default settings (256 entries, 1hr TTL).
    pub fn default_cache() -> Self {
        Self::new(256, Duration::from_secs(3600))
    }

    /// Get a cached embedding. Returns None on miss or expired entry.
    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        let mut inner = self.inner.lock();

        let expired = inner
            .entries
            .get(query)
            .map(|e| e.inserted_at.elapsed() >= inner.ttl)?;

        if expired {
            let key = query.to_string();
            inner.entries.remove(&key);
            inner.order.retain(|k| k != &key);
            return None;
        }

        let embedding = inner.entries.get(query).unwrap().embedding.clone();
        if let Some(pos) = inner.order.iter().position(|k| k == query) {
            let key = inner.order.remove(pos);
            inner.order.push(key);
        }
        Some(embedding)
    }

    /// Insert an embedding, evicting the oldest entries past capacity.
    pub fn put(&self, query: String, embedding: Vec<f32>) {
        let mut inner = self.inner.lock();

        if inner.entries.contains_key(&query) {
            inner.entries.insert(
                query.clone(),
                CacheEntry {
                    embedding,
                    inserted_at: Instant::now(),
                },
            );
            inner.order.retain(|k| k != &query);
            inner.order.push(query);
            return;
        }

        while inner.entries.len() >= inner.max_size && !inner.order.is_empty() {
            let oldest = inner.order.remove(0);
            inner.entries.remove(&oldest);
        }

        inner.order.push(query.clone());
        inner.entries.insert(
            query,
            CacheEntry {
                embedding,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
