// ABOUTME: Bounded LRU memoization for derived colors
// ABOUTME: Keys are operation names plus stringified arguments; values are deterministic

use std::collections::{BTreeMap, HashMap};

use chromaforge_logging::trace;
use chromaforge_types::Color;

pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Cached color with its recency stamp
#[derive(Debug, Clone, Copy)]
pub struct CacheEntry {
    pub value: Color,
    recency: u64,
}

/// LRU cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries to store; zero disables storage
    pub capacity: usize,
    /// Whether to track hit/miss metrics
    pub enable_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            enable_metrics: true,
        }
    }
}

/// Cache metrics for monitoring performance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub lookups: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheMetrics {
    /// Hit ratio as a percentage
    pub fn hit_ratio(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            (self.hits as f64 / self.lookups as f64) * 100.0
        }
    }
}

/// LRU cache for derived colors.
///
/// Purely an optimization: clearing it at any time never changes results.
#[derive(Debug)]
pub struct ColorCache {
    entries: HashMap<String, CacheEntry>,
    /// recency stamp -> key, oldest first
    order: BTreeMap<u64, String>,
    next_stamp: u64,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(CacheConfig {
            capacity,
            ..CacheConfig::default()
        })
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.capacity.min(DEFAULT_CACHE_CAPACITY)),
            order: BTreeMap::new(),
            next_stamp: 0,
            config,
            metrics: CacheMetrics::default(),
        }
    }

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    /// Look up a key, promoting a hit to most-recently-used
    pub fn get(&mut self, key: &str) -> Option<Color> {
        if self.config.enable_metrics {
            self.metrics.lookups += 1;
        }

        let stamp = self.stamp();
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.order.remove(&entry.recency);
                entry.recency = stamp;
                self.order.insert(stamp, key.to_string());
                if self.config.enable_metrics {
                    self.metrics.hits += 1;
                }
                Some(entry.value)
            }
            None => {
                if self.config.enable_metrics {
                    self.metrics.misses += 1;
                }
                None
            }
        }
    }

    /// Insert or replace a value as most-recently-used, evicting the
    /// least-recently-used entry if capacity is exceeded
    pub fn set(&mut self, key: impl Into<String>, value: Color) {
        if self.config.capacity == 0 {
            return;
        }

        let key = key.into();
        let stamp = self.stamp();
        if let Some(previous) = self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                recency: stamp,
            },
        ) {
            self.order.remove(&previous.recency);
        }
        self.order.insert(stamp, key);

        if self.entries.len() > self.config.capacity {
            self.evict_oldest();
        }
    }

    /// Return the cached value or compute, store and return it
    pub fn get_or_insert_with<F>(&mut self, key: impl Into<String>, compute: F) -> Color
    where
        F: FnOnce() -> Color,
    {
        let key = key.into();
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        self.set(key, value);
        value
    }

    fn evict_oldest(&mut self) {
        if let Some((_, oldest_key)) = self.order.pop_first() {
            self.entries.remove(&oldest_key);
            if self.config.enable_metrics {
                self.metrics.evictions += 1;
            }
            trace!(key = %oldest_key, capacity = self.config.capacity, "Evicted color cache entry");
        }
    }

    /// Membership test that does not affect recency
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys ordered from least to most recently used
    pub fn keys_by_recency(&self) -> Vec<&str> {
        self.order.values().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
    }

    /// Drop every entry and reset metrics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.metrics = CacheMetrics::default();
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new()
    }
}
