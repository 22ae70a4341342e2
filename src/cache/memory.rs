// ABOUTME: In-memory recipe cache with LRU eviction and lazy expiry
// ABOUTME: Used in tests and single-process deployments without a database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

use super::{RecipeCacheConfig, RecipeCacheStore};
use crate::errors::AppResult;
use crate::models::{CacheEntry, Recommendation};

/// In-memory recipe cache
///
/// `LruCache` updates recency on every read, so lookups take the lock
/// exclusively; lookups are rare next to generation latency.
#[derive(Clone)]
pub struct InMemoryRecipeCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
    expiry: Duration,
}

impl InMemoryRecipeCache {
    /// Capacity used when the configuration specifies zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1_000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create an empty cache
    #[must_use]
    pub fn new(config: RecipeCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
            expiry: config.expiry,
        }
    }

    /// Number of live entries, expired ones included until looked up
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

impl Default for InMemoryRecipeCache {
    fn default() -> Self {
        Self::new(RecipeCacheConfig::default())
    }
}

#[async_trait]
impl RecipeCacheStore for InMemoryRecipeCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn lookup(&self, fingerprint: &str) -> AppResult<Option<Recommendation>> {
        let now = Utc::now();
        let mut store = self.store.lock().await;

        let Some(entry) = store.get_mut(fingerprint) else {
            return Ok(None);
        };

        if entry.is_expired(now, self.expiry) {
            store.pop(fingerprint);
            debug!(fingerprint, "Removed expired recipe cache entry");
            return Ok(None);
        }

        entry.hit_count += 1;
        Ok(Some(entry.payload.clone()))
    }

    async fn store(&self, fingerprint: &str, recommendation: &Recommendation) -> AppResult<()> {
        let entry = CacheEntry::new(fingerprint, recommendation.clone());
        self.store.lock().await.put(fingerprint.to_owned(), entry);
        Ok(())
    }

    async fn entry(&self, fingerprint: &str) -> AppResult<Option<CacheEntry>> {
        Ok(self.store.lock().await.peek(fingerprint).cloned())
    }
}
