// ABOUTME: Content-addressed recipe cache keyed by request fingerprint
// ABOUTME: Pluggable backends (in-memory LRU, SQLite) behind one store trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Cache
//!
//! Identical requests are served from a previously generated recommendation.
//! Entries expire lazily: an entry older than the expiry window is removed
//! the next time it is looked up. Entries are derivable, so backends need no
//! transactional isolation and concurrent stores are last-write-wins.

/// Request fingerprinting
pub mod fingerprint;
/// In-memory LRU-bounded backend
pub mod memory;
/// SQLite-backed backend
pub mod sqlite;

use std::time::Duration;

use async_trait::async_trait;

use crate::constants::cache::RECIPE_CACHE_EXPIRY_SECS;
use crate::errors::AppResult;
use crate::models::{CacheEntry, Recommendation};

pub use fingerprint::fingerprint;
pub use memory::InMemoryRecipeCache;
pub use sqlite::SqliteRecipeCache;

/// Recipe cache configuration
#[derive(Debug, Clone, Copy)]
pub struct RecipeCacheConfig {
    /// Entries older than this are treated as misses and removed
    pub expiry: Duration,
    /// Capacity of the in-memory backend
    pub max_entries: usize,
}

impl Default for RecipeCacheConfig {
    fn default() -> Self {
        Self {
            expiry: Duration::from_secs(RECIPE_CACHE_EXPIRY_SECS),
            max_entries: 1_000,
        }
    }
}

/// Storage backend for cached recommendations
#[async_trait]
pub trait RecipeCacheStore: Send + Sync {
    /// Backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Return a copy of the cached recommendation and count the hit.
    /// Expired entries are removed and reported as a miss.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn lookup(&self, fingerprint: &str) -> AppResult<Option<Recommendation>>;

    /// Insert or overwrite the entry, resetting its age and hit counter
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn store(&self, fingerprint: &str, recommendation: &Recommendation) -> AppResult<()>;

    /// Inspect an entry without counting a hit or applying expiry
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn entry(&self, fingerprint: &str) -> AppResult<Option<CacheEntry>>;
}
