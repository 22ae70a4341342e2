// ABOUTME: Title-keyed image URL cache with in-memory and SQLite backends
// ABOUTME: Stores found URLs and known misses so repeat titles skip the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};

/// Image lookups remembered by recipe title.
///
/// `lookup` returns `None` for an unknown title and `Some(None)` for a title
/// known to have no image.
#[async_trait]
pub trait ImageUrlCache: Send + Sync {
    /// Cached result for a title
    async fn lookup(&self, title: &str) -> AppResult<Option<Option<String>>>;

    /// Remember a result, overwriting any previous one
    async fn store(&self, title: &str, url: Option<&str>) -> AppResult<()>;
}

/// Process-local cache; writes to different titles never contend
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageCache {
    entries: Arc<DashMap<String, Option<String>>>,
}

impl InMemoryImageCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached titles
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every entry
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[async_trait]
impl ImageUrlCache for InMemoryImageCache {
    async fn lookup(&self, title: &str) -> AppResult<Option<Option<String>>> {
        Ok(self.entries.get(title).map(|entry| entry.value().clone()))
    }

    async fn store(&self, title: &str, url: Option<&str>) -> AppResult<()> {
        self.entries.insert(title.to_owned(), url.map(str::to_owned));
        Ok(())
    }
}

/// `image_cache` table backend, shared across restarts
#[derive(Clone)]
pub struct SqliteImageCache {
    pool: SqlitePool,
}

impl SqliteImageCache {
    /// Create a cache over an existing, migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageUrlCache for SqliteImageCache {
    async fn lookup(&self, title: &str) -> AppResult<Option<Option<String>>> {
        let row = sqlx::query("SELECT image_url FROM image_cache WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read image cache: {e}")))?;

        row.map(|row| {
            row.try_get::<Option<String>, _>("image_url")
                .map_err(|e| AppError::database(format!("Failed to get image_url: {e}")))
        })
        .transpose()
    }

    async fn store(&self, title: &str, url: Option<&str>) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO image_cache (title, image_url, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(title) DO UPDATE SET
                image_url = excluded.image_url,
                created_at = excluded.created_at
            ",
        )
        .bind(title)
        .bind(url)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to write image cache: {e}")))?;

        Ok(())
    }
}
