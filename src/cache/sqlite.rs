// ABOUTME: SQLite-backed recipe cache sharing the server database
// ABOUTME: Survives restarts; expired rows are deleted when next looked up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::{RecipeCacheConfig, RecipeCacheStore};
use crate::database::parse_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::{CacheEntry, Recommendation};

/// `recipe_cache` table backend
#[derive(Clone)]
pub struct SqliteRecipeCache {
    pool: SqlitePool,
    expiry: Duration,
}

impl SqliteRecipeCache {
    /// Create a cache over an existing, migrated pool
    #[must_use]
    pub const fn new(pool: SqlitePool, config: RecipeCacheConfig) -> Self {
        Self {
            pool,
            expiry: config.expiry,
        }
    }

    async fn fetch(&self, fingerprint: &str) -> AppResult<Option<CacheEntry>> {
        let row = sqlx::query(
            r"
            SELECT cache_key, recommendation_data, created_at, hit_count
            FROM recipe_cache
            WHERE cache_key = $1
            ",
        )
        .bind(fingerprint)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read recipe cache: {e}")))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    fn row_to_entry(row: &SqliteRow) -> AppResult<CacheEntry> {
        let fingerprint: String = row
            .try_get("cache_key")
            .map_err(|e| AppError::database(format!("Failed to get cache_key: {e}")))?;
        let data: String = row
            .try_get("recommendation_data")
            .map_err(|e| AppError::database(format!("Failed to get recommendation_data: {e}")))?;
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| AppError::database(format!("Failed to get created_at: {e}")))?;
        let hit_count: i64 = row
            .try_get("hit_count")
            .map_err(|e| AppError::database(format!("Failed to get hit_count: {e}")))?;

        Ok(CacheEntry {
            fingerprint,
            payload: serde_json::from_str(&data)?,
            created_at: parse_timestamp(&created_at)?,
            hit_count: u64::try_from(hit_count).unwrap_or(0),
        })
    }
}

#[async_trait]
impl RecipeCacheStore for SqliteRecipeCache {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn lookup(&self, fingerprint: &str) -> AppResult<Option<Recommendation>> {
        let Some(entry) = self.fetch(fingerprint).await? else {
            return Ok(None);
        };

        if entry.is_expired(Utc::now(), self.expiry) {
            sqlx::query("DELETE FROM recipe_cache WHERE cache_key = $1")
                .bind(fingerprint)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to expire recipe cache: {e}")))?;
            debug!(fingerprint, "Removed expired recipe cache entry");
            return Ok(None);
        }

        sqlx::query("UPDATE recipe_cache SET hit_count = hit_count + 1 WHERE cache_key = $1")
            .bind(fingerprint)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipe cache hit: {e}")))?;

        Ok(Some(entry.payload))
    }

    async fn store(&self, fingerprint: &str, recommendation: &Recommendation) -> AppResult<()> {
        let data = serde_json::to_string(recommendation)?;

        sqlx::query(
            r"
            INSERT INTO recipe_cache (cache_key, recommendation_data, created_at, hit_count)
            VALUES ($1, $2, $3, 0)
            ON CONFLICT(cache_key) DO UPDATE SET
                recommendation_data = excluded.recommendation_data,
                created_at = excluded.created_at,
                hit_count = 0
            ",
        )
        .bind(fingerprint)
        .bind(&data)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to write recipe cache: {e}")))?;

        Ok(())
    }

    async fn entry(&self, fingerprint: &str) -> AppResult<Option<CacheEntry>> {
        self.fetch(fingerprint).await
    }
}
