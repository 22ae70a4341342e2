// ABOUTME: Durable recommendation records keyed by their own identifier
// ABOUTME: In-memory and SQLite backends behind the RecordStore trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::Recommendation;

/// Storage for served recommendations
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or replace the record for `recommendation.id`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn save(&self, recommendation: &Recommendation) -> AppResult<()>;

    /// Fetch a record by identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the payload is corrupt
    async fn get(&self, id: &str) -> AppResult<Option<Recommendation>>;

    /// Number of stored records
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn count(&self) -> AppResult<u64>;
}

/// Process-local record store
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<DashMap<String, Recommendation>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, recommendation: &Recommendation) -> AppResult<()> {
        self.records
            .insert(recommendation.id.clone(), recommendation.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> AppResult<Option<Recommendation>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.records.len() as u64)
    }
}

/// `recommendations` table backend
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Create a store over an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn save(&self, recommendation: &Recommendation) -> AppResult<()> {
        let data = serde_json::to_string(recommendation)?;

        sqlx::query(
            r"
            INSERT INTO recommendations (id, created_at, data)
            VALUES ($1, $2, $3)
            ON CONFLICT(id) DO UPDATE SET data = excluded.data
            ",
        )
        .bind(&recommendation.id)
        .bind(recommendation.created_at.to_rfc3339())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save recommendation: {e}")))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> AppResult<Option<Recommendation>> {
        let row = sqlx::query("SELECT data FROM recommendations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch recommendation: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let data: String = row
            .try_get("data")
            .map_err(|e| AppError::database(format!("Failed to get data: {e}")))?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    async fn count(&self) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM recommendations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recommendations: {e}")))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| AppError::database(format!("Failed to get total: {e}")))?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}
