// ABOUTME: Search history side records for identified callers
// ABOUTME: Stores request inputs with the resulting recipe titles and images
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::parse_timestamp;
use crate::constants::limits::SEARCH_HISTORY_RETENTION_DAYS;
use crate::errors::{AppError, AppResult};
use crate::models::SearchHistoryEntry;

/// `search_histories` table manager
#[derive(Clone)]
pub struct SearchHistoryManager {
    pool: SqlitePool,
}

impl SearchHistoryManager {
    /// Create a manager over an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one entry
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn create(&self, entry: &SearchHistoryEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO search_histories (
                id, user_id, recommendation_id, ingredients, time_limit_min,
                servings, recipe_titles, recipe_images, searched_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.recommendation_id)
        .bind(serde_json::to_string(&entry.ingredients)?)
        .bind(i64::from(entry.time_limit_min))
        .bind(i64::from(entry.servings))
        .bind(serde_json::to_string(&entry.recipe_titles)?)
        .bind(serde_json::to_string(&entry.recipe_images)?)
        .bind(entry.searched_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save search history: {e}")))?;

        Ok(())
    }

    /// Entries of a user from the retention window, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_recent(&self, user_id: &str, limit: u32) -> AppResult<Vec<SearchHistoryEntry>> {
        let since = (Utc::now() - Duration::days(SEARCH_HISTORY_RETENTION_DAYS)).to_rfc3339();

        let rows = sqlx::query(
            r"
            SELECT id, user_id, recommendation_id, ingredients, time_limit_min,
                   servings, recipe_titles, recipe_images, searched_at
            FROM search_histories
            WHERE user_id = $1 AND searched_at >= $2
            ORDER BY searched_at DESC
            LIMIT $3
            ",
        )
        .bind(user_id)
        .bind(&since)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list search history: {e}")))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    fn row_to_entry(row: &SqliteRow) -> AppResult<SearchHistoryEntry> {
        let text = |column: &str| -> AppResult<String> {
            row.try_get(column)
                .map_err(|e| AppError::database(format!("Failed to get {column}: {e}")))
        };
        let number = |column: &str| -> AppResult<u32> {
            let value: i64 = row
                .try_get(column)
                .map_err(|e| AppError::database(format!("Failed to get {column}: {e}")))?;
            u32::try_from(value)
                .map_err(|e| AppError::database(format!("Invalid {column}: {e}")))
        };

        Ok(SearchHistoryEntry {
            id: text("id")?,
            user_id: text("user_id")?,
            recommendation_id: text("recommendation_id")?,
            ingredients: serde_json::from_str(&text("ingredients")?)?,
            time_limit_min: number("time_limit_min")?,
            servings: number("servings")?,
            recipe_titles: serde_json::from_str(&text("recipe_titles")?)?,
            recipe_images: serde_json::from_str(&text("recipe_images")?)?,
            searched_at: parse_timestamp(&text("searched_at")?)?,
        })
    }
}
