// ABOUTME: SQLite connection management and schema migrations
// ABOUTME: Hosts records, recipe cache, image cache, search history and guest usage tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One SQLite pool shared by every persistent store. Each store owns a clone
//! of the pool; `Database` only opens the connection and creates the schema.

/// Per-client daily usage counters for anonymous callers
pub mod guest_usage;
/// Durable recommendation records
pub mod records;
/// Search history side records for identified callers
pub mod search_history;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, AppResult};

pub use guest_usage::{GuestUsageManager, QuotaStatus};
pub use records::{InMemoryRecordStore, RecordStore, SqliteRecordStore};
pub use search_history::SearchHistoryManager;

/// Database connection owner
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database, creating the file if needed, and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");

        // In-memory SQLite is per connection, so the pool must not open a second one
        let (options, url) = if in_memory {
            (SqlitePoolOptions::new().max_connections(1), database_url.to_owned())
        } else if database_url.starts_with("sqlite:") && !database_url.contains('?') {
            (SqlitePoolOptions::new(), format!("{database_url}?mode=rwc"))
        } else {
            (SqlitePoolOptions::new(), database_url.to_owned())
        };

        let pool = options
            .connect(&url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(in_memory, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table used by the server
    ///
    /// # Errors
    ///
    /// Returns an error if a `CREATE TABLE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        const STATEMENTS: &[&str] = &[
            r"
            CREATE TABLE IF NOT EXISTS recommendations (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                data TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS recipe_cache (
                cache_key TEXT PRIMARY KEY,
                recommendation_data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                hit_count INTEGER NOT NULL DEFAULT 0
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS image_cache (
                title TEXT PRIMARY KEY,
                image_url TEXT,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS search_histories (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                recommendation_id TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                time_limit_min INTEGER NOT NULL,
                servings INTEGER NOT NULL,
                recipe_titles TEXT NOT NULL,
                recipe_images TEXT NOT NULL,
                searched_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_search_histories_user
                ON search_histories (user_id, searched_at)
            ",
            r"
            CREATE TABLE IF NOT EXISTS guest_usage (
                ip_address TEXT NOT NULL,
                usage_date TEXT NOT NULL,
                count INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (ip_address, usage_date)
            )
            ",
        ];

        for statement in STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp stored as TEXT
///
/// # Errors
///
/// Returns a database error if the column holds an invalid timestamp
pub fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp '{value}': {e}")))
}
