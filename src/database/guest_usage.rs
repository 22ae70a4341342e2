// ABOUTME: Daily usage counters for anonymous callers, keyed by client address
// ABOUTME: Gates recommendation requests at a fixed per-day quota
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};

/// Remaining allowance for a client today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    /// Requests already made today
    pub used: u32,
    /// Daily limit
    pub limit: u32,
}

impl QuotaStatus {
    /// Requests still allowed today
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// Whether the client has used up today's allowance
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// `guest_usage` table manager
#[derive(Clone)]
pub struct GuestUsageManager {
    pool: SqlitePool,
    daily_limit: u32,
}

impl GuestUsageManager {
    /// Create a manager enforcing `daily_limit` requests per client per day
    #[must_use]
    pub const fn new(pool: SqlitePool, daily_limit: u32) -> Self {
        Self { pool, daily_limit }
    }

    fn today() -> String {
        Utc::now().date_naive().to_string()
    }

    /// Current allowance for a client
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read
    pub async fn status(&self, ip_address: &str) -> AppResult<QuotaStatus> {
        let row = sqlx::query(
            "SELECT count FROM guest_usage WHERE ip_address = $1 AND usage_date = $2",
        )
        .bind(ip_address)
        .bind(Self::today())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read guest usage: {e}")))?;

        let used = match row {
            Some(row) => row
                .try_get::<i64, _>("count")
                .map_err(|e| AppError::database(format!("Failed to get count: {e}")))?,
            None => 0,
        };

        Ok(QuotaStatus {
            used: u32::try_from(used).unwrap_or(u32::MAX),
            limit: self.daily_limit,
        })
    }

    /// Count one more request for today and return the updated allowance
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be written
    pub async fn increment(&self, ip_address: &str) -> AppResult<QuotaStatus> {
        let row = sqlx::query(
            r"
            INSERT INTO guest_usage (ip_address, usage_date, count)
            VALUES ($1, $2, 1)
            ON CONFLICT(ip_address, usage_date) DO UPDATE SET count = count + 1
            RETURNING count
            ",
        )
        .bind(ip_address)
        .bind(Self::today())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update guest usage: {e}")))?;

        let used: i64 = row
            .try_get("count")
            .map_err(|e| AppError::database(format!("Failed to get count: {e}")))?;

        Ok(QuotaStatus {
            used: u32::try_from(used).unwrap_or(u32::MAX),
            limit: self.daily_limit,
        })
    }
}
