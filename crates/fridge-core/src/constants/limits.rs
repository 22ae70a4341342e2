// ABOUTME: Request bounds for cooking constraints and guest usage quotas
// ABOUTME: Used by inbound request validation and the guest quota gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default cooking time limit in minutes
pub const DEFAULT_TIME_LIMIT_MIN: u32 = 15;

/// Smallest accepted cooking time limit in minutes
pub const MIN_TIME_LIMIT_MIN: u32 = 5;

/// Largest accepted cooking time limit in minutes
pub const MAX_TIME_LIMIT_MIN: u32 = 60;

/// Default number of servings
pub const DEFAULT_SERVINGS: u32 = 1;

/// Smallest accepted number of servings
pub const MIN_SERVINGS: u32 = 1;

/// Largest accepted number of servings
pub const MAX_SERVINGS: u32 = 6;

/// Default number of recommendations an anonymous client may request per day
pub const DEFAULT_GUEST_DAILY_LIMIT: u32 = 3;

/// Search history entries older than this are not listed
pub const SEARCH_HISTORY_RETENTION_DAYS: i64 = 7;
