// ABOUTME: Cache-related constants for recipe and image cache expiry
// ABOUTME: Recipe cache entries are lazily removed once older than the expiry window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Recipe cache expiry window in days
pub const RECIPE_CACHE_EXPIRY_DAYS: u64 = 7;

/// Recipe cache expiry window in seconds (7 days)
pub const RECIPE_CACHE_EXPIRY_SECS: u64 = 604_800;

/// Number of hex characters of a fingerprint shown in logs
pub const FINGERPRINT_LOG_PREFIX_LEN: usize = 12;
