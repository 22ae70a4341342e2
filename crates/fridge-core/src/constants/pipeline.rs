// ABOUTME: Pipeline constants for recipe counts, step bounds and time budgets
// ABOUTME: Budget values are defaults; the external ceiling is configurable at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Every recommendation carries exactly this many recipes
pub const RECIPES_PER_RECOMMENDATION: usize = 3;

/// Minimum number of preparation steps per recipe
pub const MIN_RECIPE_STEPS: usize = 4;

/// Maximum number of preparation steps per recipe
pub const MAX_RECIPE_STEPS: usize = 8;

/// Default total pipeline budget in seconds (upstream gateway ceiling)
pub const DEFAULT_PIPELINE_BUDGET_SECS: u64 = 28;

/// Default minimum image-enrichment deadline in seconds
pub const DEFAULT_IMAGE_DEADLINE_FLOOR_SECS: u64 = 5;

/// Default per-request timeout for image search calls
pub const DEFAULT_IMAGE_SEARCH_TIMEOUT_SECS: u64 = 3;

/// Default attempts for the language-model generator before it is considered failed
pub const DEFAULT_LLM_MAX_ATTEMPTS: u32 = 2;

/// Prefix of recommendation identifiers
pub const RECOMMENDATION_ID_PREFIX: &str = "rec_";

/// Number of hex characters after the identifier prefix
pub const RECOMMENDATION_ID_HEX_LEN: usize = 10;

/// Maximum titles accepted by the batch image endpoint
pub const MAX_BATCH_IMAGE_TITLES: usize = 10;
