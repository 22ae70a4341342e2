// ABOUTME: Core data models for the recommendation pipeline
// ABOUTME: Requests, recipes, recommendations, cache entries and search history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Wire-compatible types shared by the pipeline, the stores and the HTTP layer.

mod history;
mod recipe;
mod recommendation;
mod request;

pub use history::SearchHistoryEntry;
pub use recipe::{Recipe, RecipeDraft, ShoppingItem};
pub use recommendation::{CacheEntry, Recommendation};
pub use request::{Constraints, RecommendationRequest};
