// ABOUTME: Re-exports the request, recipe and recommendation models
// ABOUTME: Definitions live in the foundation crate so stores and routes share them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models

pub use fridge_core::models::{
    CacheEntry, Constraints, Recipe, RecipeDraft, Recommendation, RecommendationRequest,
    SearchHistoryEntry, ShoppingItem,
};
