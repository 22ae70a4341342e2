// ABOUTME: Search history side record written for identified callers
// ABOUTME: Captures the request inputs and the resulting recipe titles and images
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recommendation::Recommendation;
use super::request::RecommendationRequest;

/// What an identified caller searched for and what they got back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// Entry identifier
    pub id: String,
    /// Caller identifier supplied by the auth gateway
    pub user_id: String,
    /// Recommendation served for this search
    pub recommendation_id: String,
    /// Ingredients searched with
    pub ingredients: Vec<String>,
    /// Time limit searched with
    pub time_limit_min: u32,
    /// Servings searched with
    pub servings: u32,
    /// Resulting recipe titles
    pub recipe_titles: Vec<String>,
    /// Resulting recipe images, positionally matched to titles
    pub recipe_images: Vec<Option<String>>,
    /// When the search happened
    pub searched_at: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// Build the side record for a served recommendation
    #[must_use]
    pub fn record(
        user_id: impl Into<String>,
        request: &RecommendationRequest,
        recommendation: &Recommendation,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            recommendation_id: recommendation.id.clone(),
            ingredients: request.ingredients.clone(),
            time_limit_min: request.constraints.time_limit_min,
            servings: request.constraints.servings,
            recipe_titles: recommendation.titles(),
            recipe_images: recommendation
                .recipes
                .iter()
                .map(|recipe| recipe.image_url.clone())
                .collect(),
            searched_at: Utc::now(),
        }
    }
}
