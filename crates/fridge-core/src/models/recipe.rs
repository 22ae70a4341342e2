// ABOUTME: Recipe types produced by generation backends and returned to callers
// ABOUTME: Drafts lack the have/need split and image which later pipeline phases add
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A recipe as produced by a generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Recipe title
    pub title: String,
    /// Cooking time in minutes
    pub time_min: u32,
    /// Number of servings
    pub servings: u32,
    /// One-line summary
    #[serde(default)]
    pub summary: String,
    /// Every ingredient the recipe requires
    #[serde(default)]
    pub ingredients_total: Vec<String>,
    /// Ordered preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Optional tips
    #[serde(default)]
    pub tips: Vec<String>,
    /// Optional warnings
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A fully composed recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title
    pub title: String,
    /// Cooking time in minutes
    pub time_min: u32,
    /// Number of servings
    pub servings: u32,
    /// One-line summary
    #[serde(default)]
    pub summary: String,
    /// Image reference, absent when no provider found one in time
    #[serde(default)]
    pub image_url: Option<String>,
    /// Every ingredient the recipe requires
    #[serde(default)]
    pub ingredients_total: Vec<String>,
    /// Required ingredients the caller already has
    #[serde(default)]
    pub ingredients_have: Vec<String>,
    /// Required ingredients the caller must buy
    #[serde(default)]
    pub ingredients_need: Vec<String>,
    /// Ordered preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Optional tips
    #[serde(default)]
    pub tips: Vec<String>,
    /// Optional warnings
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Recipe {
    /// Compose a recipe from a draft, its have/need split and an optional image
    #[must_use]
    pub fn from_draft(
        draft: RecipeDraft,
        ingredients_have: Vec<String>,
        ingredients_need: Vec<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            title: draft.title,
            time_min: draft.time_min,
            servings: draft.servings,
            summary: draft.summary,
            image_url,
            ingredients_total: draft.ingredients_total,
            ingredients_have,
            ingredients_need,
            steps: draft.steps,
            tips: draft.tips,
            warnings: draft.warnings,
        }
    }
}

/// One entry of the consolidated shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Normalized ingredient name
    pub item: String,
    /// Optional link to buy the item
    #[serde(default)]
    pub purchase_url: Option<String>,
}
