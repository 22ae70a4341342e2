// ABOUTME: Fail-fast validator for composed recommendations
// ABOUTME: Enforces recipe count, time limit, step bounds and exclusion safety
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Validation
//!
//! The last gate before a recommendation is cached, persisted or returned.
//! Rules are checked in order and the first violation is reported:
//!
//! 1. exactly three recipes
//! 2. per recipe, in order: cooking time within the limit, 4 to 8 steps,
//!    and no expanded exclusion term anywhere in the recipe text

use std::collections::BTreeSet;

use crate::constants::pipeline::{MAX_RECIPE_STEPS, MIN_RECIPE_STEPS, RECIPES_PER_RECOMMENDATION};
use crate::errors::ValidationError;
use crate::ingredients::expand_all;
use crate::models::{Recipe, Recommendation, RecommendationRequest};

/// Lowercased, whitespace-joined text the exclusion check scans
fn searchable_text(recipe: &Recipe) -> String {
    [recipe.title.as_str(), recipe.summary.as_str()]
        .into_iter()
        .chain(recipe.ingredients_have.iter().map(String::as_str))
        .chain(recipe.ingredients_need.iter().map(String::as_str))
        .chain(recipe.steps.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn check_recipe(
    recipe: &Recipe,
    time_limit: u32,
    exclusions: &BTreeSet<String>,
) -> Result<(), ValidationError> {
    if recipe.time_min > time_limit {
        return Err(ValidationError::TimeLimitExceeded {
            title: recipe.title.clone(),
            time_min: recipe.time_min,
            limit: time_limit,
        });
    }

    let steps = recipe.steps.len();
    if !(MIN_RECIPE_STEPS..=MAX_RECIPE_STEPS).contains(&steps) {
        return Err(ValidationError::StepCount {
            title: recipe.title.clone(),
            steps,
        });
    }

    if exclusions.is_empty() {
        return Ok(());
    }
    let text = searchable_text(recipe);
    match exclusions.iter().find(|term| text.contains(term.as_str())) {
        Some(term) => Err(ValidationError::ExcludedIngredient { term: term.clone() }),
        None => Ok(()),
    }
}

/// Check a composed recommendation against the request it answers
///
/// # Errors
///
/// Returns the first violated rule
pub fn validate(
    recommendation: &Recommendation,
    request: &RecommendationRequest,
) -> Result<(), ValidationError> {
    let count = recommendation.recipes.len();
    if count != RECIPES_PER_RECOMMENDATION {
        return Err(ValidationError::RecipeCount { count });
    }

    let exclusions = expand_all(&request.constraints.exclude);
    recommendation
        .recipes
        .iter()
        .try_for_each(|recipe| check_recipe(recipe, request.constraints.time_limit_min, &exclusions))
}
