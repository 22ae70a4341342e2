// ABOUTME: Recommendation request and cooking constraint types
// ABOUTME: Applies defaults and bounds checks before a request enters the pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::limits::{
    DEFAULT_SERVINGS, DEFAULT_TIME_LIMIT_MIN, MAX_SERVINGS, MAX_TIME_LIMIT_MIN, MIN_SERVINGS,
    MIN_TIME_LIMIT_MIN,
};
use crate::errors::{AppError, AppResult};

/// Cooking constraints attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum cooking time in minutes
    #[serde(default = "default_time_limit")]
    pub time_limit_min: u32,
    /// Number of servings to cook for
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Kitchen tools available (pan, microwave, ...)
    #[serde(default)]
    pub tools: Vec<String>,
    /// Ingredients the caller wants to avoid (allergies, dislikes)
    #[serde(default)]
    pub exclude: Vec<String>,
}

const fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT_MIN
}

const fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            time_limit_min: DEFAULT_TIME_LIMIT_MIN,
            servings: DEFAULT_SERVINGS,
            tools: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Constraints {
    /// Set the time limit
    #[must_use]
    pub const fn with_time_limit(mut self, minutes: u32) -> Self {
        self.time_limit_min = minutes;
        self
    }

    /// Set the number of servings
    #[must_use]
    pub const fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Set the excluded ingredients
    #[must_use]
    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    /// Set the available tools
    #[must_use]
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }
}

/// A request for three recipes built from the caller's ingredients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Ingredients the caller has on hand
    pub ingredients: Vec<String>,
    /// Cooking constraints
    #[serde(default)]
    pub constraints: Constraints,
}

impl RecommendationRequest {
    /// Create a request with default constraints
    #[must_use]
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            constraints: Constraints::default(),
        }
    }

    /// Replace the constraints
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Trim ingredient and exclusion strings, drop blanks and check bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no ingredient survives trimming or when the
    /// time limit or servings fall outside their accepted ranges.
    pub fn validated(self) -> AppResult<Self> {
        let ingredients = trimmed_non_blank(self.ingredients);
        if ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "at least one ingredient is required",
            ));
        }

        let Constraints {
            time_limit_min,
            servings,
            tools,
            exclude,
        } = self.constraints;

        if !(MIN_TIME_LIMIT_MIN..=MAX_TIME_LIMIT_MIN).contains(&time_limit_min) {
            return Err(AppError::invalid_input(format!(
                "time_limit_min must be between {MIN_TIME_LIMIT_MIN} and {MAX_TIME_LIMIT_MIN}"
            )));
        }
        if !(MIN_SERVINGS..=MAX_SERVINGS).contains(&servings) {
            return Err(AppError::invalid_input(format!(
                "servings must be between {MIN_SERVINGS} and {MAX_SERVINGS}"
            )));
        }

        Ok(Self {
            ingredients,
            constraints: Constraints {
                time_limit_min,
                servings,
                tools: trimmed_non_blank(tools),
                exclude: trimmed_non_blank(exclude),
            },
        })
    }
}

fn trimmed_non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect()
}
