// ABOUTME: Business-rule violations raised when a composed recommendation is checked
// ABOUTME: Each variant displays as the rule code surfaced verbatim to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// A rule a recommendation violated.
///
/// Validation is fail-fast, so a rejected recommendation reports exactly one
/// of these. The `Display` form is the stable rule code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The recommendation does not carry exactly three recipes
    #[error("recipes_must_be_3")]
    RecipeCount {
        /// Number of recipes found
        count: usize,
    },
    /// A recipe takes longer than the requested time limit
    #[error("time_limit_exceeded")]
    TimeLimitExceeded {
        /// Offending recipe title
        title: String,
        /// Recipe cooking time in minutes
        time_min: u32,
        /// Requested limit in minutes
        limit: u32,
    },
    /// A recipe has fewer or more steps than allowed
    #[error("steps_length_invalid")]
    StepCount {
        /// Offending recipe title
        title: String,
        /// Number of steps found
        steps: usize,
    },
    /// Recipe text mentions an excluded ingredient or one of its derivatives
    #[error("exclude_ingredient_detected: {term}")]
    ExcludedIngredient {
        /// The matched exclusion term
        term: String,
    },
}

impl ValidationError {
    /// Stable rule code without the matched term
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::RecipeCount { .. } => "recipes_must_be_3",
            Self::TimeLimitExceeded { .. } => "time_limit_exceeded",
            Self::StepCount { .. } => "steps_length_invalid",
            Self::ExcludedIngredient { .. } => "exclude_ingredient_detected",
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        let details = json!({ "rule": error.rule() });
        Self::new(ErrorCode::InvalidInput, error.to_string()).with_details(details)
    }
}
