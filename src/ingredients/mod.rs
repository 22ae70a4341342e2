// ABOUTME: Ingredient text handling shared by generation, reconciliation and validation
// ABOUTME: Exclusion expansion and normalization of free-text ingredient strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredients
//!
//! Pure functions with no I/O:
//!
//! - **exclusions**: widen an avoid-list to allergen families
//! - **normalizer**: canonical names, shopping list dedupe, have/need split

/// Allergen family expansion
pub mod exclusions;
/// Free-text ingredient normalization
pub mod normalizer;

pub use exclusions::{expand, expand_all, DerivativeGroup, DERIVATIVE_GROUPS};
pub use normalizer::{comparison_key, dedupe_shopping_list, normalize, split_have_need};
