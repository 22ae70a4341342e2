// ABOUTME: Recommendation response and cache entry types
// ABOUTME: Every served recommendation gets its own identifier, even when cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recipe::{Recipe, ShoppingItem};
use crate::constants::pipeline::{RECOMMENDATION_ID_HEX_LEN, RECOMMENDATION_ID_PREFIX};

/// Three recipes plus the shopping list needed to cook them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identifier, `rec_` followed by hex characters
    pub id: String,
    /// When this recommendation was served
    pub created_at: DateTime<Utc>,
    /// The recipes, in generation order
    pub recipes: Vec<Recipe>,
    /// Deduplicated items to buy
    pub shopping_list: Vec<ShoppingItem>,
}

impl Recommendation {
    /// Create a recommendation with a fresh identifier and timestamp
    #[must_use]
    pub fn new(recipes: Vec<Recipe>, shopping_list: Vec<ShoppingItem>) -> Self {
        Self {
            id: Self::generate_id(),
            created_at: Utc::now(),
            recipes,
            shopping_list,
        }
    }

    /// Mint a new recommendation identifier
    #[must_use]
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!(
            "{RECOMMENDATION_ID_PREFIX}{}",
            &hex[..RECOMMENDATION_ID_HEX_LEN]
        )
    }

    /// Copy of this recommendation's content under a new identifier and timestamp
    #[must_use]
    pub fn reissued(&self) -> Self {
        Self {
            id: Self::generate_id(),
            created_at: Utc::now(),
            recipes: self.recipes.clone(),
            shopping_list: self.shopping_list.clone(),
        }
    }

    /// Recipe titles in order
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.recipes.iter().map(|recipe| recipe.title.clone()).collect()
    }
}

/// A cached recommendation keyed by request fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Request fingerprint
    pub fingerprint: String,
    /// Stored recommendation
    pub payload: Recommendation,
    /// When the entry was (re)written
    pub created_at: DateTime<Utc>,
    /// Lookups served since the entry was written
    pub hit_count: u64,
}

impl CacheEntry {
    /// Fresh entry with a zero hit counter
    #[must_use]
    pub fn new(fingerprint: impl Into<String>, payload: Recommendation) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            payload,
            created_at: Utc::now(),
            hit_count: 0,
        }
    }

    /// Whether the entry is older than the expiry window at `now`.
    /// Entries stamped in the future are never expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, expiry: Duration) -> bool {
        (now - self.created_at)
            .to_std()
            .is_ok_and(|age| age > expiry)
    }
}
