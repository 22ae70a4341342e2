// ABOUTME: Reconciler that splits recipe ingredients into have/need and builds the shopping list
// ABOUTME: Shopping items carry an optional purchase link from the configured partner program
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reconciliation
//!
//! Composes generated drafts into full recipes. Each recipe's required
//! ingredients are split against what the caller has, and the union of every
//! `need` list becomes one deduplicated, normalized shopping list.

use crate::config::PurchaseLinkConfig;
use crate::ingredients::{dedupe_shopping_list, split_have_need};
use crate::models::{Recipe, RecipeDraft, ShoppingItem};

const COUPANG_SEARCH_URL: &str = "https://www.coupang.com/np/search";

/// Builds partner search links for shopping items
#[derive(Debug, Clone, Default)]
pub struct PurchaseLinkBuilder {
    tracking_id: Option<String>,
    sub_id: Option<String>,
}

impl PurchaseLinkBuilder {
    /// Builder for a tracking id and optional sub id; blank values count as absent
    #[must_use]
    pub fn new(tracking_id: Option<String>, sub_id: Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            tracking_id: non_blank(tracking_id),
            sub_id: non_blank(sub_id),
        }
    }

    /// Builder from the purchase-link configuration section
    #[must_use]
    pub fn from_config(config: &PurchaseLinkConfig) -> Self {
        Self::new(config.tracking_id.clone(), config.sub_id.clone())
    }

    /// Search link for an item; `None` without a tracking id or for a blank item
    #[must_use]
    pub fn link_for(&self, item: &str) -> Option<String> {
        let tracking_id = self.tracking_id.as_deref()?;
        let item = item.trim();
        if item.is_empty() {
            return None;
        }

        let mut url = format!(
            "{COUPANG_SEARCH_URL}?component=&q={}&channel=user&tracker={}",
            urlencoding::encode(item),
            urlencoding::encode(tracking_id)
        );
        if let Some(sub_id) = &self.sub_id {
            url.push_str("&subId=");
            url.push_str(&urlencoding::encode(sub_id));
        }
        Some(url)
    }
}

/// Compose recipes and the shopping list.
///
/// `images` is positional; a missing slot means no image. Recipe order is
/// preserved.
#[must_use]
pub fn reconcile(
    owned: &[String],
    drafts: Vec<RecipeDraft>,
    images: Vec<Option<String>>,
    links: &PurchaseLinkBuilder,
) -> (Vec<Recipe>, Vec<ShoppingItem>) {
    let mut images = images.into_iter();
    let recipes: Vec<Recipe> = drafts
        .into_iter()
        .map(|draft| {
            let (have, need) = split_have_need(owned, &draft.ingredients_total);
            let image_url = images.next().flatten();
            Recipe::from_draft(draft, have, need, image_url)
        })
        .collect();

    let shopping_list = dedupe_shopping_list(
        recipes
            .iter()
            .flat_map(|recipe| recipe.ingredients_need.iter().map(String::as_str)),
    )
    .into_iter()
    .map(|item| ShoppingItem {
        purchase_url: links.link_for(&item),
        item,
    })
    .collect();

    (recipes, shopping_list)
}
