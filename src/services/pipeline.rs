// ABOUTME: Recommendation pipeline orchestrating cache, generation, images, reconciliation and validation
// ABOUTME: Only validation failures reach the caller; every other failure degrades gracefully
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Pipeline
//!
//! One run proceeds through fixed phases:
//!
//! 1. fingerprint the request and look it up in the recipe cache
//! 2. on a miss, walk the generator chain (always yields three drafts)
//! 3. fetch images for the three titles concurrently under the remaining budget
//! 4. split have/need and build the shopping list
//! 5. validate
//! 6. write through to the cache and persist the record
//!
//! Cache and record-store failures are logged and swallowed. A cache hit is
//! re-issued under a fresh identifier so callers sharing cached content never
//! share a record.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::cache::{fingerprint, RecipeCacheStore};
use crate::config::PipelineConfig;
use crate::constants::cache::FINGERPRINT_LOG_PREFIX_LEN;
use crate::constants::pipeline::{
    DEFAULT_IMAGE_DEADLINE_FLOOR_SECS, DEFAULT_PIPELINE_BUDGET_SECS,
};
use crate::database::RecordStore;
use crate::errors::AppResult;
use crate::generation::GeneratorChain;
use crate::images::ImageSearchService;
use crate::models::{Recommendation, RecommendationRequest};
use crate::reconcile::{reconcile, PurchaseLinkBuilder};
use crate::validation::validate;

/// Time allowed for a whole pipeline run and the image phase's minimum share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineBudget {
    /// Ceiling imposed by the upstream caller
    pub total: Duration,
    /// Image lookups always get at least this long
    pub image_floor: Duration,
}

impl Default for PipelineBudget {
    fn default() -> Self {
        Self {
            total: Duration::from_secs(DEFAULT_PIPELINE_BUDGET_SECS),
            image_floor: Duration::from_secs(DEFAULT_IMAGE_DEADLINE_FLOOR_SECS),
        }
    }
}

impl PipelineBudget {
    /// Budget from the pipeline configuration section
    #[must_use]
    pub const fn from_config(config: &PipelineConfig) -> Self {
        Self {
            total: config.budget,
            image_floor: config.image_deadline_floor,
        }
    }

    /// Time the image phase may take once `elapsed` has been spent
    #[must_use]
    pub fn image_window(&self, elapsed: Duration) -> Duration {
        self.total.saturating_sub(elapsed).max(self.image_floor)
    }
}

/// The recommendation orchestrator
pub struct RecommendationPipeline {
    generators: GeneratorChain,
    images: Arc<ImageSearchService>,
    records: Arc<dyn RecordStore>,
    cache: Option<Arc<dyn RecipeCacheStore>>,
    links: PurchaseLinkBuilder,
    budget: PipelineBudget,
}

impl RecommendationPipeline {
    /// Pipeline without a recipe cache, purchase links or custom budget
    #[must_use]
    pub fn new(
        generators: GeneratorChain,
        images: Arc<ImageSearchService>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            generators,
            images,
            records,
            cache: None,
            links: PurchaseLinkBuilder::default(),
            budget: PipelineBudget::default(),
        }
    }

    /// Serve identical requests from this cache
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn RecipeCacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach purchase links to shopping items
    #[must_use]
    pub fn with_purchase_links(mut self, links: PurchaseLinkBuilder) -> Self {
        self.links = links;
        self
    }

    /// Override the time budget
    #[must_use]
    pub const fn with_budget(mut self, budget: PipelineBudget) -> Self {
        self.budget = budget;
        self
    }

    /// The configured time budget
    #[must_use]
    pub const fn budget(&self) -> PipelineBudget {
        self.budget
    }

    /// Produce, validate and persist a recommendation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the request is malformed or the composed
    /// recommendation violates a validation rule. No other failure surfaces.
    #[instrument(skip_all, fields(ingredients = request.ingredients.len()))]
    pub async fn recommend(&self, request: RecommendationRequest) -> AppResult<Recommendation> {
        let started = Instant::now();
        let request = request.validated()?;
        let key = fingerprint(&request);
        let key_prefix = key.get(..FINGERPRINT_LOG_PREFIX_LEN).unwrap_or(&key);

        if let Some(cached) = self.cached(&key).await {
            info!(fingerprint = key_prefix, "Recipe cache hit");
            let recommendation = cached.reissued();
            validate(&recommendation, &request)?;
            self.persist(&recommendation).await;
            return Ok(recommendation);
        }
        info!(fingerprint = key_prefix, "Recipe cache miss");

        let generated = self.generators.generate(&request).await;
        let titles: Vec<String> = generated
            .recipes
            .iter()
            .map(|draft| draft.title.clone())
            .collect();

        let window = self.budget.image_window(started.elapsed());
        info!(
            provider = generated.provider,
            image_window_ms = window.as_millis(),
            "Fetching recipe images"
        );
        let images = self.images.fetch_all(&titles, Instant::now() + window).await;

        let (recipes, shopping_list) =
            reconcile(&request.ingredients, generated.recipes, images, &self.links);
        let recommendation = Recommendation::new(recipes, shopping_list);
        validate(&recommendation, &request)?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(&key, &recommendation).await {
                warn!(fingerprint = key_prefix, error = %e, "Recipe cache store failed");
            }
        }
        self.persist(&recommendation).await;

        info!(
            id = %recommendation.id,
            provider = generated.provider,
            elapsed_ms = started.elapsed().as_millis(),
            "Recommendation served"
        );
        Ok(recommendation)
    }

    async fn cached(&self, key: &str) -> Option<Recommendation> {
        let cache = self.cache.as_ref()?;
        match cache.lookup(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(backend = cache.backend_name(), error = %e, "Recipe cache lookup failed");
                None
            }
        }
    }

    async fn persist(&self, recommendation: &Recommendation) {
        if let Err(e) = self.records.save(recommendation).await {
            warn!(id = %recommendation.id, error = %e, "Failed to persist recommendation record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_window_shrinks_to_floor() {
        let budget = PipelineBudget {
            total: Duration::from_secs(28),
            image_floor: Duration::from_secs(5),
        };
        assert_eq!(budget.image_window(Duration::from_secs(3)), Duration::from_secs(25));
        assert_eq!(budget.image_window(Duration::from_secs(26)), Duration::from_secs(5));
        assert_eq!(budget.image_window(Duration::from_secs(40)), Duration::from_secs(5));
    }
}
