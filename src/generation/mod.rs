// ABOUTME: Recipe generation provider chain with ordered fallback
// ABOUTME: Fallible backends are tried in order; the offline generator always answers last
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generation Provider Chain
//!
//! Every backend implements [`RecipeGenerator`] and reports its outcome as a
//! `Result`. The chain walks the configured backends in order, logging and
//! skipping failures, and ends with [`OfflineRecipeGenerator`], which has no
//! external dependency and cannot fail. The chain itself is therefore
//! infallible.

/// Direct LLM generation with bounded retry
pub mod llm;
/// Deterministic last-resort generator
pub mod offline;
/// Shared parsing of LLM recipe output
pub mod parse;
/// Search-grounded generation from cooking videos
pub mod video_search;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{error, info, warn};

pub use llm::LlmRecipeGenerator;
pub use offline::OfflineRecipeGenerator;
pub use video_search::VideoSearchGenerator;

use crate::constants::pipeline::RECIPES_PER_RECOMMENDATION;
use crate::errors::GenerationError;
use crate::models::{RecipeDraft, RecommendationRequest};

/// A recipe generation backend
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Short backend name used in logs and results
    fn name(&self) -> &'static str;

    /// Produce exactly three draft recipes for the request
    async fn attempt(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecipeDraft>, GenerationError>;
}

/// Recipes produced by the chain and the backend that produced them
#[derive(Debug, Clone)]
pub struct Generated {
    /// Backend name
    pub provider: &'static str,
    /// Draft recipes in backend order
    pub recipes: Vec<RecipeDraft>,
}

/// Reject any draft list that is not exactly three recipes long
///
/// # Errors
///
/// Returns `GenerationError::WrongCount` for any other length
pub fn ensure_recipe_count(
    provider: &'static str,
    recipes: Vec<RecipeDraft>,
) -> Result<Vec<RecipeDraft>, GenerationError> {
    if recipes.len() == RECIPES_PER_RECOMMENDATION {
        Ok(recipes)
    } else {
        Err(GenerationError::WrongCount {
            provider,
            count: recipes.len(),
            expected: RECIPES_PER_RECOMMENDATION,
        })
    }
}

/// Ordered fallible backends followed by the offline terminal
pub struct GeneratorChain {
    providers: Vec<Arc<dyn RecipeGenerator>>,
    terminal: OfflineRecipeGenerator,
}

impl GeneratorChain {
    /// Chain with no fallible backends; only the offline generator answers
    #[must_use]
    pub fn new(terminal: OfflineRecipeGenerator) -> Self {
        Self {
            providers: Vec::new(),
            terminal,
        }
    }

    /// Append a backend; backends are tried in insertion order
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn RecipeGenerator>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Names of the backends in try order, terminal last
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .map(|provider| provider.name())
            .chain([OfflineRecipeGenerator::NAME])
            .collect()
    }

    /// Walk the chain until a backend returns exactly three recipes
    pub async fn generate(&self, request: &RecommendationRequest) -> Generated {
        for provider in &self.providers {
            let name = provider.name();
            let started = Instant::now();

            let outcome = provider
                .attempt(request)
                .await
                .and_then(|recipes| ensure_recipe_count(name, recipes));

            match outcome {
                Ok(recipes) => {
                    info!(
                        provider = name,
                        elapsed_ms = started.elapsed().as_millis(),
                        "Recipes generated"
                    );
                    return Generated {
                        provider: name,
                        recipes,
                    };
                }
                Err(err @ GenerationError::Unavailable { .. }) => {
                    warn!(provider = name, error = %err, "Generation backend unavailable, falling back");
                }
                Err(err) => {
                    error!(
                        provider = name,
                        elapsed_ms = started.elapsed().as_millis(),
                        error = %err,
                        "Generation backend failed, falling back"
                    );
                }
            }
        }

        warn!("All generation backends failed, using offline recipes");
        Generated {
            provider: OfflineRecipeGenerator::NAME,
            recipes: self.terminal.generate(request),
        }
    }
}

impl fmt::Debug for GeneratorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorChain")
            .field("providers", &self.provider_names())
            .finish()
    }
}
