// ABOUTME: Direct LLM recipe generator with bounded retry
// ABOUTME: Each attempt rolls a new style and method hint to vary the output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use super::parse::parse_recipe_drafts;
use super::RecipeGenerator;
use crate::errors::GenerationError;
use crate::ingredients::expand_all;
use crate::llm::prompts::{
    recipe_user_prompt, COOKING_METHODS, COOKING_STYLES, RECIPE_GENERATION_PROMPT,
};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{RecipeDraft, RecommendationRequest};

/// Sampling settings for direct generation
#[derive(Debug, Clone, Copy)]
pub struct LlmGenerationSettings {
    /// Sampling temperature
    pub temperature: f32,
    /// Max output tokens
    pub max_tokens: u32,
    /// Attempts before the backend is reported as failed
    pub max_attempts: u32,
}

impl Default for LlmGenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4000,
            max_attempts: 2,
        }
    }
}

/// Generates recipes straight from the ingredient list
pub struct LlmRecipeGenerator {
    provider: Arc<dyn LlmProvider>,
    settings: LlmGenerationSettings,
}

impl LlmRecipeGenerator {
    /// Backend name
    pub const NAME: &'static str = "llm";

    /// Create a generator over a chat provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, settings: LlmGenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Pick one style and one method hint; the RNG is not held across awaits
    fn roll_hints() -> (&'static str, &'static str) {
        let mut rng = rand::thread_rng();
        let style = COOKING_STYLES.choose(&mut rng).copied().unwrap_or("간단 자취 요리");
        let method = COOKING_METHODS.choose(&mut rng).copied().unwrap_or("볶음 요리 중심");
        (style, method)
    }

    async fn attempt_once(
        &self,
        request: &RecommendationRequest,
        user_prompt: String,
    ) -> Result<Vec<RecipeDraft>, GenerationError> {
        let chat = ChatRequest::new(vec![
            ChatMessage::system(RECIPE_GENERATION_PROMPT),
            ChatMessage::user(user_prompt),
        ])
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_tokens);

        let response = self
            .provider
            .complete(&chat)
            .await
            .map_err(|e| GenerationError::from_app_error(Self::NAME, &e))?;

        debug!(
            model = %response.model,
            preview = %response.content.chars().take(200).collect::<String>(),
            "LLM response received"
        );
        parse_recipe_drafts(Self::NAME, &response.content, request)
    }
}

#[async_trait]
impl RecipeGenerator for LlmRecipeGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[instrument(skip_all, fields(provider = self.provider.name()))]
    async fn attempt(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecipeDraft>, GenerationError> {
        let exclusions = expand_all(&request.constraints.exclude);
        let max_attempts = self.settings.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let (style, method) = Self::roll_hints();
            let user_prompt = recipe_user_prompt(request, &exclusions, style, method);
            info!(attempt, max_attempts, style, method, "LLM recipe generation attempt");

            match self.attempt_once(request, user_prompt).await {
                Ok(recipes) => return Ok(recipes),
                // Missing credentials will not fix themselves on retry
                Err(err @ GenerationError::Unavailable { .. }) => return Err(err),
                Err(err) => {
                    warn!(attempt, max_attempts, error = %err, "LLM recipe generation attempt failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GenerationError::Transport {
            provider: Self::NAME,
            message: "no attempts made".to_owned(),
        }))
    }
}
