// ABOUTME: Chat provider selector built from server configuration
// ABOUTME: Dispatches to the Anthropic or OpenAI-compatible backend at runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Selector
//!
//! `LLM_PROVIDER` picks the backend:
//! - `anthropic` (default): Anthropic Messages API, needs `ANTHROPIC_API_KEY`
//! - `openai_compatible`: any `/chat/completions` server (Ollama, vLLM)
//! - `none`: no LLM; only search-free generation backends run

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use super::{
    AnthropicConfig, AnthropicProvider, ChatRequest, ChatResponse, LlmProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::AppError;

/// Runtime-selected chat backend
pub enum ChatProvider {
    /// Anthropic Messages API
    Anthropic(AnthropicProvider),
    /// OpenAI-compatible endpoint
    OpenAiCompatible(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Build the configured provider
    ///
    /// # Errors
    ///
    /// Returns a config error when `LLM_PROVIDER=none` or when the selected
    /// backend is missing its credentials
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        let provider = match config.provider {
            LlmProviderType::Anthropic => {
                let api_key = config
                    .anthropic_api_key
                    .clone()
                    .ok_or_else(|| AppError::config("ANTHROPIC_API_KEY is not set"))?;
                Self::Anthropic(AnthropicProvider::new(
                    AnthropicConfig::new(api_key)
                        .with_model(&config.model)
                        .with_max_tokens(config.max_tokens),
                )?)
            }
            LlmProviderType::OpenAiCompatible => {
                Self::OpenAiCompatible(OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
                    base_url: config.local_base_url.clone(),
                    api_key: config.local_api_key.clone(),
                    default_model: config.local_model.clone(),
                    ..OpenAiCompatibleConfig::default()
                })?)
            }
            LlmProviderType::None => {
                return Err(AppError::config("LLM provider disabled (LLM_PROVIDER=none)"));
            }
        };

        info!(
            provider = provider.name(),
            model = provider.default_model(),
            "LLM provider initialized"
        );
        Ok(provider)
    }

    fn inner(&self) -> &dyn LlmProvider {
        match self {
            Self::Anthropic(p) => p,
            Self::OpenAiCompatible(p) => p,
        }
    }
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatProvider")
            .field("provider", &self.name())
            .field("model", &self.default_model())
            .finish()
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.inner().complete(request).await
    }
}
