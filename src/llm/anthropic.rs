// ABOUTME: Anthropic Messages API provider for recipe generation and video structuring
// ABOUTME: Translates chat requests into /v1/messages calls and maps API errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Anthropic Provider
//!
//! Implementation of the `LlmProvider` trait for Anthropic's Messages API.
//!
//! ## Configuration
//!
//! Set `ANTHROPIC_API_KEY`. `LLM_MODEL` overrides the default model.
//!
//! System messages are lifted out of the message list into the top-level
//! `system` field, which is how the Messages API expects them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::errors::{AppError, ErrorCode};

/// Default model to use
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Base URL for the Anthropic API
const API_BASE_URL: &str = "https://api.anthropic.com/v1";

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Max tokens when neither the request nor the config sets one
const DEFAULT_MAX_TOKENS: u32 = 4000;

const CONNECT_TIMEOUT_SECS: u64 = 10;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Service label used in error messages
const SERVICE_NAME: &str = "Anthropic";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

impl AnthropicMessage {
    /// System messages travel in the top-level `system` field instead
    fn from_chat(message: &ChatMessage) -> Option<Self> {
        match message.role {
            MessageRole::System => None,
            MessageRole::User | MessageRole::Assistant => Some(Self {
                role: message.role.as_str(),
                content: message.content.clone(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Settings for the Anthropic provider
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,
    /// Model used when the request names none
    pub default_model: String,
    /// Max tokens used when the request sets none
    pub max_tokens: u32,
    /// API base URL, overridable for tests
    pub base_url: String,
}

impl AnthropicConfig {
    /// Config for the public API with the default model
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Override the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Override the default max tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicProvider {
    /// Create a provider from its config
    ///
    /// # Errors
    ///
    /// Returns a config error when the API key is empty or the HTTP client
    /// cannot be built
    pub fn new(config: AnthropicConfig) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::config("ANTHROPIC_API_KEY is empty"));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    fn build_body(&self, request: &ChatRequest) -> MessagesRequest {
        MessagesRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.default_model.clone()),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: request.temperature,
            system: request.system_prompt(),
            messages: request
                .messages
                .iter()
                .filter_map(AnthropicMessage::from_chat)
                .collect(),
        }
    }

    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<AnthropicErrorResponse>(body)
            .map(|response| format!("{} - {}", response.error.error_type, response.error.message))
            .unwrap_or_else(|_| body.chars().take(200).collect());

        match status.as_u16() {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE_NAME} authentication failed: {detail}"),
            ),
            429 | 529 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("{SERVICE_NAME} rate limited ({status}): {detail}"),
            ),
            400 => AppError::invalid_input(format!("{SERVICE_NAME} rejected request: {detail}")),
            _ => AppError::external_service(SERVICE_NAME, format!("API error ({status}): {detail}")),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn display_name(&self) -> &str {
        "Anthropic Claude"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let body = self.build_body(request);
        debug!(messages = body.messages.len(), "Sending Anthropic messages request");

        let response = self
            .client
            .post(self.api_url("messages"))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Anthropic API: {}", e);
                AppError::external_service(SERVICE_NAME, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, "Anthropic API returned an error");
            return Err(Self::parse_error_response(status, &text));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Anthropic response: {}", e);
            AppError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse Anthropic response: {e}"),
            )
        })?;

        let content: String = parsed
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if content.trim().is_empty() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                "Response contained no text content",
            ));
        }

        Ok(ChatResponse {
            content,
            model: parsed.model,
            usage: parsed.usage.map(|usage| TokenUsage {
                prompt_tokens: usage.input_tokens,
                completion_tokens: usage.output_tokens,
                total_tokens: usage.input_tokens + usage.output_tokens,
            }),
            finish_reason: parsed.stop_reason,
        })
    }
}
