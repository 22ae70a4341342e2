// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: HTTP, database, LLM, generation, image, pipeline, quota and purchase-link sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::error::Error;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::types::{GeneratorKind, ImageProviderType, LlmProviderType};
use crate::cache::RecipeCacheConfig;
use crate::constants::{cache, limits, pipeline, ports};

/// Default SQLite location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fridge_recipes.db";

/// Full server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listener settings
    pub http: HttpConfig,
    /// Database connection
    pub database: DatabaseConfig,
    /// Language model access
    pub llm: LlmConfig,
    /// Generation backend chain
    pub generation: GenerationConfig,
    /// Image lookup
    pub images: ImageConfig,
    /// Pipeline budget and recipe cache
    pub pipeline: PipelineConfig,
    /// Anonymous caller quota
    pub guest_quota: GuestQuotaConfig,
    /// Shopping list purchase links
    pub purchase_links: PurchaseLinkConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Listen port
    pub port: u16,
    /// Allowed CORS origins; `["*"]` allows any
    pub cors_origins: Vec<String>,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL
    pub url: String,
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Selected backend
    pub provider: LlmProviderType,
    /// Anthropic API key
    #[serde(skip_serializing)]
    pub anthropic_api_key: Option<String>,
    /// Model for direct generation
    pub model: String,
    /// Sampling temperature for direct generation
    pub temperature: f32,
    /// Max tokens for direct generation
    pub max_tokens: u32,
    /// Model for structuring video metadata; `None` uses the provider default
    pub structuring_model: Option<String>,
    /// Sampling temperature for structuring
    pub structuring_temperature: f32,
    /// Max tokens for structuring
    pub structuring_max_tokens: u32,
    /// OpenAI-compatible base URL
    pub local_base_url: String,
    /// OpenAI-compatible model
    pub local_model: String,
    /// OpenAI-compatible API key
    #[serde(skip_serializing)]
    pub local_api_key: Option<String>,
    /// Attempts per request for direct generation
    pub max_attempts: u32,
}

/// Generation chain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Fallible backends in order; the offline generator always follows
    pub chain: Vec<GeneratorKind>,
    /// YouTube Data API key
    #[serde(skip_serializing)]
    pub youtube_api_key: Option<String>,
}

/// Image lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Primary provider
    pub provider: ImageProviderType,
    /// Fallback provider, tried when the primary finds nothing
    pub fallback_provider: Option<ImageProviderType>,
    /// Google API key
    #[serde(skip_serializing)]
    pub google_api_key: Option<String>,
    /// Google programmable search engine id
    pub google_search_engine_id: Option<String>,
    /// Per-request timeout for image searches
    pub search_timeout: Duration,
    /// Whether title lookups are cached
    pub cache_enabled: bool,
}

/// Pipeline budget and recipe cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Overall request ceiling the image deadline is carved from
    pub budget: Duration,
    /// Minimum image deadline, even when the budget is spent
    pub image_deadline_floor: Duration,
    /// Recipe cache lifetime
    pub recipe_cache_expiry: Duration,
    /// Whether recommendations are cached
    pub recipe_cache_enabled: bool,
}

/// Anonymous caller quota
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuestQuotaConfig {
    /// Recommendations per client per day
    pub daily_limit: u32,
}

/// Affiliate settings for shopping list links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseLinkConfig {
    /// Coupang Partners tracking id; no id means no links
    pub tracking_id: Option<String>,
    /// Optional Coupang Partners sub id
    pub sub_id: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or boolean variable fails to parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http: HttpConfig {
                port: parse_env("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
                cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
            },
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            },
            llm: LlmConfig::from_env()?,
            generation: GenerationConfig {
                chain: GeneratorKind::parse_chain(&env_var_or(
                    "GENERATION_CHAIN",
                    "video_search,llm",
                )),
                youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            },
            images: ImageConfig::from_env()?,
            pipeline: PipelineConfig {
                budget: Duration::from_secs(parse_env(
                    "PIPELINE_BUDGET_SECS",
                    pipeline::DEFAULT_PIPELINE_BUDGET_SECS,
                )?),
                image_deadline_floor: Duration::from_secs(parse_env(
                    "IMAGE_DEADLINE_FLOOR_SECS",
                    pipeline::DEFAULT_IMAGE_DEADLINE_FLOOR_SECS,
                )?),
                recipe_cache_expiry: Duration::from_secs(
                    parse_env::<u64>("RECIPE_CACHE_EXPIRY_DAYS", cache::RECIPE_CACHE_EXPIRY_DAYS)?
                        * 24
                        * 60
                        * 60,
                ),
                recipe_cache_enabled: parse_env("RECIPE_CACHE_ENABLED", true)?,
            },
            guest_quota: GuestQuotaConfig {
                daily_limit: parse_env("GUEST_DAILY_LIMIT", limits::DEFAULT_GUEST_DAILY_LIMIT)?,
            },
            purchase_links: PurchaseLinkConfig {
                tracking_id: optional_env("COUPANG_PARTNERS_TRACKING_ID"),
                sub_id: optional_env("COUPANG_PARTNERS_SUB_ID"),
            },
        };

        if config.generation.chain.is_empty() {
            warn!("GENERATION_CHAIN is empty; only the offline generator will answer");
        }
        Ok(config)
    }

    /// Recipe cache settings derived from the pipeline section
    #[must_use]
    pub fn recipe_cache(&self) -> RecipeCacheConfig {
        RecipeCacheConfig {
            expiry: self.pipeline.recipe_cache_expiry,
            ..RecipeCacheConfig::default()
        }
    }
}

impl LlmConfig {
    fn from_env() -> Result<Self> {
        let provider = env::var(LlmProviderType::ENV_VAR)
            .map(|s| LlmProviderType::from_str_or_default(&s))
            .unwrap_or_default();

        let default_structuring = match provider {
            LlmProviderType::Anthropic => Some("claude-haiku-4-5".to_owned()),
            LlmProviderType::OpenAiCompatible | LlmProviderType::None => None,
        };

        Ok(Self {
            provider,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            model: env_var_or("LLM_MODEL", "claude-sonnet-4-5"),
            temperature: parse_env("LLM_TEMPERATURE", 0.7)?,
            max_tokens: parse_env("LLM_MAX_TOKENS", 4000)?,
            structuring_model: optional_env("STRUCTURING_MODEL").or(default_structuring),
            structuring_temperature: parse_env("STRUCTURING_TEMPERATURE", 0.3)?,
            structuring_max_tokens: parse_env("STRUCTURING_MAX_TOKENS", 3000)?,
            local_base_url: env_var_or("LOCAL_LLM_BASE_URL", "http://localhost:11434/v1"),
            local_model: env_var_or("LOCAL_LLM_MODEL", "qwen2.5:14b-instruct"),
            local_api_key: optional_env("LOCAL_LLM_API_KEY"),
            max_attempts: parse_env("LLM_MAX_ATTEMPTS", pipeline::DEFAULT_LLM_MAX_ATTEMPTS)?
                .max(1),
        })
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::None,
            anthropic_api_key: None,
            model: "claude-sonnet-4-5".to_owned(),
            temperature: 0.7,
            max_tokens: 4000,
            structuring_model: None,
            structuring_temperature: 0.3,
            structuring_max_tokens: 3000,
            local_base_url: "http://localhost:11434/v1".to_owned(),
            local_model: "qwen2.5:14b-instruct".to_owned(),
            local_api_key: None,
            max_attempts: pipeline::DEFAULT_LLM_MAX_ATTEMPTS,
        }
    }
}

impl ImageConfig {
    fn from_env() -> Result<Self> {
        let provider_name = env_var_or("IMAGE_PROVIDER", "google");
        let provider = ImageProviderType::parse(&provider_name).unwrap_or_else(|| {
            warn!(provider = %provider_name, "Unknown IMAGE_PROVIDER, using google");
            ImageProviderType::Google
        });
        let fallback_provider =
            ImageProviderType::parse(&env_var_or("IMAGE_FALLBACK_PROVIDER", "unsplash"))
                .filter(|fallback| *fallback != provider);

        Ok(Self {
            provider,
            fallback_provider,
            google_api_key: optional_env("GOOGLE_API_KEY"),
            google_search_engine_id: optional_env("GOOGLE_SEARCH_ENGINE_ID"),
            search_timeout: Duration::from_secs(parse_env(
                "IMAGE_SEARCH_TIMEOUT_SECS",
                pipeline::DEFAULT_IMAGE_SEARCH_TIMEOUT_SECS,
            )?),
            cache_enabled: parse_env("IMAGE_CACHE_ENABLED", true)?,
        })
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: ImageProviderType::Placeholder,
            fallback_provider: None,
            google_api_key: None,
            google_search_engine_id: None,
            search_timeout: Duration::from_secs(pipeline::DEFAULT_IMAGE_SEARCH_TIMEOUT_SECS),
            cache_enabled: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            budget: Duration::from_secs(pipeline::DEFAULT_PIPELINE_BUDGET_SECS),
            image_deadline_floor: Duration::from_secs(pipeline::DEFAULT_IMAGE_DEADLINE_FLOOR_SECS),
            recipe_cache_expiry: Duration::from_secs(cache::RECIPE_CACHE_EXPIRY_SECS),
            recipe_cache_enabled: true,
        }
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Non-empty environment variable
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        _ => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
