// ABOUTME: Configuration management for the recommendation server
// ABOUTME: Environment-driven settings plus the backend selector enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: `ServerConfig::from_env` and its nested sections
//! - **Types**: LLM, image and generation backend selectors

/// Environment and server configuration
pub mod environment;
/// Backend selector enums
pub mod types;

pub use environment::{
    DatabaseConfig, GenerationConfig, GuestQuotaConfig, HttpConfig, ImageConfig, LlmConfig,
    PipelineConfig, PurchaseLinkConfig, ServerConfig, DEFAULT_DATABASE_URL,
};
pub use types::{GeneratorKind, ImageProviderType, LlmProviderType};
