// ABOUTME: Backend selector enums parsed from environment strings
// ABOUTME: LLM provider, image provider and generation backend kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// LLM provider selection for recipe generation and structuring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderType {
    /// Anthropic Messages API (default)
    #[default]
    Anthropic,
    /// `OpenAI`-compatible endpoint (Ollama, vLLM, `LocalAI`)
    OpenAiCompatible,
    /// No language model; only the offline generator answers
    None,
}

impl LlmProviderType {
    /// Environment variable name for LLM provider selection
    pub const ENV_VAR: &'static str = "LLM_PROVIDER";

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "openai_compatible" | "openai" | "local" | "ollama" | "vllm" => Self::OpenAiCompatible,
            "none" | "off" | "disabled" => Self::None,
            _ => Self::Anthropic,
        }
    }
}

impl Display for LlmProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenAiCompatible => write!(f, "openai_compatible"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Image lookup backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderType {
    /// Google Custom Search image results (default)
    #[default]
    Google,
    /// Unsplash featured-photo URLs
    Unsplash,
    /// Static placeholder images
    Placeholder,
}

impl ImageProviderType {
    /// Parse from string; unknown names yield `None`
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "google" => Some(Self::Google),
            "unsplash" => Some(Self::Unsplash),
            "placeholder" => Some(Self::Placeholder),
            _ => None,
        }
    }
}

impl Display for ImageProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Google => write!(f, "google"),
            Self::Unsplash => write!(f, "unsplash"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// Fallible generation backends, in the order configured by `GENERATION_CHAIN`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Video search grounded generation
    VideoSearch,
    /// Direct LLM generation
    Llm,
}

impl GeneratorKind {
    /// Parse from string; unknown names yield `None`
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "video_search" | "youtube" => Some(Self::VideoSearch),
            "llm" => Some(Self::Llm),
            _ => None,
        }
    }

    /// Parse a comma separated chain, skipping unknown entries and duplicates
    #[must_use]
    pub fn parse_chain(s: &str) -> Vec<Self> {
        let mut chain = Vec::new();
        for kind in s.split(',').filter_map(Self::parse) {
            if !chain.contains(&kind) {
                chain.push(kind);
            }
        }
        chain
    }
}
