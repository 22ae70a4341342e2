// ABOUTME: Failures of individual recipe generation backends
// ABOUTME: Absorbed by the provider chain, which falls through to the next backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Why a generation backend produced no usable recipes
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Backend is missing configuration (API key, model) and cannot run
    #[error("{provider} is unavailable: {reason}")]
    Unavailable {
        /// Backend name
        provider: &'static str,
        /// What is missing
        reason: String,
    },
    /// Network or HTTP failure talking to the backend
    #[error("{provider} request failed: {message}")]
    Transport {
        /// Backend name
        provider: &'static str,
        /// Failure description
        message: String,
    },
    /// Backend rejected the call for rate or quota reasons
    #[error("{provider} rate limited: {message}")]
    RateLimited {
        /// Backend name
        provider: &'static str,
        /// Failure description
        message: String,
    },
    /// Backend answered with something that is not a recipe list
    #[error("{provider} returned malformed output: {message}")]
    Malformed {
        /// Backend name
        provider: &'static str,
        /// Parse failure description
        message: String,
    },
    /// Backend answered with the wrong number of recipes
    #[error("{provider} returned {count} recipes, expected {expected}")]
    WrongCount {
        /// Backend name
        provider: &'static str,
        /// Recipes received
        count: usize,
        /// Recipes required
        expected: usize,
    },
    /// Search-grounded backend found too little source material
    #[error("{provider} found insufficient sources: {message}")]
    InsufficientSources {
        /// Backend name
        provider: &'static str,
        /// Failure description
        message: String,
    },
}

impl GenerationError {
    /// Wrap an `AppError` raised by an LLM or HTTP call made on behalf of a backend
    #[must_use]
    pub fn from_app_error(provider: &'static str, error: &AppError) -> Self {
        match error.code {
            ErrorCode::ExternalRateLimited | ErrorCode::RateLimitExceeded => Self::RateLimited {
                provider,
                message: error.message.clone(),
            },
            ErrorCode::ConfigError | ErrorCode::ExternalAuthFailed => Self::Unavailable {
                provider,
                reason: error.message.clone(),
            },
            ErrorCode::SerializationError => Self::Malformed {
                provider,
                message: error.message.clone(),
            },
            _ => Self::Transport {
                provider,
                message: error.message.clone(),
            },
        }
    }

    /// Name of the backend that failed
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Unavailable { provider, .. }
            | Self::Transport { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Malformed { provider, .. }
            | Self::WrongCount { provider, .. }
            | Self::InsufficientSources { provider, .. } => provider,
        }
    }
}
