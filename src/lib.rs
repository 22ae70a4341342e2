// ABOUTME: Main library entry point for the fridge recipe recommendation service
// ABOUTME: Exposes the recommendation pipeline, its provider chains, stores and HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fridge Recipes
//!
//! Recommends three recipes from the ingredients a caller already has, plus a
//! shopping list for whatever is missing.
//!
//! ## Architecture
//!
//! - **Ingredients**: exclusion expansion and free-text ingredient normalization
//! - **Cache**: content-addressed recipe cache keyed by request fingerprint
//! - **Generation**: ordered chain of recipe backends ending in an offline generator
//! - **Images**: per-title image providers under a shared deadline
//! - **Reconcile / Validation**: have/need split, shopping list, business rules
//! - **Services**: the pipeline orchestrating all of the above
//! - **Routes / Server**: thin axum layer with a guest quota gate
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fridge_recipes::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Fridge recipes configured with port: {}", config.http.port);
//!     Ok(())
//! }
//! ```

/// Content-addressed recipe cache
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Pool, migrations, records, search history and guest usage
pub mod database;

/// Unified error types
pub mod errors;

/// Recipe generation backends and the provider chain
pub mod generation;

/// Image providers, title cache and budgeted fan-out
pub mod images;

/// Exclusion expansion and ingredient normalization
pub mod ingredients;

/// Chat-completion providers used by the generation backends
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Request, recipe and recommendation models
pub mod models;

/// Have/need split, shopping list and purchase links
pub mod reconcile;

/// HTTP route handlers
pub mod routes;

/// Server resources, router and serve loop
pub mod server;

/// Recommendation pipeline
pub mod services;

/// Business-rule validation of composed recommendations
pub mod validation;
