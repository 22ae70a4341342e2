// ABOUTME: Route module organization for the recipe recommendation HTTP endpoints
// ABOUTME: Thin handlers that apply boundary checks and delegate to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the pipeline, image service and stores.

/// Health check route
pub mod health;
/// Recipe image lookup routes
pub mod images;
/// Recommendation creation and lookup routes
pub mod recommendations;
/// Public usage statistics route
pub mod stats;

pub use health::HealthRoutes;
pub use images::ImageRoutes;
pub use recommendations::RecommendationRoutes;
pub use stats::StatsRoutes;
