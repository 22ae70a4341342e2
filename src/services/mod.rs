// ABOUTME: Domain service layer for business logic kept out of route handlers
// ABOUTME: Hosts the recommendation pipeline shared by the HTTP routes and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Protocol-agnostic business logic. Route handlers only extract inputs,
//! apply boundary checks and delegate here.

/// Recommendation orchestration: cache, generation, images, reconciliation, validation
pub mod pipeline;

pub use pipeline::{PipelineBudget, RecommendationPipeline};
