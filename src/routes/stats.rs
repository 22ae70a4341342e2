// ABOUTME: Public usage statistics route
// ABOUTME: Reports how many recipes the service has generated so far
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::constants::pipeline::RECIPES_PER_RECOMMENDATION;
use crate::errors::AppError;
use crate::server::AppResources;

/// Usage statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Recipes served across all stored recommendations
    pub total_recipes_generated: u64,
}

/// Stats routes handler
pub struct StatsRoutes;

impl StatsRoutes {
    /// Create the stats route
    pub fn routes(resources: Arc<AppResources>) -> Router {
        Router::new()
            .route("/api/v1/stats", get(Self::handle_stats))
            .with_state(resources)
    }

    async fn handle_stats(
        State(resources): State<Arc<AppResources>>,
    ) -> Result<Json<StatsResponse>, AppError> {
        let records = resources.records.count().await?;
        Ok(Json(StatsResponse {
            total_recipes_generated: records * RECIPES_PER_RECOMMENDATION as u64,
        }))
    }
}
