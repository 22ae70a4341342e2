// ABOUTME: Recipe image routes for single and batch title lookups
// ABOUTME: Batch lookups can patch missing images into a stored recommendation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Image routes
//!
//! Clients that render a recommendation before its images arrive can ask for
//! them afterwards. A batch lookup with a `recommendation_id` writes any newly
//! found URLs into the stored record; failures there are logged, never returned.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::constants::pipeline::MAX_BATCH_IMAGE_TITLES;
use crate::errors::{AppError, AppResult};
use crate::server::AppResources;

/// Query for a single lookup
#[derive(Debug, Deserialize)]
pub struct GenerateImageQuery {
    /// Recipe title
    pub title: String,
}

/// Single lookup result
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    /// Recipe title as requested
    pub recipe_title: String,
    /// Found image, if any
    pub image_url: Option<String>,
}

/// Batch lookup request
#[derive(Debug, Deserialize)]
pub struct BatchImageRequest {
    /// Titles to look up, 1 to 10
    pub titles: Vec<String>,
    /// Stored recommendation to patch with found images
    #[serde(default)]
    pub recommendation_id: Option<String>,
}

/// One batch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchImageItem {
    /// Recipe title
    pub title: String,
    /// Found image, if any
    pub image_url: Option<String>,
}

/// Batch lookup result, in request order
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchImageResponse {
    /// One item per requested title
    pub images: Vec<BatchImageItem>,
}

/// Image routes handler
pub struct ImageRoutes;

impl ImageRoutes {
    /// Create all image routes
    pub fn routes(resources: Arc<AppResources>) -> Router {
        Router::new()
            .route("/api/v1/images/generate", get(Self::handle_generate))
            .route("/api/v1/images/batch", post(Self::handle_batch))
            .with_state(resources)
    }

    /// Handle GET /api/v1/images/generate
    async fn handle_generate(
        State(resources): State<Arc<AppResources>>,
        Query(query): Query<GenerateImageQuery>,
    ) -> Result<Response, AppError> {
        let title = query.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        let image_url = resources.images.get_image(title).await;
        Ok(Json(GenerateImageResponse {
            recipe_title: query.title.clone(),
            image_url,
        })
        .into_response())
    }

    /// Handle POST /api/v1/images/batch
    async fn handle_batch(
        State(resources): State<Arc<AppResources>>,
        Json(request): Json<BatchImageRequest>,
    ) -> Result<Response, AppError> {
        if request.titles.is_empty() || request.titles.len() > MAX_BATCH_IMAGE_TITLES {
            return Err(AppError::invalid_input(format!(
                "titles must contain between 1 and {MAX_BATCH_IMAGE_TITLES} entries"
            )));
        }

        let deadline = Instant::now() + resources.pipeline.budget().total;
        let urls = resources.images.fetch_all(&request.titles, deadline).await;
        let images: Vec<BatchImageItem> = request
            .titles
            .iter()
            .cloned()
            .zip(urls)
            .map(|(title, image_url)| BatchImageItem { title, image_url })
            .collect();

        if let Some(id) = &request.recommendation_id {
            if let Err(e) = Self::patch_record(&resources, id, &images).await {
                warn!(id = %id, error = %e, "Failed to patch recommendation images");
            }
        }

        Ok(Json(BatchImageResponse { images }).into_response())
    }

    /// Fill in images for recipes of a stored record that have none
    async fn patch_record(
        resources: &AppResources,
        id: &str,
        images: &[BatchImageItem],
    ) -> AppResult<()> {
        let Some(mut recommendation) = resources.records.get(id).await? else {
            return Ok(());
        };

        let found: HashMap<&str, &str> = images
            .iter()
            .filter_map(|item| Some((item.title.as_str(), item.image_url.as_deref()?)))
            .collect();

        let mut updated = false;
        for recipe in recommendation
            .recipes
            .iter_mut()
            .filter(|recipe| recipe.image_url.is_none())
        {
            if let Some(url) = found.get(recipe.title.as_str()) {
                recipe.image_url = Some((*url).to_owned());
                updated = true;
            }
        }

        if updated {
            resources.records.save(&recommendation).await?;
            info!(id, "Recommendation images updated");
        }
        Ok(())
    }
}
