// ABOUTME: Recommendation routes: create through the pipeline and fetch stored records
// ABOUTME: Anonymous callers are gated by a daily per-address quota
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommendation routes
//!
//! Callers identified by the upstream auth gateway carry an `X-User-Id`
//! header; they are not metered and get a search history entry per request.
//! Anonymous callers are metered by client address and see their remaining
//! allowance in `X-Daily-Remaining`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::errors::{AppError, ErrorCode, ErrorResponseDetails};
use crate::models::{RecommendationRequest, SearchHistoryEntry};
use crate::server::AppResources;

/// Header set by the auth gateway for logged-in callers
pub const USER_ID_HEADER: &str = "x-user-id";

/// Remaining daily allowance for anonymous callers
pub const DAILY_REMAINING_HEADER: &str = "x-daily-remaining";

const QUOTA_EXHAUSTED_MESSAGE: &str =
    "일일 무료 이용 횟수를 초과했습니다. 로그인하면 무제한으로 이용할 수 있어요!";

/// Recommendation routes handler
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<AppResources>) -> Router {
        Router::new()
            .route("/api/v1/recommendations", post(Self::handle_create))
            .route("/api/v1/recommendations/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Identified caller, if the gateway supplied one
    fn user_id(headers: &HeaderMap) -> Option<String> {
        headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    /// First `X-Forwarded-For` hop, else the peer address
    fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_owned())
    }

    fn quota_exhausted() -> Response {
        let body = json!({
            "error": ErrorResponseDetails {
                code: ErrorCode::RateLimitExceeded,
                message: QUOTA_EXHAUSTED_MESSAGE.to_owned(),
                details: None,
            },
            "remaining": 0,
        });
        (
            StatusCode::TOO_MANY_REQUESTS,
            [(DAILY_REMAINING_HEADER, HeaderValue::from_static("0"))],
            Json(body),
        )
            .into_response()
    }

    /// Handle POST /api/v1/recommendations
    async fn handle_create(
        State(resources): State<Arc<AppResources>>,
        connect_info: Option<ConnectInfo<SocketAddr>>,
        headers: HeaderMap,
        Json(request): Json<RecommendationRequest>,
    ) -> Result<Response, AppError> {
        let user_id = Self::user_id(&headers);
        let client = Self::client_address(&headers, connect_info.map(|ConnectInfo(addr)| addr));

        if user_id.is_none() {
            let status = resources.guest_usage.status(&client).await?;
            if status.is_exhausted() {
                info!(client = %client, "Guest daily quota exhausted");
                return Ok(Self::quota_exhausted());
            }
        }

        let recommendation = resources.pipeline.recommend(request.clone()).await?;

        let mut response = Json(&recommendation).into_response();
        match &user_id {
            None => match resources.guest_usage.increment(&client).await {
                Ok(status) => {
                    response.headers_mut().insert(
                        DAILY_REMAINING_HEADER,
                        HeaderValue::from(status.remaining()),
                    );
                }
                Err(e) => warn!(client = %client, error = %e, "Failed to record guest usage"),
            },
            Some(user_id) => {
                let entry = SearchHistoryEntry::record(user_id, &request, &recommendation);
                if let Err(e) = resources.search_history.create(&entry).await {
                    warn!(user_id = %user_id, error = %e, "Failed to save search history");
                }
            }
        }

        Ok(response)
    }

    /// Handle GET /api/v1/recommendations/:id
    async fn handle_get(
        State(resources): State<Arc<AppResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recommendation = resources
            .records
            .get(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recommendation {id}")))?;

        Ok(Json(recommendation).into_response())
    }
}
