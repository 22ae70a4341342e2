// ABOUTME: Server resources, router assembly and the HTTP serve loop
// ABOUTME: Builds the pipeline, stores and provider chains once from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! [`AppResources`] owns every long-lived object: the pipeline, the image
//! service, the stores and the quota manager. Handlers receive it as axum
//! state; nothing is constructed lazily or held in globals.

#[cfg(not(unix))]
use std::future::pending;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use http::{header::HeaderName, HeaderValue, Method};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cache::{RecipeCacheStore, SqliteRecipeCache};
use crate::config::{GeneratorKind, ServerConfig};
use crate::database::{Database, GuestUsageManager, RecordStore, SearchHistoryManager, SqliteRecordStore};
use crate::errors::AppResult;
use crate::generation::llm::{LlmGenerationSettings, LlmRecipeGenerator};
use crate::generation::offline::OfflineRecipeGenerator;
use crate::generation::video_search::{StructuringSettings, VideoSearchGenerator};
use crate::generation::GeneratorChain;
use crate::images::{ImageSearchService, SqliteImageCache};
use crate::llm::{ChatProvider, LlmProvider};
use crate::reconcile::PurchaseLinkBuilder;
use crate::routes::{HealthRoutes, ImageRoutes, RecommendationRoutes, StatsRoutes};
use crate::services::{PipelineBudget, RecommendationPipeline};

/// Shared state handed to every route
pub struct AppResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Recommendation orchestrator
    pub pipeline: Arc<RecommendationPipeline>,
    /// Image lookups, shared with the pipeline
    pub images: Arc<ImageSearchService>,
    /// Durable recommendation records, shared with the pipeline
    pub records: Arc<dyn RecordStore>,
    /// Anonymous caller quota
    pub guest_usage: GuestUsageManager,
    /// Identified caller search history
    pub search_history: SearchHistoryManager,
}

impl AppResources {
    /// Build every component over an open database
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client for an image provider or generator
    /// cannot be created
    pub fn from_config(config: ServerConfig, database: &Database) -> AppResult<Self> {
        let pool = database.pool().clone();

        let images = Arc::new(ImageSearchService::from_config(
            &config.images,
            Arc::new(SqliteImageCache::new(pool.clone())),
        )?);
        let records: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::new(pool.clone()));

        let mut pipeline = RecommendationPipeline::new(
            build_generator_chain(&config)?,
            Arc::clone(&images),
            Arc::clone(&records),
        )
        .with_purchase_links(PurchaseLinkBuilder::from_config(&config.purchase_links))
        .with_budget(PipelineBudget::from_config(&config.pipeline));

        if config.pipeline.recipe_cache_enabled {
            let cache: Arc<dyn RecipeCacheStore> =
                Arc::new(SqliteRecipeCache::new(pool.clone(), config.recipe_cache()));
            pipeline = pipeline.with_cache(cache);
        }

        Ok(Self {
            guest_usage: GuestUsageManager::new(pool.clone(), config.guest_quota.daily_limit),
            search_history: SearchHistoryManager::new(pool),
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            images,
            records,
        })
    }
}

/// Assemble the configured generation backends in order, offline last.
///
/// LLM-backed backends are skipped with a warning when no chat provider is
/// configured.
///
/// # Errors
///
/// Returns an error if a backend's HTTP client cannot be created
pub fn build_generator_chain(config: &ServerConfig) -> AppResult<GeneratorChain> {
    let mut chain = GeneratorChain::new(OfflineRecipeGenerator);

    let llm: Option<Arc<dyn LlmProvider>> = match ChatProvider::from_config(&config.llm) {
        Ok(provider) => {
            info!(provider = provider.name(), "Chat provider configured");
            let provider: Arc<dyn LlmProvider> = Arc::new(provider);
            Some(provider)
        }
        Err(e) => {
            warn!(error = %e, "No chat provider; LLM-backed generators disabled");
            None
        }
    };

    for kind in &config.generation.chain {
        let Some(llm) = llm.clone() else {
            continue;
        };
        chain = match kind {
            GeneratorKind::VideoSearch => {
                let settings = StructuringSettings {
                    model: config.llm.structuring_model.clone(),
                    temperature: config.llm.structuring_temperature,
                    max_tokens: config.llm.structuring_max_tokens,
                };
                let api_key = config.generation.youtube_api_key.clone().unwrap_or_default();
                chain.with_provider(Arc::new(VideoSearchGenerator::new(api_key, llm, settings)?))
            }
            GeneratorKind::Llm => {
                let settings = LlmGenerationSettings {
                    temperature: config.llm.temperature,
                    max_tokens: config.llm.max_tokens,
                    max_attempts: config.llm.max_attempts,
                };
                chain.with_provider(Arc::new(LlmRecipeGenerator::new(llm, settings)))
            }
        };
    }

    info!(chain = ?chain.provider_names(), "Generator chain assembled");
    Ok(chain)
}

/// CORS layer for the configured origins; `*` or an empty list allows any
#[must_use]
pub fn setup_cors(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        if parsed.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(parsed)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-user-id"),
        ])
        .expose_headers([HeaderName::from_static("x-daily-remaining")])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

/// Every route, with CORS and request tracing
pub fn router(resources: &Arc<AppResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(RecommendationRoutes::routes(Arc::clone(resources)))
        .merge(ImageRoutes::routes(Arc::clone(resources)))
        .merge(StatsRoutes::routes(Arc::clone(resources)))
        .layer(setup_cors(&resources.config.http.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(resources: Arc<AppResources>, port: u16) -> Result<()> {
    let app = router(&resources);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "HTTP server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => warn!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
