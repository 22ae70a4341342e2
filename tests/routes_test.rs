// ABOUTME: HTTP integration tests for the assembled router
// ABOUTME: Health, recommendations with guest quota, record lookup, images and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use fridge_recipes::config::{
    DatabaseConfig, GenerationConfig, GuestQuotaConfig, HttpConfig, ImageConfig, LlmConfig,
    PipelineConfig, PurchaseLinkConfig, ServerConfig,
};
use fridge_recipes::database::{
    Database, GuestUsageManager, RecordStore, SearchHistoryManager, SqliteRecordStore,
};
use fridge_recipes::generation::{GeneratorChain, OfflineRecipeGenerator};
use fridge_recipes::images::ImageSearchService;
use fridge_recipes::models::Recommendation;
use fridge_recipes::server::{router, AppResources};
use fridge_recipes::services::RecommendationPipeline;
use serde_json::{json, Value};

use common::{create_test_database, sample_drafts, FixedGenerator, StaticImageProvider};
use helpers::axum_test::AxumTestRequest;

fn test_config(daily_limit: u32) -> ServerConfig {
    ServerConfig {
        http: HttpConfig {
            port: 0,
            cors_origins: vec!["*".to_owned()],
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
        },
        llm: LlmConfig::default(),
        generation: GenerationConfig {
            chain: Vec::new(),
            youtube_api_key: None,
        },
        images: ImageConfig::default(),
        pipeline: PipelineConfig::default(),
        guest_quota: GuestQuotaConfig { daily_limit },
        purchase_links: PurchaseLinkConfig::default(),
    }
}

struct TestServer {
    resources: Arc<AppResources>,
    // Keeps the in-memory database alive for the test
    database: Database,
}

impl TestServer {
    async fn new(daily_limit: u32, images: StaticImageProvider) -> Result<Self> {
        let database = create_test_database().await?;
        let pool = database.pool().clone();

        let images = Arc::new(ImageSearchService::new(Arc::new(images)));
        let records: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::new(pool.clone()));
        let pipeline = RecommendationPipeline::new(
            GeneratorChain::new(OfflineRecipeGenerator)
                .with_provider(Arc::new(FixedGenerator::new("fixed", sample_drafts()))),
            Arc::clone(&images),
            Arc::clone(&records),
        );

        let resources = Arc::new(AppResources {
            config: Arc::new(test_config(daily_limit)),
            pipeline: Arc::new(pipeline),
            images,
            records,
            guest_usage: GuestUsageManager::new(pool.clone(), daily_limit),
            search_history: SearchHistoryManager::new(pool),
        });

        Ok(Self {
            resources,
            database,
        })
    }

    fn app(&self) -> Router {
        router(&self.resources)
    }
}

fn recommend_body() -> Value {
    json!({
        "ingredients": ["김치", "밥", "계란"],
        "constraints": { "time_limit_min": 15, "servings": 1 }
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let response = AxumTestRequest::get("/health").send(server.app()).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fridge-recipes-server");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_cors_allows_any_origin() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let response = AxumTestRequest::get("/health")
        .header("origin", "https://fridge.example")
        .send(server.app())
        .await;

    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
    Ok(())
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_recommendation() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::found("https://img.test")).await?;

    let created = AxumTestRequest::post("/api/v1/recommendations")
        .header("x-forwarded-for", "203.0.113.5")
        .json(&recommend_body())
        .send(server.app())
        .await;

    assert_eq!(created.status(), 200);
    assert_eq!(created.header("x-daily-remaining").as_deref(), Some("2"));
    let recommendation: Recommendation = created.json();
    assert_eq!(recommendation.recipes.len(), 3);
    assert!(recommendation.recipes.iter().all(|r| r.image_url.is_some()));

    let fetched = AxumTestRequest::get(&format!("/api/v1/recommendations/{}", recommendation.id))
        .send(server.app())
        .await;

    assert_eq!(fetched.status(), 200);
    let stored: Recommendation = fetched.json();
    assert_eq!(stored, recommendation);
    Ok(())
}

#[tokio::test]
async fn test_unknown_recommendation_is_not_found() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let response = AxumTestRequest::get("/api/v1/recommendations/rec_0000000000")
        .send(server.app())
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert!(body["error"]["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_empty_ingredients_are_rejected() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let response = AxumTestRequest::post("/api/v1/recommendations")
        .json(&json!({ "ingredients": ["  "] }))
        .send(server.app())
        .await;

    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn test_validation_failure_reports_rule() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let response = AxumTestRequest::post("/api/v1/recommendations")
        .header("x-forwarded-for", "203.0.113.6")
        .json(&json!({
            "ingredients": ["김치"],
            "constraints": { "exclude": ["참기름"] }
        }))
        .send(server.app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "exclude_ingredient_detected: 참기름");
    assert_eq!(body["error"]["details"]["rule"], "exclude_ingredient_detected");
    assert!(response.header("x-daily-remaining").is_none());

    let quota = server.resources.guest_usage.status("203.0.113.6").await?;
    assert_eq!(quota.used, 0);
    Ok(())
}

#[tokio::test]
async fn test_guest_quota_is_enforced_per_client() -> Result<()> {
    let server = TestServer::new(2, StaticImageProvider::empty()).await?;
    let send = |forwarded: &'static str| {
        AxumTestRequest::post("/api/v1/recommendations")
            .header("x-forwarded-for", forwarded)
            .json(&recommend_body())
            .send(server.app())
    };

    let first = send("203.0.113.9, 10.0.0.1").await;
    assert_eq!(first.status(), 200);
    assert_eq!(first.header("x-daily-remaining").as_deref(), Some("1"));

    let second = send("203.0.113.9").await;
    assert_eq!(second.status(), 200);
    assert_eq!(second.header("x-daily-remaining").as_deref(), Some("0"));

    let third = send("203.0.113.9").await;
    assert_eq!(third.status(), 429);
    assert_eq!(third.header("x-daily-remaining").as_deref(), Some("0"));
    let body: Value = third.json();
    assert_eq!(body["remaining"], 0);
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");

    let other = send("198.51.100.4").await;
    assert_eq!(other.status(), 200);
    Ok(())
}

#[tokio::test]
async fn test_peer_address_used_without_forwarding_header() -> Result<()> {
    let server = TestServer::new(1, StaticImageProvider::empty()).await?;
    let peer: SocketAddr = "192.0.2.10:40000".parse()?;

    let response = AxumTestRequest::post("/api/v1/recommendations")
        .peer(peer)
        .json(&recommend_body())
        .send(server.app())
        .await;

    assert_eq!(response.status(), 200);
    assert!(server.resources.guest_usage.status("192.0.2.10").await?.is_exhausted());
    Ok(())
}

#[tokio::test]
async fn test_identified_user_is_not_metered_and_gets_history() -> Result<()> {
    let server = TestServer::new(1, StaticImageProvider::empty()).await?;

    for _ in 0..3 {
        let response = AxumTestRequest::post("/api/v1/recommendations")
            .header("x-user-id", "user-42")
            .header("x-forwarded-for", "203.0.113.20")
            .json(&recommend_body())
            .send(server.app())
            .await;
        assert_eq!(response.status(), 200);
        assert!(response.header("x-daily-remaining").is_none());
    }

    let history = server.resources.search_history.list_recent("user-42", 10).await?;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].ingredients, vec!["김치", "밥", "계란"]);
    assert_eq!(server.resources.guest_usage.status("203.0.113.20").await?.used, 0);
    Ok(())
}

// ============================================================================
// Images
// ============================================================================

#[tokio::test]
async fn test_single_image_lookup() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::found("https://img.test")).await?;
    let uri = format!("/api/v1/images/generate?title={}", urlencoding::encode("김치전"));

    let response = AxumTestRequest::get(&uri).send(server.app()).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["recipe_title"], "김치전");
    assert_eq!(body["image_url"], "https://img.test/김치전");
    Ok(())
}

#[tokio::test]
async fn test_single_image_lookup_requires_title() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let blank = AxumTestRequest::get("/api/v1/images/generate?title=%20")
        .send(server.app())
        .await;
    assert_eq!(blank.status(), 400);

    let missing = AxumTestRequest::get("/api/v1/images/generate")
        .send(server.app())
        .await;
    assert_eq!(missing.status(), 400);
    Ok(())
}

#[tokio::test]
async fn test_batch_image_lookup_bounds() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;

    let empty = AxumTestRequest::post("/api/v1/images/batch")
        .json(&json!({ "titles": [] }))
        .send(server.app())
        .await;
    assert_eq!(empty.status(), 400);

    let titles: Vec<String> = (0..11).map(|i| format!("요리 {i}")).collect();
    let too_many = AxumTestRequest::post("/api/v1/images/batch")
        .json(&json!({ "titles": titles }))
        .send(server.app())
        .await;
    assert_eq!(too_many.status(), 400);
    Ok(())
}

#[tokio::test]
async fn test_batch_image_lookup_patches_stored_record() -> Result<()> {
    let server = TestServer::new(3, StaticImageProvider::empty()).await?;
    let created: Recommendation = AxumTestRequest::post("/api/v1/recommendations")
        .json(&recommend_body())
        .send(server.app())
        .await
        .json();
    assert!(created.recipes.iter().all(|r| r.image_url.is_none()));

    // Images become available after the recommendation was served
    let patched_server = TestServer {
        resources: Arc::new(AppResources {
            config: Arc::clone(&server.resources.config),
            pipeline: Arc::clone(&server.resources.pipeline),
            images: Arc::new(ImageSearchService::new(Arc::new(StaticImageProvider::found(
                "https://img.test",
            )))),
            records: Arc::clone(&server.resources.records),
            guest_usage: server.resources.guest_usage.clone(),
            search_history: server.resources.search_history.clone(),
        }),
        database: server.database.clone(),
    };

    let response = AxumTestRequest::post("/api/v1/images/batch")
        .json(&json!({
            "titles": ["계란말이", "없는 요리"],
            "recommendation_id": created.id,
        }))
        .send(patched_server.app())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["images"][0]["title"], "계란말이");
    assert_eq!(body["images"][0]["image_url"], "https://img.test/계란말이");
    assert_eq!(body["images"][1]["title"], "없는 요리");

    let stored = server.resources.records.get(&created.id).await?.unwrap();
    assert_eq!(
        stored.recipes[1].image_url.as_deref(),
        Some("https://img.test/계란말이")
    );
    assert!(stored.recipes[0].image_url.is_none());
    Ok(())
}

// ============================================================================
// Stats
// ============================================================================

#[tokio::test]
async fn test_stats_count_three_recipes_per_record() -> Result<()> {
    let server = TestServer::new(5, StaticImageProvider::empty()).await?;

    let before: Value = AxumTestRequest::get("/api/v1/stats")
        .send(server.app())
        .await
        .json();
    assert_eq!(before["total_recipes_generated"], 0);

    for _ in 0..2 {
        AxumTestRequest::post("/api/v1/recommendations")
            .json(&recommend_body())
            .send(server.app())
            .await;
    }

    let after: Value = AxumTestRequest::get("/api/v1/stats")
        .send(server.app())
        .await
        .json();
    assert_eq!(after["total_recipes_generated"], 6);
    Ok(())
}
