// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides test logging, request and draft fixtures, and stub providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::unwrap_used
)]
//! Shared test utilities for `fridge_recipes`

use std::collections::VecDeque;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use fridge_recipes::database::Database;
use fridge_recipes::errors::{AppError, AppResult, GenerationError};
use fridge_recipes::generation::RecipeGenerator;
use fridge_recipes::images::ImageProvider;
use fridge_recipes::llm::{ChatRequest, ChatResponse, LlmProvider};
use fridge_recipes::models::{
    Constraints, Recipe, RecipeDraft, Recommendation, RecommendationRequest, ShoppingItem,
};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// In-memory database with every table created
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Request with default constraints
pub fn request(ingredients: &[&str]) -> RecommendationRequest {
    RecommendationRequest::new(ingredients.iter().copied())
}

/// Request avoiding the given ingredients
pub fn request_excluding(ingredients: &[&str], exclude: &[&str]) -> RecommendationRequest {
    RecommendationRequest::new(ingredients.iter().copied())
        .with_constraints(Constraints::default().with_exclude(exclude.iter().copied()))
}

/// Draft with four generic steps
pub fn draft(title: &str, time_min: u32, ingredients: &[&str]) -> RecipeDraft {
    RecipeDraft {
        title: title.to_owned(),
        time_min,
        servings: 1,
        summary: format!("{title} 한 그릇"),
        ingredients_total: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        steps: vec![
            "재료를 손질한다".to_owned(),
            "팬을 달군다".to_owned(),
            "재료를 넣고 익힌다".to_owned(),
            "그릇에 담는다".to_owned(),
        ],
        tips: Vec::new(),
        warnings: Vec::new(),
    }
}

/// Three valid drafts for a 15 minute limit
pub fn sample_drafts() -> Vec<RecipeDraft> {
    vec![
        draft("김치볶음밥", 10, &["밥", "김치", "참기름"]),
        draft("계란말이", 12, &["계란", "대파", "소금"]),
        draft("김치전", 15, &["김치", "부침가루", "식용유"]),
    ]
}

/// Recommendation composed from the sample drafts, nothing owned
pub fn sample_recommendation() -> Recommendation {
    let recipes = sample_drafts()
        .into_iter()
        .map(|draft| {
            let need = draft.ingredients_total.clone();
            Recipe::from_draft(draft, Vec::new(), need, None)
        })
        .collect();
    let shopping_list = vec![ShoppingItem {
        item: "참기름".to_owned(),
        purchase_url: None,
    }];
    Recommendation::new(recipes, shopping_list)
}

/// Generator that always returns the same drafts
pub struct FixedGenerator {
    name: &'static str,
    recipes: Vec<RecipeDraft>,
    calls: AtomicUsize,
}

impl FixedGenerator {
    pub fn new(name: &'static str, recipes: Vec<RecipeDraft>) -> Self {
        Self {
            name,
            recipes,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeGenerator for FixedGenerator {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(
        &self,
        _request: &RecommendationRequest,
    ) -> Result<Vec<RecipeDraft>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.recipes.clone())
    }
}

/// Generator that always fails with a transport error
pub struct FailingGenerator {
    name: &'static str,
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeGenerator for FailingGenerator {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(
        &self,
        _request: &RecommendationRequest,
    ) -> Result<Vec<RecipeDraft>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Transport {
            provider: self.name,
            message: "connection refused".to_owned(),
        })
    }
}

/// Image provider answering every title with a fixed prefix, counting calls
pub struct StaticImageProvider {
    prefix: Option<String>,
    calls: AtomicUsize,
}

impl StaticImageProvider {
    pub fn found(prefix: &str) -> Self {
        Self {
            prefix: Some(prefix.to_owned()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            prefix: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for StaticImageProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_image(&self, title: &str) -> AppResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.prefix.as_ref().map(|prefix| format!("{prefix}/{title}")))
    }
}

/// Image provider that always errors
pub struct FailingImageProvider;

#[async_trait]
impl ImageProvider for FailingImageProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch_image(&self, _title: &str) -> AppResult<Option<String>> {
        Err(AppError::external_service("stub", "HTTP 500"))
    }
}

/// Image provider that never answers in test time
pub struct HangingImageProvider;

#[async_trait]
impl ImageProvider for HangingImageProvider {
    fn name(&self) -> &'static str {
        "hanging"
    }

    async fn fetch_image(&self, _title: &str) -> AppResult<Option<String>> {
        sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

/// Image provider that answers after a delay
pub struct SlowImageProvider {
    pub delay: Duration,
}

#[async_trait]
impl ImageProvider for SlowImageProvider {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn fetch_image(&self, title: &str) -> AppResult<Option<String>> {
        sleep(self.delay).await;
        Ok(Some(format!("https://slow.example/{title}")))
    }
}

/// Chat provider replaying scripted replies in order
pub struct ScriptedLlmProvider {
    replies: Mutex<VecDeque<AppResult<String>>>,
    calls: AtomicUsize,
}

impl ScriptedLlmProvider {
    pub fn new(replies: Vec<AppResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &str {
        "Scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("script exhausted")))?;
        Ok(ChatResponse {
            content: reply,
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }
}

/// JSON array of three recipes in the shape the LLM prompts ask for
pub fn llm_recipe_json() -> String {
    serde_json::to_string(&sample_drafts()).unwrap()
}
