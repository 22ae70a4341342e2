// ABOUTME: Search-grounded recipe generator built on YouTube cooking videos
// ABOUTME: Searches, ranks by relevance and popularity, then asks an LLM to structure three recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Video Search Generator
//!
//! 1. Build up to three search queries from the leading ingredients
//! 2. Search the YouTube Data API and collect unique video ids
//! 3. Fetch titles, descriptions and view counts for up to 15 videos
//! 4. Drop videos whose title mentions an excluded ingredient, then rank
//! 5. Ask the structuring model to turn the top 8 into exactly 3 recipes

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::parse::parse_recipe_drafts;
use super::RecipeGenerator;
use crate::errors::{AppError, GenerationError};
use crate::ingredients::expand_all;
use crate::llm::prompts::{structuring_user_prompt, VIDEO_STRUCTURING_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{RecipeDraft, RecommendationRequest};

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

const RESULTS_PER_QUERY: u32 = 5;

/// Upper bound on ids sent to the videos endpoint
const MAX_DETAIL_IDS: usize = 15;

/// Minimum ranked videos needed before structuring
const MIN_RANKED_VIDEOS: usize = 3;

/// Videos handed to the structuring model
const MAX_STRUCTURED_VIDEOS: usize = 8;

/// Description characters kept per video in the prompt
const DESCRIPTION_PREVIEW_CHARS: usize = 500;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Title words that suggest the video is an actual recipe
const RECIPE_KEYWORDS: &[&str] = &[
    "레시피", "요리", "만들기", "만드는", "간단", "자취", "초간단", "백종원",
];

/// Metadata of one candidate video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// YouTube video id
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Video description
    pub description: String,
    /// View count
    pub view_count: u64,
    /// Channel name
    pub channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
}

/// The API returns counts as decimal strings
#[derive(Debug, Default, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
}

impl From<VideoItem> for VideoInfo {
    fn from(item: VideoItem) -> Self {
        Self {
            video_id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            view_count: item
                .statistics
                .view_count
                .and_then(|count| count.parse().ok())
                .unwrap_or(0),
            channel_title: item.snippet.channel_title,
        }
    }
}

/// Sampling settings for the structuring call
#[derive(Debug, Clone)]
pub struct StructuringSettings {
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Max output tokens
    pub max_tokens: u32,
}

impl Default for StructuringSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.3,
            max_tokens: 3000,
        }
    }
}

/// Generator grounded in popular cooking videos
pub struct VideoSearchGenerator {
    client: Client,
    api_key: String,
    api_base: String,
    llm: Arc<dyn LlmProvider>,
    settings: StructuringSettings,
}

impl VideoSearchGenerator {
    /// Backend name
    pub const NAME: &'static str = "video_search";

    /// Create a generator
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(
        api_key: impl Into<String>,
        llm: Arc<dyn LlmProvider>,
        settings: StructuringSettings,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: YOUTUBE_API_BASE.to_owned(),
            llm,
            settings,
        })
    }

    /// Point the generator at a different API base, e.g. a local stub
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn transport_error(message: impl Into<String>) -> GenerationError {
        GenerationError::Transport {
            provider: Self::NAME,
            message: message.into(),
        }
    }

    fn insufficient(message: impl Into<String>) -> GenerationError {
        GenerationError::InsufficientSources {
            provider: Self::NAME,
            message: message.into(),
        }
    }

    /// Unique video ids across all queries, in discovery order.
    ///
    /// A failed query is skipped, except HTTP 403 which means the quota is spent.
    async fn search(&self, queries: &[String]) -> Result<Vec<String>, GenerationError> {
        let mut seen = HashSet::new();
        let mut video_ids = Vec::new();
        let max_results = RESULTS_PER_QUERY.to_string();

        for query in queries {
            let response = self
                .client
                .get(format!("{}/search", self.api_base))
                .query(&[
                    ("part", "snippet"),
                    ("q", query.as_str()),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                    ("relevanceLanguage", "ko"),
                    ("regionCode", "KR"),
                    ("order", "relevance"),
                    ("key", self.api_key.as_str()),
                ])
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    warn!(query = %query, error = %e, "Video search request failed");
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::FORBIDDEN {
                return Err(GenerationError::RateLimited {
                    provider: Self::NAME,
                    message: "YouTube quota exhausted or API key rejected".to_owned(),
                });
            }
            if !status.is_success() {
                warn!(query = %query, %status, "Video search returned an error");
                continue;
            }

            let body: SearchResponse = match response.json().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(query = %query, error = %e, "Video search response unreadable");
                    continue;
                }
            };

            for id in body.items.into_iter().filter_map(|item| item.id.video_id) {
                if seen.insert(id.clone()) {
                    video_ids.push(id);
                }
            }
        }

        info!(count = video_ids.len(), "Video search complete");
        Ok(video_ids)
    }

    async fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoInfo>, GenerationError> {
        let ids = video_ids
            .iter()
            .take(MAX_DETAIL_IDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(format!("{}/videos", self.api_base))
            .query(&[
                ("part", "snippet,statistics"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Self::transport_error(format!("video details request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(GenerationError::RateLimited {
                provider: Self::NAME,
                message: "YouTube quota exhausted or API key rejected".to_owned(),
            });
        }
        if !status.is_success() {
            return Err(Self::transport_error(format!(
                "video details returned {status}"
            )));
        }

        let body: VideosResponse = response.json().await.map_err(|e| GenerationError::Malformed {
            provider: Self::NAME,
            message: format!("video details unreadable: {e}"),
        })?;

        Ok(body.items.into_iter().map(VideoInfo::from).collect())
    }

    async fn structure(
        &self,
        request: &RecommendationRequest,
        exclusions: &BTreeSet<String>,
        videos: &[VideoInfo],
    ) -> Result<Vec<RecipeDraft>, GenerationError> {
        let user_prompt = structuring_user_prompt(request, exclusions, &render_video_digest(videos));
        let mut chat = ChatRequest::new(vec![
            ChatMessage::system(VIDEO_STRUCTURING_PROMPT),
            ChatMessage::user(user_prompt),
        ])
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_tokens);
        if let Some(model) = &self.settings.model {
            chat = chat.with_model(model);
        }

        let response = self
            .llm
            .complete(&chat)
            .await
            .map_err(|e| GenerationError::from_app_error(Self::NAME, &e))?;
        debug!(model = %response.model, "Structuring response received");

        parse_recipe_drafts(Self::NAME, &response.content, request)
    }
}

#[async_trait]
impl RecipeGenerator for VideoSearchGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[instrument(skip_all)]
    async fn attempt(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecipeDraft>, GenerationError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerationError::Unavailable {
                provider: Self::NAME,
                reason: "YOUTUBE_API_KEY is not set".to_owned(),
            });
        }

        let queries = build_search_queries(&request.ingredients, request.constraints.time_limit_min);
        info!(?queries, "Searching cooking videos");

        let video_ids = self.search(&queries).await?;
        if video_ids.is_empty() {
            return Err(Self::insufficient("search returned no videos"));
        }

        let videos = self.video_details(&video_ids).await?;
        if videos.is_empty() {
            return Err(Self::insufficient("no video details available"));
        }

        let exclusions = expand_all(&request.constraints.exclude);
        let ranked = rank_videos(videos, &request.ingredients, &exclusions);
        if ranked.len() < MIN_RANKED_VIDEOS {
            return Err(Self::insufficient(format!(
                "{} relevant videos, need at least {MIN_RANKED_VIDEOS}",
                ranked.len()
            )));
        }

        let top = &ranked[..ranked.len().min(MAX_STRUCTURED_VIDEOS)];
        self.structure(request, &exclusions, top).await
    }
}

/// Search queries from the leading ingredients
#[must_use]
pub fn build_search_queries(ingredients: &[String], time_limit_min: u32) -> Vec<String> {
    let mut queries = Vec::with_capacity(3);
    let Some(first) = ingredients.first() else {
        return queries;
    };

    let leading = ingredients
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    queries.push(format!("{leading} 레시피 간단"));

    if let Some(second) = ingredients.get(1) {
        queries.push(format!("{first} {second} 요리 {time_limit_min}분"));
    }
    queries.push(format!("{first} 요리 레시피 자취"));
    queries
}

/// Relevance score: recipe keywords, ingredient mentions and log-scaled views
#[must_use]
pub fn score_video(video: &VideoInfo, ingredients: &[String]) -> f64 {
    let title = video.title.to_lowercase();
    let keyword_hits = RECIPE_KEYWORDS
        .iter()
        .filter(|keyword| title.contains(*keyword))
        .count();
    let ingredient_hits = ingredients
        .iter()
        .map(|ingredient| ingredient.trim().to_lowercase())
        .filter(|ingredient| !ingredient.is_empty() && title.contains(ingredient.as_str()))
        .count();

    (keyword_hits * 3 + ingredient_hits * 5) as f64 + (video.view_count as f64 + 1.0).log10()
}

/// Drop excluded and duplicate videos, then sort by descending score
#[must_use]
pub fn rank_videos(
    videos: Vec<VideoInfo>,
    ingredients: &[String],
    exclusions: &BTreeSet<String>,
) -> Vec<VideoInfo> {
    let mut seen = HashSet::new();
    let mut scored: Vec<(f64, VideoInfo)> = videos
        .into_iter()
        .filter(|video| {
            let title = video.title.to_lowercase();
            let excluded = exclusions.iter().any(|term| title.contains(term.as_str()));
            if excluded {
                debug!(title = %video.title, "Skipping video mentioning an excluded ingredient");
            }
            !excluded
        })
        .filter(|video| seen.insert(video.video_id.clone()))
        .map(|video| (score_video(&video, ingredients), video))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, video)| video).collect()
}

/// Prompt digest of the selected videos
#[must_use]
pub fn render_video_digest(videos: &[VideoInfo]) -> String {
    let mut digest = String::new();
    for (index, video) in videos.iter().enumerate() {
        if index > 0 {
            digest.push_str("\n\n---\n\n");
        }
        let description = if video.description.trim().is_empty() {
            "(설명 없음)".to_owned()
        } else {
            video
                .description
                .chars()
                .take(DESCRIPTION_PREVIEW_CHARS)
                .collect()
        };
        let _ = write!(
            digest,
            "[영상 {}] 제목: {}\n채널: {}\n조회수: {}회\n설명:\n{description}",
            index + 1,
            video.title,
            video.channel_title,
            video.view_count,
        );
    }
    digest
}
