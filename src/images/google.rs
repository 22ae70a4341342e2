// ABOUTME: Google Custom Search image provider for recipe titles
// ABOUTME: Queries with English-enhanced titles and retries with the English phrase alone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::translations::{english_query, enhanced_query};
use super::ImageProvider;
use crate::errors::{AppError, AppResult, ErrorCode};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

const SERVICE_NAME: &str = "Google Custom Search";

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    link: Option<String>,
}

/// Image search through a Google programmable search engine
pub struct GoogleImageProvider {
    client: Client,
    credentials: Option<(String, String)>,
    base_url: String,
}

impl GoogleImageProvider {
    /// Create a provider; without both credentials every lookup yields `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(
        api_key: Option<String>,
        search_engine_id: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let credentials = api_key.zip(search_engine_id);
        if credentials.is_none() {
            warn!("Google image search credentials missing; lookups will fall back");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            base_url: CUSTOM_SEARCH_URL.to_owned(),
        })
    }

    /// Point the provider at a different endpoint, e.g. a local stub
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn search(&self, query: &str) -> AppResult<Option<String>> {
        let Some((api_key, engine_id)) = &self.credentials else {
            return Ok(None);
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key.as_str()),
                ("cx", engine_id.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("imgSize", "large"),
                ("imgType", "photo"),
                ("num", "1"),
                ("safe", "active"),
                ("fileType", "jpg,png"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::external_service(SERVICE_NAME, format!("timed out: {query}"))
                } else {
                    AppError::external_service(SERVICE_NAME, e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("{SERVICE_NAME} quota exceeded"),
            ));
        }
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {status}"),
            ));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            AppError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse {SERVICE_NAME} response: {e}"),
            )
        })?;

        let link = body.items.into_iter().find_map(|item| item.link);
        match &link {
            Some(url) => info!(query, url = %url, "Image found"),
            None => debug!(query, "No image results"),
        }
        Ok(link)
    }
}

#[async_trait]
impl ImageProvider for GoogleImageProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    #[instrument(skip(self))]
    async fn fetch_image(&self, title: &str) -> AppResult<Option<String>> {
        let enhanced = enhanced_query(title);
        match self.search(&enhanced).await {
            Ok(Some(url)) => return Ok(Some(url)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Enhanced image query failed"),
        }

        let english = english_query(title);
        if english == enhanced {
            return Ok(None);
        }
        self.search(&english).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_yield_none() {
        let provider =
            GoogleImageProvider::new(Some("key".to_owned()), None, Duration::from_secs(1)).unwrap();
        assert_eq!(provider.fetch_image("김치찌개").await.unwrap(), None);
    }
}
