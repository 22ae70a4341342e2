// ABOUTME: Image enrichment chain with a title cache and deadline-bounded fan-out
// ABOUTME: Primary provider, one fallback, and concurrent lookups that never fail the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Image Enrichment
//!
//! [`ImageSearchService::get_image`] resolves one title: cache, then the
//! primary provider, then the fallback. Provider errors are logged and treated
//! as "no image". A result is cached, a miss included, only when at least one
//! provider answered; a lookup where every provider errored is retried later.
//!
//! [`ImageSearchService::fetch_all`] looks up several titles concurrently on a
//! `JoinSet` under a single deadline. Each task writes only its own slot, so
//! results line up with the input order. Tasks still running at the deadline
//! are aborted and their slots stay `None`.

/// Title-keyed URL cache
pub mod cache;
/// Google Custom Search provider
pub mod google;
/// Network-free URL template providers
pub mod templated;
/// Korean to English dish dictionary for search queries
pub mod translations;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

pub use cache::{ImageUrlCache, InMemoryImageCache, SqliteImageCache};
pub use google::GoogleImageProvider;
pub use templated::{PlaceholderImageProvider, UnsplashImageProvider};

use crate::config::{ImageConfig, ImageProviderType};
use crate::errors::AppResult;

/// A per-title image source
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Image URL for a recipe title, `None` when nothing suitable exists
    async fn fetch_image(&self, title: &str) -> AppResult<Option<String>>;
}

/// Build the provider for a configured kind
///
/// # Errors
///
/// Returns an error if the provider's HTTP client cannot be created
pub fn build_provider(
    kind: ImageProviderType,
    config: &ImageConfig,
) -> AppResult<Arc<dyn ImageProvider>> {
    Ok(match kind {
        ImageProviderType::Google => Arc::new(GoogleImageProvider::new(
            config.google_api_key.clone(),
            config.google_search_engine_id.clone(),
            config.search_timeout,
        )?),
        ImageProviderType::Unsplash => Arc::new(UnsplashImageProvider),
        ImageProviderType::Placeholder => Arc::new(PlaceholderImageProvider),
    })
}

/// Primary provider, optional fallback, optional title cache
pub struct ImageSearchService {
    primary: Arc<dyn ImageProvider>,
    fallback: Option<Arc<dyn ImageProvider>>,
    cache: Option<Arc<dyn ImageUrlCache>>,
}

impl ImageSearchService {
    /// Service over a primary provider with no fallback and no cache
    #[must_use]
    pub fn new(primary: Arc<dyn ImageProvider>) -> Self {
        Self {
            primary,
            fallback: None,
            cache: None,
        }
    }

    /// Add the provider tried when the primary finds nothing
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn ImageProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Add a title cache
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ImageUrlCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the configured chain; `cache` is used only when caching is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if a provider cannot be created
    pub fn from_config(config: &ImageConfig, cache: Arc<dyn ImageUrlCache>) -> AppResult<Self> {
        let mut service = Self::new(build_provider(config.provider, config)?);
        if let Some(fallback) = config.fallback_provider {
            service = service.with_fallback(build_provider(fallback, config)?);
        }
        if config.cache_enabled {
            service = service.with_cache(cache);
        }

        info!(
            provider = %config.provider,
            fallback = ?config.fallback_provider,
            cache = config.cache_enabled,
            "Image search service initialized"
        );
        Ok(service)
    }

    /// `None` when the provider errored, `Some(answer)` when it answered
    async fn try_provider(provider: &dyn ImageProvider, title: &str) -> Option<Option<String>> {
        match provider.fetch_image(title).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(provider = provider.name(), title, error = %e, "Image provider failed");
                None
            }
        }
    }

    /// Resolve one title. Never fails; a miss is `None`.
    pub async fn get_image(&self, title: &str) -> Option<String> {
        if let Some(cache) = &self.cache {
            match cache.lookup(title).await {
                Ok(Some(cached)) => {
                    debug!(title, hit = cached.is_some(), "Image cache hit");
                    return cached;
                }
                Ok(None) => {}
                Err(e) => warn!(title, error = %e, "Image cache lookup failed"),
            }
        }

        let primary = Self::try_provider(self.primary.as_ref(), title).await;
        let mut answered = primary.is_some();
        let mut url = primary.flatten();
        if url.is_none() {
            if let Some(fallback) = &self.fallback {
                debug!(title, fallback = fallback.name(), "Trying fallback image provider");
                let fallback = Self::try_provider(fallback.as_ref(), title).await;
                answered |= fallback.is_some();
                url = fallback.flatten();
            }
        }

        if url.is_none() {
            warn!(title, "No image found from any provider");
        }

        // A miss is only remembered when some provider actually answered
        if let Some(cache) = self.cache.as_ref().filter(|_| answered) {
            if let Err(e) = cache.store(title, url.as_deref()).await {
                warn!(title, error = %e, "Image cache store failed");
            }
        }
        url
    }

    /// Resolve every title concurrently, giving up on stragglers at `deadline`.
    ///
    /// The output has one slot per title, in input order.
    pub async fn fetch_all(self: &Arc<Self>, titles: &[String], deadline: Instant) -> Vec<Option<String>> {
        let mut slots: Vec<Option<String>> = vec![None; titles.len()];
        let mut tasks = JoinSet::new();

        for (index, title) in titles.iter().enumerate() {
            let service = Arc::clone(self);
            let title = title.clone();
            tasks.spawn(async move { (index, service.get_image(&title).await) });
        }

        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, url)))) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = url;
                    }
                }
                Ok(Some(Err(e))) => warn!(error = %e, "Image lookup task failed"),
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        pending = tasks.len(),
                        "Image deadline reached, abandoning pending lookups"
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        slots
    }
}
