// ABOUTME: Integration tests for image lookups with fallback, caching and deadlines
// ABOUTME: Parallel lookups keep title order and abandon stragglers at the deadline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use fridge_recipes::images::{
    ImageProvider, ImageSearchService, ImageUrlCache, InMemoryImageCache,
    PlaceholderImageProvider, SqliteImageCache,
};
use tokio::time::Instant;

use common::{
    create_test_database, init_test_logging, FailingImageProvider, HangingImageProvider,
    SlowImageProvider, StaticImageProvider,
};

fn titles(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[tokio::test]
async fn test_primary_result_is_returned() {
    init_test_logging();
    let primary = Arc::new(StaticImageProvider::found("https://img.test"));
    let service = ImageSearchService::new(primary.clone());

    let url = service.get_image("김치전").await;

    assert_eq!(url.as_deref(), Some("https://img.test/김치전"));
    assert_eq!(primary.calls(), 1);
}

#[tokio::test]
async fn test_fallback_used_when_primary_finds_nothing() {
    init_test_logging();
    let primary = Arc::new(StaticImageProvider::empty());
    let fallback = Arc::new(StaticImageProvider::found("https://fallback.test"));
    let service = ImageSearchService::new(primary.clone()).with_fallback(fallback.clone());

    let url = service.get_image("계란말이").await;

    assert_eq!(url.as_deref(), Some("https://fallback.test/계란말이"));
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn test_fallback_used_when_primary_errors() {
    init_test_logging();
    let fallback = Arc::new(StaticImageProvider::found("https://fallback.test"));
    let service = ImageSearchService::new(Arc::new(FailingImageProvider)).with_fallback(fallback);

    let url = service.get_image("두부조림").await;
    assert_eq!(url.as_deref(), Some("https://fallback.test/두부조림"));
}

#[tokio::test]
async fn test_total_failure_is_none() {
    init_test_logging();
    let service = ImageSearchService::new(Arc::new(FailingImageProvider))
        .with_fallback(Arc::new(StaticImageProvider::empty()));

    assert!(service.get_image("김치찌개").await.is_none());
}

#[tokio::test]
async fn test_found_and_missing_results_are_cached() {
    init_test_logging();
    let primary = Arc::new(StaticImageProvider::empty());
    let cache = Arc::new(InMemoryImageCache::new());
    let service = ImageSearchService::new(primary.clone()).with_cache(cache.clone());

    assert!(service.get_image("미역국").await.is_none());
    assert!(service.get_image("미역국").await.is_none());

    assert_eq!(primary.calls(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_cached_url_skips_providers() -> Result<()> {
    init_test_logging();
    let primary = Arc::new(StaticImageProvider::found("https://img.test"));
    let cache = Arc::new(InMemoryImageCache::new());
    cache
        .store("된장찌개", Some("https://cached.test/된장찌개"))
        .await?;
    let service = ImageSearchService::new(primary.clone()).with_cache(cache);

    let url = service.get_image("된장찌개").await;

    assert_eq!(url.as_deref(), Some("https://cached.test/된장찌개"));
    assert_eq!(primary.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_provider_errors_are_not_cached() -> Result<()> {
    init_test_logging();
    let database = create_test_database().await?;
    let cache = Arc::new(SqliteImageCache::new(database.pool().clone()));

    let failing = ImageSearchService::new(Arc::new(FailingImageProvider)).with_cache(cache.clone());
    assert!(failing.get_image("김치찌개").await.is_none());
    assert_eq!(cache.lookup("김치찌개").await?, None);

    let healthy = ImageSearchService::new(Arc::new(StaticImageProvider::found("https://img.test")))
        .with_cache(cache.clone());
    assert_eq!(
        healthy.get_image("김치찌개").await.as_deref(),
        Some("https://img.test/김치찌개")
    );
    Ok(())
}

#[tokio::test]
async fn test_fallback_miss_is_cached_after_primary_error() {
    init_test_logging();
    let fallback = Arc::new(StaticImageProvider::empty());
    let cache = Arc::new(InMemoryImageCache::new());
    let service = ImageSearchService::new(Arc::new(FailingImageProvider))
        .with_fallback(fallback.clone())
        .with_cache(cache.clone());

    assert!(service.get_image("콩국수").await.is_none());
    assert!(service.get_image("콩국수").await.is_none());

    assert_eq!(fallback.calls(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_sqlite_image_cache_remembers_misses() -> Result<()> {
    let database = create_test_database().await?;
    let cache = SqliteImageCache::new(database.pool().clone());

    assert_eq!(cache.lookup("김밥").await?, None);
    cache.store("김밥", None).await?;
    assert_eq!(cache.lookup("김밥").await?, Some(None));

    cache.store("김밥", Some("https://img.test/김밥")).await?;
    assert_eq!(
        cache.lookup("김밥").await?,
        Some(Some("https://img.test/김밥".to_owned()))
    );
    Ok(())
}

#[tokio::test]
async fn test_fetch_all_keeps_title_order() {
    init_test_logging();
    let service = Arc::new(ImageSearchService::new(Arc::new(StaticImageProvider::found(
        "https://img.test",
    ))));
    let requested = titles(&["김치볶음밥", "계란말이", "김치전"]);

    let urls = service
        .fetch_all(&requested, Instant::now() + Duration::from_secs(5))
        .await;

    assert_eq!(
        urls,
        vec![
            Some("https://img.test/김치볶음밥".to_owned()),
            Some("https://img.test/계란말이".to_owned()),
            Some("https://img.test/김치전".to_owned()),
        ]
    );
}

#[tokio::test]
async fn test_fetch_all_abandons_lookups_at_deadline() {
    init_test_logging();
    let service = Arc::new(ImageSearchService::new(Arc::new(HangingImageProvider)));
    let requested = titles(&["a", "b", "c"]);

    let started = Instant::now();
    let urls = service
        .fetch_all(&requested, started + Duration::from_millis(200))
        .await;

    assert_eq!(urls, vec![None, None, None]);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_fetch_all_keeps_results_that_beat_the_deadline() {
    init_test_logging();
    let fast = Arc::new(ImageSearchService::new(Arc::new(SlowImageProvider {
        delay: Duration::from_millis(10),
    })));
    let urls = fast
        .fetch_all(&titles(&["국수"]), Instant::now() + Duration::from_secs(2))
        .await;
    assert_eq!(urls, vec![Some("https://slow.example/국수".to_owned())]);

    let slow = Arc::new(ImageSearchService::new(Arc::new(SlowImageProvider {
        delay: Duration::from_secs(5),
    })));
    let urls = slow
        .fetch_all(&titles(&["국수"]), Instant::now() + Duration::from_millis(100))
        .await;
    assert_eq!(urls, vec![None]);
}

#[tokio::test]
async fn test_fetch_all_with_no_titles() {
    let service = Arc::new(ImageSearchService::new(Arc::new(HangingImageProvider)));
    let urls = service
        .fetch_all(&[], Instant::now() + Duration::from_millis(10))
        .await;
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_placeholder_provider_always_answers() -> Result<()> {
    let provider = PlaceholderImageProvider;
    let url = provider.fetch_image("아무 요리").await?;
    assert!(url.is_some());
    Ok(())
}
