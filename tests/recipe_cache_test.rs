// ABOUTME: Integration tests for request fingerprints and the recipe cache backends
// ABOUTME: Both backends are checked for hit counting, overwrite reset and expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use anyhow::Result;
use fridge_recipes::cache::{
    fingerprint, InMemoryRecipeCache, RecipeCacheConfig, RecipeCacheStore, SqliteRecipeCache,
};
use fridge_recipes::models::{Constraints, RecommendationRequest};
use tokio::time::sleep;

use common::{create_test_database, request, request_excluding, sample_recommendation};

fn short_lived() -> RecipeCacheConfig {
    RecipeCacheConfig {
        expiry: Duration::from_millis(50),
        ..RecipeCacheConfig::default()
    }
}

async fn sqlite_cache(config: RecipeCacheConfig) -> Result<SqliteRecipeCache> {
    let database = create_test_database().await?;
    Ok(SqliteRecipeCache::new(database.pool().clone(), config))
}

// ============================================================================
// Fingerprints
// ============================================================================

#[test]
fn test_fingerprint_ignores_order_case_and_whitespace() {
    let a = request(&["계란", "김치", "Tofu"]);
    let b = request(&[" tofu ", "김치", "계란", "김치"]);
    assert_eq!(fingerprint(&a), fingerprint(&b));
}

#[test]
fn test_fingerprint_ignores_exclusion_order() {
    let a = request_excluding(&["계란"], &["우유", "땅콩"]);
    let b = request_excluding(&["계란"], &["땅콩", "우유"]);
    assert_eq!(fingerprint(&a), fingerprint(&b));
}

#[test]
fn test_fingerprint_separates_constraints() {
    let base = request(&["계란"]);
    let longer = RecommendationRequest::new(["계란"])
        .with_constraints(Constraints::default().with_time_limit(30));
    let more_servings = RecommendationRequest::new(["계란"])
        .with_constraints(Constraints::default().with_servings(2));
    let excluding = request_excluding(&["계란"], &["우유"]);

    let fingerprints = [
        fingerprint(&base),
        fingerprint(&longer),
        fingerprint(&more_servings),
        fingerprint(&excluding),
    ];
    for (i, a) in fingerprints.iter().enumerate() {
        for b in fingerprints.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_fingerprint_list_boundaries_are_unambiguous() {
    let joined = request(&["ab"]);
    let split = request(&["a", "b"]);
    assert_ne!(fingerprint(&joined), fingerprint(&split));
}

// ============================================================================
// Backend behavior, shared between memory and SQLite
// ============================================================================

async fn check_store_and_hit(cache: &dyn RecipeCacheStore) -> Result<()> {
    let key = fingerprint(&request(&["계란", "김치"]));
    assert!(cache.lookup(&key).await?.is_none());

    let recommendation = sample_recommendation();
    cache.store(&key, &recommendation).await?;

    let first = cache.lookup(&key).await?.unwrap();
    assert_eq!(first, recommendation);
    cache.lookup(&key).await?.unwrap();

    let entry = cache.entry(&key).await?.unwrap();
    assert_eq!(entry.hit_count, 2);
    assert_eq!(entry.fingerprint, key);
    Ok(())
}

async fn check_overwrite_resets_hits(cache: &dyn RecipeCacheStore) -> Result<()> {
    let key = fingerprint(&request(&["두부"]));
    cache.store(&key, &sample_recommendation()).await?;
    cache.lookup(&key).await?;

    let replacement = sample_recommendation();
    cache.store(&key, &replacement).await?;

    let entry = cache.entry(&key).await?.unwrap();
    assert_eq!(entry.hit_count, 0);
    assert_eq!(entry.payload.id, replacement.id);
    Ok(())
}

async fn check_expired_entry_is_removed(cache: &dyn RecipeCacheStore) -> Result<()> {
    let key = fingerprint(&request(&["양파"]));
    cache.store(&key, &sample_recommendation()).await?;
    sleep(Duration::from_millis(120)).await;

    assert!(cache.lookup(&key).await?.is_none());
    assert!(cache.entry(&key).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_memory_cache_store_and_hit() -> Result<()> {
    common::init_test_logging();
    check_store_and_hit(&InMemoryRecipeCache::default()).await
}

#[tokio::test]
async fn test_memory_cache_overwrite_resets_hits() -> Result<()> {
    check_overwrite_resets_hits(&InMemoryRecipeCache::default()).await
}

#[tokio::test]
async fn test_memory_cache_expiry() -> Result<()> {
    check_expired_entry_is_removed(&InMemoryRecipeCache::new(short_lived())).await
}

#[tokio::test]
async fn test_memory_cache_evicts_least_recently_used() -> Result<()> {
    let cache = InMemoryRecipeCache::new(RecipeCacheConfig {
        max_entries: 2,
        ..RecipeCacheConfig::default()
    });
    let recommendation = sample_recommendation();

    cache.store("a", &recommendation).await?;
    cache.store("b", &recommendation).await?;
    cache.lookup("a").await?;
    cache.store("c", &recommendation).await?;

    assert_eq!(cache.len().await, 2);
    assert!(cache.entry("a").await?.is_some());
    assert!(cache.entry("b").await?.is_none());
    assert!(cache.entry("c").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_sqlite_cache_store_and_hit() -> Result<()> {
    let cache = sqlite_cache(RecipeCacheConfig::default()).await?;
    check_store_and_hit(&cache).await
}

#[tokio::test]
async fn test_sqlite_cache_overwrite_resets_hits() -> Result<()> {
    let cache = sqlite_cache(RecipeCacheConfig::default()).await?;
    check_overwrite_resets_hits(&cache).await
}

#[tokio::test]
async fn test_sqlite_cache_expiry() -> Result<()> {
    let cache = sqlite_cache(short_lived()).await?;
    check_expired_entry_is_removed(&cache).await
}
