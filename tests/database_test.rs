// ABOUTME: Integration tests for the SQLite-backed stores
// ABOUTME: Recommendation records, guest quota counters and search history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Duration;
use fridge_recipes::database::{
    Database, GuestUsageManager, RecordStore, SearchHistoryManager, SqliteRecordStore,
};
use fridge_recipes::models::SearchHistoryEntry;
use tempfile::TempDir;

use common::{create_test_database, request, sample_recommendation};

// ============================================================================
// Recommendation records
// ============================================================================

#[tokio::test]
async fn test_record_round_trip_and_count() -> Result<()> {
    let database = create_test_database().await?;
    let store = SqliteRecordStore::new(database.pool().clone());

    assert_eq!(store.count().await?, 0);
    assert!(store.get("rec_missing000").await?.is_none());

    let first = sample_recommendation();
    let second = sample_recommendation();
    store.save(&first).await?;
    store.save(&second).await?;

    assert_eq!(store.get(&first.id).await?.unwrap(), first);
    assert_eq!(store.count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_record_resave_updates_in_place() -> Result<()> {
    let database = create_test_database().await?;
    let store = SqliteRecordStore::new(database.pool().clone());

    let mut recommendation = sample_recommendation();
    store.save(&recommendation).await?;
    recommendation.recipes[0].image_url = Some("https://img.test/patched".to_owned());
    store.save(&recommendation).await?;

    let stored = store.get(&recommendation.id).await?.unwrap();
    assert_eq!(
        stored.recipes[0].image_url.as_deref(),
        Some("https://img.test/patched")
    );
    assert_eq!(store.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_records_survive_reopen() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.path().join("recipes.db").display());
    let recommendation = sample_recommendation();

    {
        let database = Database::new(&url).await?;
        SqliteRecordStore::new(database.pool().clone())
            .save(&recommendation)
            .await?;
        database.pool().close().await;
    }

    let reopened = Database::new(&url).await?;
    let store = SqliteRecordStore::new(reopened.pool().clone());
    assert_eq!(store.get(&recommendation.id).await?.unwrap(), recommendation);
    Ok(())
}

// ============================================================================
// Guest quota
// ============================================================================

#[tokio::test]
async fn test_guest_quota_counts_down_per_address() -> Result<()> {
    let database = create_test_database().await?;
    let quota = GuestUsageManager::new(database.pool().clone(), 3);

    let fresh = quota.status("203.0.113.7").await?;
    assert_eq!(fresh.used, 0);
    assert_eq!(fresh.remaining(), 3);
    assert!(!fresh.is_exhausted());

    assert_eq!(quota.increment("203.0.113.7").await?.remaining(), 2);
    assert_eq!(quota.increment("203.0.113.7").await?.remaining(), 1);
    let last = quota.increment("203.0.113.7").await?;
    assert_eq!(last.remaining(), 0);
    assert!(last.is_exhausted());
    assert!(quota.status("203.0.113.7").await?.is_exhausted());

    assert_eq!(quota.status("198.51.100.1").await?.remaining(), 3);
    Ok(())
}

#[tokio::test]
async fn test_guest_quota_remaining_never_underflows() -> Result<()> {
    let database = create_test_database().await?;
    let quota = GuestUsageManager::new(database.pool().clone(), 1);

    quota.increment("unknown").await?;
    let over = quota.increment("unknown").await?;
    assert_eq!(over.used, 2);
    assert_eq!(over.remaining(), 0);
    Ok(())
}

// ============================================================================
// Search history
// ============================================================================

#[tokio::test]
async fn test_search_history_round_trip() -> Result<()> {
    let database = create_test_database().await?;
    let history = SearchHistoryManager::new(database.pool().clone());

    let mut recommendation = sample_recommendation();
    recommendation.recipes[1].image_url = Some("https://img.test/계란말이".to_owned());
    let entry = SearchHistoryEntry::record("user-1", &request(&["김치", "밥"]), &recommendation);
    history.create(&entry).await?;

    let listed = history.list_recent("user-1", 10).await?;
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.recommendation_id, recommendation.id);
    assert_eq!(stored.ingredients, vec!["김치", "밥"]);
    assert_eq!(stored.time_limit_min, 15);
    assert_eq!(stored.recipe_titles, recommendation.titles());
    assert_eq!(
        stored.recipe_images,
        vec![None, Some("https://img.test/계란말이".to_owned()), None]
    );
    Ok(())
}

#[tokio::test]
async fn test_search_history_is_per_user_newest_first() -> Result<()> {
    let database = create_test_database().await?;
    let history = SearchHistoryManager::new(database.pool().clone());

    let older = SearchHistoryEntry::record("user-1", &request(&["계란"]), &sample_recommendation());
    let mut newer = SearchHistoryEntry::record("user-1", &request(&["두부"]), &sample_recommendation());
    newer.searched_at = older.searched_at + Duration::seconds(1);
    let other = SearchHistoryEntry::record("user-2", &request(&["김치"]), &sample_recommendation());
    for entry in [&older, &newer, &other] {
        history.create(entry).await?;
    }

    let listed = history.list_recent("user-1", 10).await?;
    let ids: Vec<&str> = listed.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, [newer.id.as_str(), older.id.as_str()]);

    assert_eq!(history.list_recent("user-1", 1).await?.len(), 1);
    assert!(history.list_recent("nobody", 10).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_history_hides_entries_past_retention() -> Result<()> {
    let database = create_test_database().await?;
    let history = SearchHistoryManager::new(database.pool().clone());

    let mut stale = SearchHistoryEntry::record("user-1", &request(&["계란"]), &sample_recommendation());
    stale.searched_at -= Duration::days(8);
    history.create(&stale).await?;

    assert!(history.list_recent("user-1", 10).await?.is_empty());
    Ok(())
}
