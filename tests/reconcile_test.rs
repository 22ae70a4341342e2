// ABOUTME: Integration tests for composing recipes and the shopping list
// ABOUTME: Covers have/need splits, positional images and purchase links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fridge_recipes::reconcile::{reconcile, PurchaseLinkBuilder};

use common::{draft, sample_drafts};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

#[test]
fn test_recipes_keep_generation_order_and_images() {
    let images = vec![Some("https://img.test/1".to_owned()), None, Some("https://img.test/3".to_owned())];

    let (recipes, _) = reconcile(
        &owned(&["김치"]),
        sample_drafts(),
        images,
        &PurchaseLinkBuilder::default(),
    );

    let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["김치볶음밥", "계란말이", "김치전"]);
    assert_eq!(recipes[0].image_url.as_deref(), Some("https://img.test/1"));
    assert_eq!(recipes[1].image_url, None);
    assert_eq!(recipes[2].image_url.as_deref(), Some("https://img.test/3"));
}

#[test]
fn test_missing_image_slots_mean_no_image() {
    let (recipes, _) = reconcile(
        &owned(&["계란"]),
        sample_drafts(),
        Vec::new(),
        &PurchaseLinkBuilder::default(),
    );
    assert!(recipes.iter().all(|recipe| recipe.image_url.is_none()));
}

#[test]
fn test_have_need_split_per_recipe() {
    let (recipes, _) = reconcile(
        &owned(&["김치 1/4포기", "밥"]),
        sample_drafts(),
        Vec::new(),
        &PurchaseLinkBuilder::default(),
    );

    assert_eq!(recipes[0].ingredients_have, vec!["김치", "밥"]);
    assert_eq!(recipes[0].ingredients_need, vec!["참기름"]);
    assert!(recipes[1].ingredients_have.is_empty());
    assert_eq!(recipes[2].ingredients_have, vec!["김치"]);
}

#[test]
fn test_shopping_list_is_deduplicated_union_of_needs() {
    let drafts = vec![
        draft("계란볶음밥", 10, &["밥", "계란 2개", "대파"]),
        draft("계란국", 10, &["계란", "대파 1대", "국간장"]),
        draft("대파전", 15, &["대파", "부침가루"]),
    ];

    let (_, shopping) = reconcile(
        &owned(&["밥"]),
        drafts,
        Vec::new(),
        &PurchaseLinkBuilder::default(),
    );

    let items: Vec<&str> = shopping.iter().map(|item| item.item.as_str()).collect();
    assert_eq!(items, ["계란", "국간장", "대파", "부침가루"]);
    assert!(shopping.iter().all(|item| item.purchase_url.is_none()));
}

#[test]
fn test_everything_owned_means_empty_shopping_list() {
    let drafts = vec![
        draft("a", 5, &["계란"]),
        draft("b", 5, &["계란", "소금"]),
        draft("c", 5, &["소금"]),
    ];
    let (recipes, shopping) = reconcile(
        &owned(&["계란", "소금"]),
        drafts,
        Vec::new(),
        &PurchaseLinkBuilder::default(),
    );
    assert!(shopping.is_empty());
    assert!(recipes.iter().all(|recipe| recipe.ingredients_need.is_empty()));
}

#[test]
fn test_purchase_links_attached_when_tracking_configured() {
    let links = PurchaseLinkBuilder::new(Some("AF123".to_owned()), None);
    let (_, shopping) = reconcile(&owned(&["김치"]), sample_drafts(), Vec::new(), &links);

    assert!(!shopping.is_empty());
    for item in &shopping {
        let url = item.purchase_url.as_deref().unwrap();
        assert!(url.starts_with("https://www.coupang.com/np/search?"));
        assert!(url.contains(&urlencoding::encode(&item.item).into_owned()));
        assert!(url.contains("tracker=AF123"));
        assert!(!url.contains("subId="));
    }
}
