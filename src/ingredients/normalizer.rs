// ABOUTME: Reduces free-text ingredient strings to a canonical name
// ABOUTME: Strips quantities, units and descriptive modifiers for comparison and dedupe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient Normalizer
//!
//! Free-text ingredients arrive as "신선한 계란 2개", "다진 마늘 1큰술" or
//! "양파 (선택)". Normalizing removes everything but the ingredient name so
//! that the have/need split and the shopping list compare like with like.
//!
//! A single cleanup pass can expose new removable pairs (a count word whose
//! unit was separated by a modifier), so `normalize` repeats the pass until
//! the string stops changing. Every pass only removes tokens, so this
//! terminates and makes the function idempotent.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

/// Unit tokens that may follow (or be glued to) a quantity
const UNITS: &[&str] = &[
    "개", "알", "장", "쪽", "줌", "컵", "큰술", "작은술", "스푼", "숟가락", "티스푼", "꼬집", "g",
    "kg", "mg", "ml", "l", "그램", "리터", "모", "봉", "봉지", "팩", "통", "캔", "마리", "대",
    "뿌리", "단", "송이", "톨", "공기", "인분", "조각", "줄기", "포기", "tbsp", "tsp", "cup",
    "cups", "oz", "lb",
];

/// Native Korean count words; treated as quantities only when a unit follows
const COUNT_WORDS: &[&str] = &["한", "두", "세", "네", "반"];

/// Freshness, cut-style, doneness and quantity-hedge words
const MODIFIERS: &[&str] = &[
    "신선한",
    "싱싱한",
    "냉동",
    "냉장",
    "다진",
    "채썬",
    "썬",
    "깍둑썬",
    "송송썬",
    "잘게",
    "얇게",
    "굵게",
    "익은",
    "삶은",
    "볶은",
    "데친",
    "구운",
    "손질한",
    "약간",
    "적당량",
    "조금",
    "적당히",
    "소량",
    "넉넉히",
    "약",
    "fresh",
    "chopped",
    "sliced",
    "diced",
    "minced",
];

/// Quantity, optionally followed by a glued unit: `2`, `1/2컵`, `100g`, `2~3개`
static QUANTITY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[./~\-]\d+)*(\D*)$").ok());

/// Name with a glued quantity suffix: `계란2개`, `우유200ml`
static GLUED_QUANTITY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\D+?)(\d+(?:[./~\-]\d+)*\D*)$").ok());

/// Parenthesised annotations: `(선택)`, `(200g)`
static PARENTHESIZED_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").ok());

fn is_unit(token: &str) -> bool {
    UNITS.contains(&token.to_lowercase().as_str())
}

fn is_modifier(token: &str) -> bool {
    MODIFIERS.contains(&token.to_lowercase().as_str())
}

fn is_count_word(token: &str) -> bool {
    COUNT_WORDS.contains(&token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantity {
    /// A number alone; a following unit token belongs to it
    Bare,
    /// A number with its unit glued on
    WithUnit,
}

fn quantity_kind(token: &str) -> Option<Quantity> {
    let captures = QUANTITY_PATTERN.as_ref()?.captures(token)?;
    let suffix = captures.get(1).map_or("", |m| m.as_str());
    if suffix.is_empty() {
        Some(Quantity::Bare)
    } else if is_unit(suffix) {
        Some(Quantity::WithUnit)
    } else {
        None
    }
}

/// `계란2개` -> `계란`; tokens without a glued quantity are returned unchanged
fn strip_glued_quantity(token: &str) -> &str {
    let Some(pattern) = GLUED_QUANTITY_PATTERN.as_ref() else {
        return token;
    };
    pattern
        .captures(token)
        .and_then(|captures| {
            let name = captures.get(1)?;
            let quantity = captures.get(2)?;
            quantity_kind(quantity.as_str()).map(|_| name.as_str())
        })
        .unwrap_or(token)
}

fn strip_parenthesized(raw: &str) -> String {
    PARENTHESIZED_PATTERN.as_ref().map_or_else(
        || raw.to_owned(),
        |pattern| pattern.replace_all(raw, " ").into_owned(),
    )
}

fn cleanup_pass(input: &str) -> String {
    let without_notes = strip_parenthesized(input);
    let tokens: Vec<&str> = without_notes
        .split_whitespace()
        .map(strip_glued_quantity)
        .filter(|token| !is_modifier(token))
        .collect();

    let mut kept = Vec::with_capacity(tokens.len());
    let mut after_quantity = false;
    for (index, token) in tokens.iter().enumerate() {
        if after_quantity && is_unit(token) {
            after_quantity = false;
            continue;
        }
        after_quantity = false;

        match quantity_kind(token) {
            Some(Quantity::Bare) => {
                after_quantity = true;
                continue;
            }
            Some(Quantity::WithUnit) => continue,
            None => {}
        }

        if is_count_word(token) && tokens.get(index + 1).is_some_and(|next| is_unit(next)) {
            after_quantity = true;
            continue;
        }

        kept.push(*token);
    }

    kept.join(" ")
}

/// Reduce an ingredient string to its canonical name.
///
/// `normalize("신선한 계란 1개") == "계란"`. Empty input yields empty output
/// and `normalize(normalize(x)) == normalize(x)` for every input.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut current = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    loop {
        let next = cleanup_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Key used to compare ingredients: normalized, lower-cased, whitespace-free.
/// Falls back to the raw text when normalization removes everything.
#[must_use]
pub fn comparison_key(raw: &str) -> String {
    let normalized = normalize(raw);
    let source = if normalized.is_empty() {
        raw
    } else {
        normalized.as_str()
    };
    source
        .split_whitespace()
        .collect::<String>()
        .to_lowercase()
}

/// Normalize, keep the first-seen form per distinct key, drop empties, sort.
#[must_use]
pub fn dedupe_shopping_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, String> = HashMap::new();
    for item in items {
        let normalized = normalize(item.as_ref());
        if normalized.is_empty() {
            continue;
        }
        seen.entry(comparison_key(&normalized)).or_insert(normalized);
    }

    let mut list: Vec<String> = seen.into_values().collect();
    list.sort();
    list
}

/// Partition `required` into items the caller already owns and items to buy.
///
/// Matching ignores case, whitespace, quantities and modifiers. Required
/// items that compare equal collapse to their first occurrence; each output
/// keeps that item's original text and is sorted.
#[must_use]
pub fn split_have_need<O, R>(owned: &[O], required: &[R]) -> (Vec<String>, Vec<String>)
where
    O: AsRef<str>,
    R: AsRef<str>,
{
    let owned_keys: BTreeSet<String> = owned
        .iter()
        .map(|item| comparison_key(item.as_ref()))
        .filter(|key| !key.is_empty())
        .collect();

    let mut required_keys = BTreeSet::new();
    let mut have = Vec::new();
    let mut need = Vec::new();
    for item in required {
        let key = comparison_key(item.as_ref());
        if !required_keys.insert(key.clone()) {
            continue;
        }
        if owned_keys.contains(&key) {
            have.push(item.as_ref().to_owned());
        } else {
            need.push(item.as_ref().to_owned());
        }
    }

    have.sort();
    need.sort();
    (have, need)
}
