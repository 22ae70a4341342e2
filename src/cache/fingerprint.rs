// ABOUTME: Deterministic request fingerprints used as recipe cache keys
// ABOUTME: SHA-256 over a canonical serialization insensitive to ordering and casing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sha2::{Digest, Sha256};

use crate::models::RecommendationRequest;

/// Separates terms within a list
const UNIT_SEPARATOR: u8 = 0x1f;
/// Separates the fields of the canonical form
const RECORD_SEPARATOR: u8 = 0x1e;

fn canonical_terms(values: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

fn update_terms(hasher: &mut Sha256, terms: &[String]) {
    for term in terms {
        hasher.update(term.as_bytes());
        hasher.update([UNIT_SEPARATOR]);
    }
    hasher.update([RECORD_SEPARATOR]);
}

/// Hex SHA-256 digest of the request's canonical form: sorted lower-cased
/// ingredients, time limit, servings and sorted lower-cased exclusions.
/// Tools are not part of the key.
#[must_use]
pub fn fingerprint(request: &RecommendationRequest) -> String {
    let mut hasher = Sha256::new();

    update_terms(&mut hasher, &canonical_terms(&request.ingredients));
    hasher.update(request.constraints.time_limit_min.to_be_bytes());
    hasher.update([RECORD_SEPARATOR]);
    hasher.update(request.constraints.servings.to_be_bytes());
    hasher.update([RECORD_SEPARATOR]);
    update_terms(&mut hasher, &canonical_terms(&request.constraints.exclude));

    hex::encode(hasher.finalize())
}
