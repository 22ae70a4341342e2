// ABOUTME: Parses LLM text output into draft recipes
// ABOUTME: Strips markdown fences, locates the JSON array and applies field defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;
use serde_json::Value;

use super::ensure_recipe_count;
use crate::errors::GenerationError;
use crate::models::{RecipeDraft, RecommendationRequest};

/// Title used when the model omits one
pub const UNTITLED_RECIPE: &str = "제목 없음";

/// Cooking time used when the model omits one
pub const DEFAULT_RECIPE_TIME_MIN: u32 = 15;

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    time_min: Option<u32>,
    #[serde(default)]
    servings: Option<u32>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    ingredients_total: Vec<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    tips: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
}

impl RawRecipe {
    fn into_draft(self, default_servings: u32) -> RecipeDraft {
        RecipeDraft {
            title: self
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_RECIPE.to_owned()),
            time_min: self.time_min.unwrap_or(DEFAULT_RECIPE_TIME_MIN),
            servings: self.servings.unwrap_or(default_servings),
            summary: self.summary.unwrap_or_default(),
            ingredients_total: self.ingredients_total,
            steps: self.steps,
            tips: self.tips,
            warnings: self.warnings,
        }
    }
}

/// Body of the first fenced block, or the whole text when unfenced
fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    let Some(open) = content.find("```") else {
        return content;
    };
    let after_fence = &content[open + 3..];
    // Drop the info string (`json`) on the opening fence line
    let body = after_fence
        .find('\n')
        .map_or(after_fence, |newline| &after_fence[newline + 1..]);
    body.find("```").map_or(body, |close| &body[..close]).trim()
}

/// Outermost `[...]` span, tolerating prose around the array
fn locate_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse model output into exactly three drafts
///
/// # Errors
///
/// Returns `Malformed` when no JSON array can be read and `WrongCount` when
/// the array does not hold three recipes
pub fn parse_recipe_drafts(
    provider: &'static str,
    content: &str,
    request: &RecommendationRequest,
) -> Result<Vec<RecipeDraft>, GenerationError> {
    let body = strip_code_fence(content);
    let array_text = locate_json_array(body).ok_or_else(|| GenerationError::Malformed {
        provider,
        message: "response contains no JSON array".to_owned(),
    })?;

    let value: Value = serde_json::from_str(array_text).map_err(|e| GenerationError::Malformed {
        provider,
        message: format!("invalid JSON: {e}"),
    })?;

    let Value::Array(items) = value else {
        return Err(GenerationError::Malformed {
            provider,
            message: "response is not a JSON array".to_owned(),
        });
    };

    let drafts = items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<RawRecipe>(item)
                .map(|raw| raw.into_draft(request.constraints.servings))
                .map_err(|e| GenerationError::Malformed {
                    provider,
                    message: format!("invalid recipe object: {e}"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ensure_recipe_count(provider, drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Constraints;

    fn request() -> RecommendationRequest {
        RecommendationRequest::new(["계란"])
            .with_constraints(Constraints::default().with_servings(2))
    }

    const THREE: &str = r#"[
        {"title": "A", "time_min": 10, "steps": ["1", "2", "3", "4"]},
        {"title": "B"},
        {"time_min": 5, "servings": 3}
    ]"#;

    #[test]
    fn test_parses_fenced_json_with_defaults() {
        let content = format!("```json\n{THREE}\n```");
        let drafts = parse_recipe_drafts("test", &content, &request()).unwrap();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].time_min, 10);
        assert_eq!(drafts[1].time_min, DEFAULT_RECIPE_TIME_MIN);
        assert_eq!(drafts[1].servings, 2);
        assert_eq!(drafts[2].title, UNTITLED_RECIPE);
        assert_eq!(drafts[2].servings, 3);
    }

    #[test]
    fn test_parses_array_surrounded_by_prose() {
        let content = format!("Here you go:\n{THREE}\nEnjoy!");
        assert!(parse_recipe_drafts("test", &content, &request()).is_ok());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_recipe_drafts("test", r#"{"title": "A"}"#, &request()).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed { .. }));
    }

    #[test]
    fn test_rejects_wrong_count() {
        let err = parse_recipe_drafts("test", r#"[{"title": "A"}]"#, &request()).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::WrongCount { count: 1, expected: 3, .. }
        ));
    }
}
