// ABOUTME: System prompts for recipe generation loaded at compile time
// ABOUTME: Builds the per-request user prompts for direct generation and video structuring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! System prompts live in markdown files next to this module so they can be
//! edited without touching code.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::models::RecommendationRequest;

/// System prompt for generating recipes directly from ingredients
pub const RECIPE_GENERATION_PROMPT: &str = include_str!("recipe_generation.md");

/// System prompt for turning video metadata into recipes
pub const VIDEO_STRUCTURING_PROMPT: &str = include_str!("video_structuring.md");

/// Style hints; one is rolled per generation attempt for variety
pub const COOKING_STYLES: &[&str] = &[
    "전통 한식",
    "퓨전 요리",
    "간단 자취 요리",
    "건강식",
    "야식 메뉴",
    "브런치 메뉴",
    "도시락 반찬",
    "술안주",
    "분식",
    "양식 스타일",
    "일식 스타일",
    "중식 스타일",
];

/// Cooking method hints; one is rolled per generation attempt
pub const COOKING_METHODS: &[&str] = &[
    "볶음 요리 중심",
    "국/찌개 포함",
    "구이 요리 포함",
    "찜 요리 포함",
    "무침/샐러드 포함",
    "전/부침 포함",
    "면 요리 포함",
    "밥 요리 중심",
];

fn join_or(items: impl IntoIterator<Item = impl AsRef<str>>, empty: &str) -> String {
    let joined = items
        .into_iter()
        .map(|item| item.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        empty.to_owned()
    } else {
        joined
    }
}

/// User prompt for direct recipe generation
#[must_use]
pub fn recipe_user_prompt(
    request: &RecommendationRequest,
    exclusions: &BTreeSet<String>,
    style: &str,
    method: &str,
) -> String {
    let constraints = &request.constraints;
    let time_limit = constraints.time_limit_min;

    format!(
        "다음 조건으로 한국 가정 요리 레시피 3개를 만들어 주세요.\n\n\
         재료: {ingredients}\n\
         조리 시간 제한: {time_limit}분 이내\n\
         인분: {servings}인분\n\
         사용 가능 도구: {tools}\n\
         제외 재료 (파생 재료 포함): {exclude}\n\n\
         스타일 힌트: {style} 스타일로, {method} 형태를 고려해 주세요.\n\n\
         요구사항:\n\
         1. 위 재료를 최대한 활용하고 부족한 재료는 ingredients_total에 추가\n\
         2. 세 레시피는 종류와 조리법이 모두 달라야 함\n\
         3. {time_limit}분 이내에 완성할 수 있어야 함\n\
         4. 자취생도 쉽게 따라 할 수 있는 수준\n\
         5. 제외 재료는 가공품 형태로도 사용 금지 (토마토 제외 시 케첩, 토마토소스도 금지)\n\n\
         JSON 배열로만 응답하세요.",
        ingredients = request.ingredients.join(", "),
        servings = constraints.servings,
        tools = join_or(&constraints.tools, "모든 도구 가능"),
        exclude = join_or(exclusions, "없음"),
    )
}

/// User prompt for structuring ranked videos into recipes.
///
/// `videos` is the pre-rendered video digest, one block per video.
#[must_use]
pub fn structuring_user_prompt(
    request: &RecommendationRequest,
    exclusions: &BTreeSet<String>,
    videos: &str,
) -> String {
    let constraints = &request.constraints;
    let mut prompt = String::from(
        "아래 요리 영상 정보를 참고해 사용자 조건에 맞는 레시피 3개를 JSON으로 정리해 주세요.\n\
         양념이나 소스만 만드는 레시피는 넣지 말고 한 끼 식사가 되는 요리만 넣으세요.\n\n\
         === 사용자 조건 ===\n",
    );
    let _ = writeln!(prompt, "보유 재료: {}", request.ingredients.join(", "));
    let _ = writeln!(prompt, "조리 시간 제한: {}분 이내", constraints.time_limit_min);
    let _ = writeln!(prompt, "인분: {}인분", constraints.servings);
    let _ = writeln!(prompt, "제외 재료 (파생 포함): {}", join_or(exclusions, "없음"));
    let _ = write!(
        prompt,
        "\n=== 영상 정보 ===\n{videos}\n\n\
         === 출력 형식 ===\n\
         [{{\"title\": \"...\", \"time_min\": 10, \"servings\": 1, \"summary\": \"...\", \
         \"ingredients_total\": [\"...\"], \"steps\": [\"...\"], \"tips\": [\"...\"], \
         \"warnings\": [\"...\"]}}, ...]\n\n\
         JSON 배열만 출력하세요."
    );
    prompt
}
