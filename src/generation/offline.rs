// ABOUTME: Deterministic offline recipe generator used as the chain's terminal fallback
// ABOUTME: Serves simple fixed recipes adapted to the request's servings, time limit and exclusions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::pipeline::RECIPES_PER_RECOMMENDATION;
use crate::ingredients::expand_all;
use crate::models::{RecipeDraft, RecommendationRequest};

struct OfflineRecipe {
    title: &'static str,
    time_min: u32,
    summary: &'static str,
    ingredients: &'static [&'static str],
    steps: &'static [&'static str],
    tips: &'static [&'static str],
}

impl OfflineRecipe {
    fn searchable_text(&self) -> String {
        [self.title, self.summary]
            .into_iter()
            .chain(self.ingredients.iter().copied())
            .chain(self.steps.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    fn to_draft(&self, request: &RecommendationRequest) -> RecipeDraft {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        RecipeDraft {
            title: self.title.to_owned(),
            time_min: self.time_min.min(request.constraints.time_limit_min),
            servings: request.constraints.servings,
            summary: self.summary.to_owned(),
            ingredients_total: owned(self.ingredients),
            steps: owned(self.steps),
            tips: owned(self.tips),
            warnings: Vec::new(),
        }
    }
}

const POOL: &[OfflineRecipe] = &[
    OfflineRecipe {
        title: "간단 계란볶음밥",
        time_min: 10,
        summary: "냉장고 재료로 빠르게 만드는 볶음밥",
        ingredients: &["밥", "계란", "간장", "참기름"],
        steps: &[
            "팬에 기름을 두르고 계란을 볶는다",
            "밥을 넣고 볶는다",
            "간장과 참기름으로 간한다",
            "그릇에 담아 완성",
        ],
        tips: &["계란은 스크램블로 먼저 볶으면 좋아요"],
    },
    OfflineRecipe {
        title: "간단 달걀국",
        time_min: 8,
        summary: "속 편한 국물 한 그릇",
        ingredients: &["계란", "소금", "물"],
        steps: &[
            "물을 끓인다",
            "소금으로 간한다",
            "계란을 풀어 넣는다",
            "30초 두었다가 가볍게 저어 완성",
        ],
        tips: &["다진 마늘을 넣어도 좋아요"],
    },
    OfflineRecipe {
        title: "간단 김치볶음",
        time_min: 7,
        summary: "김치만 있으면 되는 반찬",
        ingredients: &["김치", "참기름"],
        steps: &[
            "김치를 먹기 좋게 자른다",
            "팬에 참기름을 두른다",
            "김치를 넣고 볶는다",
            "간을 맞춰 완성",
        ],
        tips: &["돼지고기를 더하면 더 든든해요"],
    },
    OfflineRecipe {
        title: "두부간장조림",
        time_min: 10,
        summary: "썰어서 양념 올리고 데우면 끝",
        ingredients: &["두부", "간장"],
        steps: &[
            "두부를 1~2cm 두께로 썬다",
            "간장과 물을 섞어 양념을 만든다",
            "두부 위에 양념을 올린다",
            "전자레인지에 2~3분 데워 마무리한다",
        ],
        tips: &["고춧가루를 조금 넣으면 매콤해요"],
    },
    OfflineRecipe {
        title: "양파 맑은국",
        time_min: 8,
        summary: "양파 단맛이 우러난 맑은 국",
        ingredients: &["양파", "소금", "물"],
        steps: &[
            "양파를 채 썬다",
            "물에 양파를 넣고 3분 끓인다",
            "소금으로 간을 맞춘다",
            "한 번 더 끓어오르면 불을 끈다",
        ],
        tips: &["후추를 조금 뿌려도 좋아요"],
    },
    OfflineRecipe {
        title: "감자채볶음",
        time_min: 12,
        summary: "얇게 채 썬 감자를 고소하게 볶은 반찬",
        ingredients: &["감자", "식용유", "소금"],
        steps: &[
            "감자를 얇게 채 썬다",
            "찬물에 헹궈 전분을 뺀다",
            "팬에 기름을 두르고 감자를 볶는다",
            "소금으로 간해 완성",
        ],
        tips: &["양파를 함께 볶으면 단맛이 더해져요"],
    },
];

/// Fixed-pool generator with no external dependency
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRecipeGenerator;

impl OfflineRecipeGenerator {
    /// Backend name
    pub const NAME: &'static str = "offline";

    /// Three recipes from the fixed pool.
    ///
    /// Pool recipes mentioning an excluded ingredient are skipped; when fewer
    /// than three remain the first three of the pool are served unchanged.
    #[must_use]
    pub fn generate(&self, request: &RecommendationRequest) -> Vec<RecipeDraft> {
        let exclusions = expand_all(&request.constraints.exclude);

        let safe: Vec<&OfflineRecipe> = POOL
            .iter()
            .filter(|recipe| {
                let text = recipe.searchable_text();
                !exclusions.iter().any(|term| text.contains(term.as_str()))
            })
            .take(RECIPES_PER_RECOMMENDATION)
            .collect();

        let chosen: Vec<&OfflineRecipe> = if safe.len() == RECIPES_PER_RECOMMENDATION {
            safe
        } else {
            POOL.iter().take(RECIPES_PER_RECOMMENDATION).collect()
        };

        chosen
            .into_iter()
            .map(|recipe| recipe.to_draft(request))
            .collect()
    }
}
