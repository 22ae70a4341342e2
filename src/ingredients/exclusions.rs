// ABOUTME: Expands avoided ingredients into their known derivative ingredients
// ABOUTME: Flat allergen families, e.g. milk widens to cheese, butter and cream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::iter;

/// A base ingredient and the ingredients derived from it
#[derive(Debug, Clone, Copy)]
pub struct DerivativeGroup {
    /// Base ingredient name
    pub base: &'static str,
    /// Ingredients made from, or commonly containing, the base
    pub derivatives: &'static [&'static str],
}

impl DerivativeGroup {
    const fn new(base: &'static str, derivatives: &'static [&'static str]) -> Self {
        Self { base, derivatives }
    }

    fn contains(&self, term: &str) -> bool {
        self.base == term || self.derivatives.contains(&term)
    }

    fn members(&self) -> impl Iterator<Item = &'static str> {
        iter::once(self.base).chain(self.derivatives.iter().copied())
    }
}

/// Allergen and dislike families. Groups are flat; a term widens only to the
/// members of groups it directly belongs to.
pub const DERIVATIVE_GROUPS: &[DerivativeGroup] = &[
    DerivativeGroup::new(
        "토마토",
        &[
            "케첩",
            "토마토소스",
            "토마토페이스트",
            "토마토퓨레",
            "파스타소스",
            "피자소스",
            "마리나라소스",
        ],
    ),
    DerivativeGroup::new(
        "우유",
        &[
            "치즈",
            "버터",
            "크림",
            "생크림",
            "요거트",
            "요구르트",
            "분유",
            "연유",
            "휘핑크림",
            "모짜렐라",
        ],
    ),
    DerivativeGroup::new("계란", &["달걀", "난황", "난백", "마요네즈", "마요"]),
    DerivativeGroup::new("땅콩", &["피넛버터", "땅콩버터", "땅콩소스"]),
    DerivativeGroup::new(
        "대두",
        &["두부", "된장", "간장", "청국장", "콩나물", "두유", "미소", "콩"],
    ),
    DerivativeGroup::new(
        "밀",
        &[
            "밀가루",
            "빵가루",
            "파스타",
            "국수",
            "라면",
            "우동",
            "소면",
            "스파게티",
            "빵",
        ],
    ),
    DerivativeGroup::new("갑각류", &["새우", "게", "랍스터", "가재", "새우젓", "게장"]),
    DerivativeGroup::new("새우", &["새우젓"]),
    DerivativeGroup::new(
        "생선",
        &[
            "멸치",
            "참치",
            "연어",
            "고등어",
            "어묵",
            "액젓",
            "피시소스",
            "멸치액젓",
        ],
    ),
];

/// Expand a single avoided term into itself plus every member of each group it
/// belongs to. Unknown terms expand to themselves; blank terms to nothing.
#[must_use]
pub fn expand(term: &str) -> BTreeSet<String> {
    let term = term.trim().to_lowercase();
    let mut expanded = BTreeSet::new();
    if term.is_empty() {
        return expanded;
    }

    for group in DERIVATIVE_GROUPS.iter().filter(|g| g.contains(&term)) {
        expanded.extend(group.members().map(str::to_owned));
    }
    expanded.insert(term);
    expanded
}

/// Union of [`expand`] over every non-blank term
#[must_use]
pub fn expand_all<I, S>(terms: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .flat_map(|term| expand(term.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_term_is_singleton() {
        let expanded = expand("  Kale ");
        assert_eq!(expanded.len(), 1);
        assert!(expanded.contains("kale"));
    }

    #[test]
    fn test_derivative_expands_to_whole_group() {
        let expanded = expand("치즈");
        assert!(expanded.contains("우유"));
        assert!(expanded.contains("버터"));
        assert!(expanded.contains("생크림"));
        assert!(!expanded.contains("계란"));
    }

    #[test]
    fn test_member_of_two_groups_unions_both() {
        let expanded = expand("새우");
        assert!(expanded.contains("갑각류"));
        assert!(expanded.contains("게장"));
        assert!(expanded.contains("새우젓"));
    }

    #[test]
    fn test_expand_all_skips_blanks() {
        let expanded = expand_all(["", "   ", "땅콩"]);
        assert_eq!(expanded.len(), 4);
        assert!(!expanded.contains(""));
    }
}
