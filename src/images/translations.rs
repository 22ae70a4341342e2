// ABOUTME: Korean dish name to English search phrase dictionary
// ABOUTME: Improves image search hit rates for Korean recipe titles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Ordered so that substring matching prefers the earlier, more specific dish
const KOREAN_FOOD_TRANSLATIONS: &[(&str, &str)] = &[
    // Rice and noodles
    ("김치볶음밥", "kimchi fried rice korean food"),
    ("볶음밥", "fried rice korean"),
    ("비빔밥", "bibimbap mixed rice bowl korean"),
    ("덮밥", "rice bowl donburi korean"),
    ("김밥", "gimbap kimbap korean sushi roll"),
    ("주먹밥", "jumeokbap rice ball korean"),
    ("잡채", "japchae glass noodles korean"),
    ("라면", "ramyeon korean instant noodles"),
    ("칼국수", "kalguksu knife-cut noodles korean"),
    ("냉면", "naengmyeon cold noodles korean"),
    ("비빔국수", "bibim guksu spicy noodles korean"),
    // Stews and soups
    ("된장찌개", "doenjang jjigae soybean paste stew korean"),
    ("김치찌개", "kimchi jjigae stew korean"),
    ("순두부찌개", "sundubu jjigae soft tofu stew korean"),
    ("부대찌개", "budae jjigae army stew korean"),
    ("된장국", "doenjang guk soybean paste soup korean"),
    ("미역국", "miyeok guk seaweed soup korean"),
    ("계란국", "gyeran guk egg soup korean"),
    ("콩나물국", "kongnamul guk bean sprout soup korean"),
    // Meat
    ("불고기", "bulgogi korean bbq beef marinated"),
    ("제육볶음", "jeyuk bokkeum spicy pork stir-fry korean"),
    ("닭볶음탕", "dak bokkeum tang spicy chicken stew korean"),
    ("삼겹살", "samgyeopsal pork belly korean bbq"),
    ("갈비", "galbi korean bbq ribs"),
    ("닭갈비", "dak galbi spicy chicken ribs korean"),
    ("돼지갈비", "dwaeji galbi pork ribs korean"),
    // Eggs
    ("계란말이", "gyeran mari egg roll korean"),
    ("계란찜", "gyeran jjim steamed egg korean"),
    ("계란후라이", "fried egg korean"),
    ("스크램블", "scrambled eggs"),
    // Side dishes
    ("김치", "kimchi korean fermented cabbage"),
    ("나물", "namul seasoned vegetables korean"),
    ("시금치나물", "sigeumchi namul spinach korean"),
    ("콩나물무침", "kongnamul muchim bean sprout korean"),
    ("무생채", "mu saengchae radish salad korean"),
    // Pancakes
    ("김치전", "kimchi jeon pancake korean"),
    ("파전", "pajeon green onion pancake korean"),
    ("해물파전", "haemul pajeon seafood pancake korean"),
    ("감자전", "gamja jeon potato pancake korean"),
    // Other
    ("떡볶이", "tteokbokki spicy rice cakes korean"),
    ("순대", "sundae korean blood sausage"),
    ("어묵", "eomuk fish cake korean"),
    ("만두", "mandu korean dumplings"),
    ("떡국", "tteokguk rice cake soup korean"),
    ("삼계탕", "samgyetang ginseng chicken soup korean"),
];

/// English phrase for a title: exact dish match first, then the first dish
/// the title contains
#[must_use]
pub fn english_phrase(title: &str) -> Option<&'static str> {
    let title = title.trim();
    KOREAN_FOOD_TRANSLATIONS
        .iter()
        .find(|(korean, _)| *korean == title)
        .or_else(|| {
            KOREAN_FOOD_TRANSLATIONS
                .iter()
                .find(|(korean, _)| title.contains(korean))
        })
        .map(|(_, english)| *english)
}

/// Korean title plus English context words
#[must_use]
pub fn enhanced_query(title: &str) -> String {
    let title = title.trim();
    english_phrase(title).map_or_else(
        || format!("{title} korean food dish"),
        |english| format!("{title} {english}"),
    )
}

/// English-only query, used when the enhanced query finds nothing
#[must_use]
pub fn english_query(title: &str) -> String {
    let title = title.trim();
    english_phrase(title).map_or_else(|| format!("{title} food"), str::to_owned)
}
