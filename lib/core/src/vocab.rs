//! Closed vocabularies and numeric extraction patterns.
//!
//! All entity recognition in nutrimatch is substring containment of these
//! fixed terms against lower-cased input, plus a handful of numeric
//! patterns for calorie ceilings and protein goals. Multiple vocabulary
//! hits are all returned; there is no early exit.

use crate::constraints::{ProteinBand, ProteinGoal};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Cuisines recognized by the upstream recipe database
pub const SUPPORTED_CUISINES: &[&str] = &[
    "Mexican",
    "Indian",
    "Italian",
    "Chinese",
    "Thai",
    "Mediterranean",
    "American",
    "Japanese",
    "Middle Eastern",
    "African",
    "Egyptian",
    "Northern Africa",
    "Rest Africa",
];

/// Dietary regimes; a query resolves to at most one of these
pub const SUPPORTED_DIETS: &[&str] = &[
    "Keto",
    "Vegan",
    "Paleo",
    "Gluten-free",
    "Low-carb",
    "Vegetarian",
];

pub const SUPPORTED_FLAVORS: &[&str] = &[
    "Spicy", "Sweet", "Savory", "Tangy", "Smoky", "Garlic", "Peppery", "Salty", "Bitter", "Umami",
];

pub const SUPPORTED_METHODS: &[&str] = &[
    "Grilled",
    "Baked",
    "Roasted",
    "Steamed",
    "Boiled",
    "Stir-fry",
    "Sautéed",
    "Slow-cooked",
    "Simmered",
    "Air-fried",
    "Heat",
    "Cook",
    "Fry",
    "Blend",
    "Mix",
    "Poach",
    "Broil",
];

/// Methods excluded when the query carries a frying negation cue
pub const FRIED_AVOID_TERMS: &[&str] = &["Fried", "Deep-fried"];

const FRIED_NEGATION_CUES: &[&str] = &["no fried", "avoid fried"];

/// Keywords marking a recipe as non-vegetarian when present in its
/// title or ingredient list
pub const NON_VEG_KEYWORDS: &[&str] = &[
    "chicken", "beef", "mutton", "pork", "lamb", "goat", "fish", "salmon", "tuna", "shrimp",
    "prawn", "egg", "bacon", "ham", "sausage", "kebab", "meat", "steak", "duck", "turkey", "crab",
    "lobster", "squid",
];

// "under 500 kcal", "below 500 calories", "less than 500"
static CALORIE_CEILING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:under|below|less than|<=)\s*(\d+)\s*(?:kcal|cal|calories)?")
        .expect("hard-coded pattern compiles")
});

// "1800 calories per day", "1800 kcal daily"
static CALORIE_DAILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:kcal|cal|calories)\s*(?:per day|daily|a day)")
        .expect("hard-coded pattern compiles")
});

// "40g protein", "40 g protein"
static PROTEIN_GRAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*g\s*protein").expect("hard-coded pattern compiles"));

/// All vocabulary terms contained in the (lower-cased) input.
///
/// Returned in vocabulary order, which downstream callers rely on for
/// deterministic tie-breaking.
#[must_use]
pub fn all_matches(text_lower: &str, vocabulary: &'static [&'static str]) -> Vec<&'static str> {
    vocabulary
        .iter()
        .filter(|term| text_lower.contains(&term.to_lowercase()))
        .copied()
        .collect()
}

/// First vocabulary term contained in the (lower-cased) input, in
/// vocabulary iteration order.
#[must_use]
pub fn first_match(text_lower: &str, vocabulary: &'static [&'static str]) -> Option<&'static str> {
    vocabulary
        .iter()
        .find(|term| text_lower.contains(&term.to_lowercase()))
        .copied()
}

/// Extract an upper calorie bound from free text.
pub fn extract_calorie_limit(text: &str) -> Option<f32> {
    let lower = text.to_lowercase();

    if let Some(caps) = CALORIE_CEILING_RE.captures(&lower) {
        if let Ok(limit) = caps[1].parse::<u32>() {
            return Some(limit as f32);
        }
    }

    if let Some(caps) = CALORIE_DAILY_RE.captures(&lower) {
        if let Ok(limit) = caps[1].parse::<u32>() {
            return Some(limit as f32);
        }
    }

    None
}

/// Extract a protein goal from free text.
///
/// Explicit gram quantities win over qualitative bands when both could
/// apply ("30g protein, high protein" resolves to 30g).
pub fn extract_protein_goal(text: &str) -> Option<ProteinGoal> {
    let lower = text.to_lowercase();

    if let Some(caps) = PROTEIN_GRAMS_RE.captures(&lower) {
        if let Ok(grams) = caps[1].parse::<u32>() {
            return Some(ProteinGoal::Grams(grams));
        }
    }

    if lower.contains("high protein") || lower.contains("high-protein") {
        return Some(ProteinGoal::Band(ProteinBand::High));
    }
    if lower.contains("low protein") {
        return Some(ProteinGoal::Band(ProteinBand::Low));
    }
    if lower.contains("medium protein") {
        return Some(ProteinGoal::Band(ProteinBand::Medium));
    }

    None
}

/// Avoided cooking methods derived from negation cues.
///
/// The result is either empty or the fixed frying pair; no other
/// negations are recognized.
#[must_use]
pub fn extract_avoided_methods(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let mut avoided = BTreeSet::new();

    if FRIED_NEGATION_CUES.iter().any(|cue| lower.contains(cue)) {
        for term in FRIED_AVOID_TERMS {
            avoided.insert((*term).to_string());
        }
    }

    avoided
}

/// Check whether text mentions any non-vegetarian keyword.
#[must_use]
pub fn mentions_non_veg(text: &str) -> bool {
    let lower = text.to_lowercase();
    NON_VEG_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
