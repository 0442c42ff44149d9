//! Multi-signal entity consolidation.
//!
//! Merges the lexical extraction with vocabulary hits recovered from
//! auxiliary tagger phrases. The merge behavior of every constraint
//! field is declared as data in [`MERGE_TABLE`] and applied by one
//! generic routine, so adding a field means adding a table row rather
//! than another branch.

use crate::tagger::TaggedPhrase;
use nutrimatch_core::vocab::{
    self, SUPPORTED_CUISINES, SUPPORTED_DIETS, SUPPORTED_FLAVORS, SUPPORTED_METHODS,
};
use nutrimatch_core::ConstraintSet;
use std::collections::BTreeSet;

/// Constraint fields addressed by the merge table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Cuisines,
    Flavors,
    MethodsPreferred,
    Diet,
    MethodsAvoided,
    ProteinGoal,
    CalorieLimit,
}

/// Per-field merge behavior
#[derive(Debug, Clone, Copy)]
enum MergeStrategy {
    /// Union of lexical and tagger-derived sets, deduplicated
    UnionSets,
    /// Most frequent value across sources, ties broken by first-seen
    MostFrequentScalar,
    /// Deterministic re-extraction from the raw text, ignoring both
    /// candidate sources
    RecomputeFromText,
}

const MERGE_TABLE: &[(Field, MergeStrategy)] = &[
    (Field::Cuisines, MergeStrategy::UnionSets),
    (Field::Flavors, MergeStrategy::UnionSets),
    (Field::MethodsPreferred, MergeStrategy::UnionSets),
    (Field::Diet, MergeStrategy::MostFrequentScalar),
    (Field::MethodsAvoided, MergeStrategy::RecomputeFromText),
    (Field::ProteinGoal, MergeStrategy::RecomputeFromText),
    (Field::CalorieLimit, MergeStrategy::RecomputeFromText),
];

/// Vocabulary hits recovered from tagger phrases
#[derive(Debug, Default)]
struct TagScan {
    cuisines: BTreeSet<String>,
    /// First-seen order preserved for diet vote tie-breaking
    diets: Vec<String>,
    flavors: BTreeSet<String>,
    methods: BTreeSet<String>,
}

fn scan_tagged_phrases(tagged: &[TaggedPhrase]) -> TagScan {
    let mut scan = TagScan::default();

    for tag in tagged {
        let lower = tag.phrase.to_lowercase();
        scan.cuisines.extend(
            vocab::all_matches(&lower, SUPPORTED_CUISINES)
                .into_iter()
                .map(str::to_string),
        );
        scan.flavors.extend(
            vocab::all_matches(&lower, SUPPORTED_FLAVORS)
                .into_iter()
                .map(str::to_string),
        );
        scan.methods.extend(
            vocab::all_matches(&lower, SUPPORTED_METHODS)
                .into_iter()
                .map(str::to_string),
        );
        for diet in vocab::all_matches(&lower, SUPPORTED_DIETS) {
            if !scan.diets.iter().any(|d| d == diet) {
                scan.diets.push(diet.to_string());
            }
        }
    }

    scan
}

/// Most frequent vote, ties broken by the earliest first occurrence.
fn most_frequent_first_seen(votes: impl Iterator<Item = String>) -> Option<String> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for vote in votes {
        match tally.iter_mut().find(|(value, _)| *value == vote) {
            Some(entry) => entry.1 += 1,
            None => tally.push((vote, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (value, count) in tally {
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Merge the lexical extraction and the auxiliary tagger output into
/// one canonical constraint record.
///
/// Absence of either signal source is fine: with no tagger output the
/// result equals the lexical record (numeric fields re-derived from the
/// raw text). Never fails.
#[must_use]
pub fn consolidate(
    lexical: &ConstraintSet,
    tagged: &[TaggedPhrase],
    raw_text: &str,
) -> ConstraintSet {
    let scanned = scan_tagged_phrases(tagged);
    let mut merged = ConstraintSet::default();

    for (field, strategy) in MERGE_TABLE {
        apply_strategy(&mut merged, *field, *strategy, lexical, &scanned, raw_text);
    }

    merged
}

fn apply_strategy(
    merged: &mut ConstraintSet,
    field: Field,
    strategy: MergeStrategy,
    lexical: &ConstraintSet,
    scanned: &TagScan,
    raw_text: &str,
) {
    match strategy {
        MergeStrategy::UnionSets => {
            let (from_lexical, from_tags) = match field {
                Field::Cuisines => (&lexical.cuisines, &scanned.cuisines),
                Field::Flavors => (&lexical.flavors, &scanned.flavors),
                Field::MethodsPreferred => (&lexical.methods_preferred, &scanned.methods),
                _ => return,
            };
            let target = match field {
                Field::Cuisines => &mut merged.cuisines,
                Field::Flavors => &mut merged.flavors,
                Field::MethodsPreferred => &mut merged.methods_preferred,
                _ => return,
            };
            target.extend(from_lexical.iter().cloned());
            target.extend(from_tags.iter().cloned());
        }
        MergeStrategy::MostFrequentScalar => {
            // Lexical vote first so it wins first-seen ties
            let votes = lexical
                .diet
                .iter()
                .cloned()
                .chain(scanned.diets.iter().cloned());
            merged.diet = most_frequent_first_seen(votes);
        }
        MergeStrategy::RecomputeFromText => match field {
            Field::MethodsAvoided => {
                merged.methods_avoided = vocab::extract_avoided_methods(raw_text);
            }
            Field::ProteinGoal => merged.protein_goal = vocab::extract_protein_goal(raw_text),
            Field::CalorieLimit => merged.calorie_limit = vocab::extract_calorie_limit(raw_text),
            _ => {}
        },
    }
}
