//! Rule-based entity extraction.

use crate::consolidate::consolidate;
use crate::tagger::{EntityTagger, HeuristicTagger, TaggedPhrase};
use nutrimatch_core::vocab::{
    self, SUPPORTED_CUISINES, SUPPORTED_DIETS, SUPPORTED_FLAVORS, SUPPORTED_METHODS,
};
use nutrimatch_core::ConstraintSet;
use serde::Serialize;
use std::sync::Arc;

/// Extract a constraint set from free text using vocabulary and pattern
/// matching alone.
///
/// List-valued fields collect every vocabulary term contained in the
/// text; the single-valued diet takes the first hit in vocabulary
/// iteration order. Empty or whitespace input yields an all-empty
/// record. Never fails.
#[must_use]
pub fn extract_entities(text: &str) -> ConstraintSet {
    if text.trim().is_empty() {
        return ConstraintSet::default();
    }

    let lower = text.to_lowercase();

    ConstraintSet {
        cuisines: vocab::all_matches(&lower, SUPPORTED_CUISINES)
            .into_iter()
            .map(str::to_string)
            .collect(),
        diet: vocab::first_match(&lower, SUPPORTED_DIETS).map(str::to_string),
        flavors: vocab::all_matches(&lower, SUPPORTED_FLAVORS)
            .into_iter()
            .map(str::to_string)
            .collect(),
        methods_preferred: vocab::all_matches(&lower, SUPPORTED_METHODS)
            .into_iter()
            .map(str::to_string)
            .collect(),
        methods_avoided: vocab::extract_avoided_methods(text),
        protein_goal: vocab::extract_protein_goal(text),
        calorie_limit: vocab::extract_calorie_limit(text),
    }
}

/// Everything the pipeline produced for one query, kept around so the
/// serving layer can display the raw sub-results next to the canonical
/// record.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// Lexical extraction on its own
    pub lexical: ConstraintSet,
    /// Raw auxiliary tagger output
    pub tagged: Vec<TaggedPhrase>,
    /// Canonical consolidated constraints
    pub entities: ConstraintSet,
}

/// Full extraction pipeline: lexical pass, auxiliary tagging,
/// consolidation.
pub struct EntityPipeline {
    tagger: Arc<dyn EntityTagger>,
}

impl EntityPipeline {
    #[must_use]
    pub fn new(tagger: Arc<dyn EntityTagger>) -> Self {
        Self { tagger }
    }

    /// Name of the configured tagger, for logging
    #[must_use]
    pub fn tagger_name(&self) -> &str {
        self.tagger.name()
    }

    /// Run the full pipeline over one query.
    #[must_use]
    pub fn run(&self, text: &str) -> ExtractionOutcome {
        let lexical = extract_entities(text);
        let tagged = self.tagger.tag(text);
        let entities = consolidate(&lexical, &tagged, text);

        ExtractionOutcome {
            lexical,
            tagged,
            entities,
        }
    }
}

impl Default for EntityPipeline {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicTagger))
    }
}
