//! Hybrid recipe matching.
//!
//! Applies the hard-filter chain to every candidate, scores the
//! survivors with a blend of lexical rule overlap and embedding cosine
//! similarity, and returns the top-K in descending score order. The
//! sort is stable, so equal scores keep their input order.

use crate::embedder::TextEmbedder;
use crate::filters;
use nutrimatch_core::{ConstraintSet, RecipeId, RecipeRecord, Vector};
use serde::Serialize;
use std::sync::Arc;

/// Default result count
pub const DEFAULT_TOP_K: usize = 20;

/// Blend weights - fixed design constants
const SEMANTIC_WEIGHT: f32 = 0.7;
const RULE_WEIGHT: f32 = 0.3;

/// Rule score saturates here before blending
const RULE_SCORE_CAP: f32 = 15.0;

const CUISINE_MATCH_WEIGHT: f32 = 5.0;
const FLAVOR_MATCH_WEIGHT: f32 = 3.0;
const METHOD_MATCH_WEIGHT: f32 = 2.0;

/// One ranked recipe, projected for display
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub id: RecipeId,
    pub title: String,
    pub calories: Option<f32>,
    pub protein_g: Option<f32>,
    pub region: Option<String>,
    pub score: f32,
    /// The recipe's own tagged attributes
    pub matched_entities: ConstraintSet,
}

/// Lexical overlap between the user's constraints and a recipe's own
/// tagged attributes: 5 per shared cuisine, 3 per shared flavor, 2 per
/// shared preferred method.
#[must_use]
pub fn rule_score(user: &ConstraintSet, recipe: &ConstraintSet) -> f32 {
    let cuisine_hits = user.cuisines.intersection(&recipe.cuisines).count() as f32;
    let flavor_hits = user.flavors.intersection(&recipe.flavors).count() as f32;
    let method_hits = user
        .methods_preferred
        .intersection(&recipe.methods_preferred)
        .count() as f32;

    cuisine_hits * CUISINE_MATCH_WEIGHT
        + flavor_hits * FLAVOR_MATCH_WEIGHT
        + method_hits * METHOD_MATCH_WEIGHT
}

/// Hybrid matcher over an in-memory recipe pool.
pub struct RecipeMatcher {
    embedder: Arc<dyn TextEmbedder>,
}

impl RecipeMatcher {
    #[must_use]
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    /// Rank `recipes` against `constraints`.
    ///
    /// `query` feeds the semantic signal; with no query text (or no
    /// embedding available) the semantic component is zero for every
    /// candidate and ranking falls back to rule overlap. Returns an
    /// empty vec when nothing survives filtering - never an error.
    #[must_use]
    pub fn find_matching_recipes(
        &self,
        recipes: &[Arc<RecipeRecord>],
        constraints: &ConstraintSet,
        query: Option<&str>,
        top_k: usize,
    ) -> Vec<MatchResult> {
        let top_k = top_k.max(1);

        let query_embedding = query
            .filter(|q| !q.trim().is_empty())
            .and_then(|q| self.embedder.embed(q));

        let mut results: Vec<MatchResult> = recipes
            .iter()
            .filter(|recipe| filters::passes_hard_filters(recipe, constraints))
            .map(|recipe| {
                let rule = rule_score(constraints, &recipe.entities);
                let semantic = query_embedding
                    .as_ref()
                    .map_or(0.0, |q| self.semantic_score(q, recipe));
                let score =
                    SEMANTIC_WEIGHT * semantic + RULE_WEIGHT * (rule / RULE_SCORE_CAP).min(1.0);

                MatchResult {
                    id: recipe.id.clone(),
                    title: recipe.title.clone(),
                    calories: recipe.calories,
                    protein_g: recipe.protein_g,
                    region: recipe.region.clone(),
                    score,
                    matched_entities: recipe.entities.clone(),
                }
            })
            .collect();

        // Stable sort keeps input order for equal scores
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    /// Cosine similarity between the query embedding and the recipe's
    /// embedding (precomputed, else derived on demand from the title).
    /// Degrades to 0.0 when no recipe embedding can be produced; a
    /// dimension mismatch also scores 0.0.
    fn semantic_score(&self, query: &Vector, recipe: &RecipeRecord) -> f32 {
        if let Some(embedding) = &recipe.embedding {
            return query.cosine_similarity(embedding);
        }

        match self.embedder.embed(&recipe.title) {
            Some(embedding) => query.cosine_similarity(&embedding),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{HashEmbedder, NoopEmbedder};

    fn matcher() -> RecipeMatcher {
        RecipeMatcher::new(Arc::new(HashEmbedder::default()))
    }

    fn pool(recipes: Vec<RecipeRecord>) -> Vec<Arc<RecipeRecord>> {
        recipes.into_iter().map(Arc::new).collect()
    }

    fn tagged(title: &str, cuisines: &[&str], methods: &[&str]) -> RecipeRecord {
        let mut entities = ConstraintSet::default();
        entities.cuisines = cuisines.iter().map(|s| (*s).to_string()).collect();
        entities.methods_preferred = methods.iter().map(|s| (*s).to_string()).collect();
        RecipeRecord::new(RecipeId::String(title.to_string()), title).with_entities(entities)
    }

    #[test]
    fn test_empty_collection_returns_empty() {
        let results =
            matcher().find_matching_recipes(&[], &ConstraintSet::default(), Some("anything"), 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_calorie_ceiling_excludes_regardless_of_score() {
        let mut constraints = ConstraintSet::default();
        constraints.calorie_limit = Some(500.0);
        constraints.cuisines.insert("Indian".to_string());

        let recipes = pool(vec![
            tagged("Perfect match but heavy", &["Indian"], &[]).with_calories(700.0),
            tagged("Light", &[], &[]).with_calories(300.0),
            tagged("Unknown calories", &[], &[]),
        ]);

        let results = matcher().find_matching_recipes(&recipes, &constraints, None, 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.title != "Perfect match but heavy"));
    }

    #[test]
    fn test_avoided_methods_never_returned() {
        let mut constraints = ConstraintSet::default();
        constraints.methods_avoided.insert("Fried".to_string());

        let recipes = pool(vec![
            tagged("Fried thing", &[], &["Fried"]),
            tagged("Grilled thing", &[], &["Grilled"]),
        ]);

        let results = matcher().find_matching_recipes(&recipes, &constraints, None, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Grilled thing");
    }

    #[test]
    fn test_rule_score_weights() {
        let mut user = ConstraintSet::default();
        user.cuisines.insert("Indian".to_string());
        user.flavors.insert("Spicy".to_string());
        user.methods_preferred.insert("Grilled".to_string());

        let mut recipe = ConstraintSet::default();
        recipe.cuisines.insert("Indian".to_string());
        recipe.flavors.insert("Spicy".to_string());
        recipe.methods_preferred.insert("Grilled".to_string());

        assert_eq!(rule_score(&user, &recipe), 10.0);
        assert_eq!(rule_score(&user, &ConstraintSet::default()), 0.0);
    }

    #[test]
    fn test_rule_overlap_orders_results_without_semantic_signal() {
        let no_semantic = RecipeMatcher::new(Arc::new(NoopEmbedder));

        let mut constraints = ConstraintSet::default();
        constraints.cuisines.insert("Indian".to_string());
        constraints.flavors.insert("Spicy".to_string());

        let recipes = pool(vec![
            tagged("Plain", &[], &[]),
            tagged("Cuisine only", &["Indian"], &[]),
            tagged("Cuisine and flavor", &["Indian"], &[]).with_entities({
                let mut e = ConstraintSet::default();
                e.cuisines.insert("Indian".to_string());
                e.flavors.insert("Spicy".to_string());
                e
            }),
        ]);

        let results = no_semantic.find_matching_recipes(&recipes, &constraints, Some("query"), 10);
        assert_eq!(results[0].title, "Cuisine and flavor");
        assert_eq!(results[1].title, "Cuisine only");
        assert_eq!(results[2].title, "Plain");
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let no_semantic = RecipeMatcher::new(Arc::new(NoopEmbedder));

        let recipes = pool(vec![
            tagged("First", &[], &[]),
            tagged("Second", &[], &[]),
            tagged("Third", &[], &[]),
        ]);

        let results =
            no_semantic.find_matching_recipes(&recipes, &ConstraintSet::default(), None, 10);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_top_k_floor_and_truncation() {
        let recipes = pool((0..30).map(|i| tagged(&format!("R{}", i), &[], &[])).collect());

        let one = matcher().find_matching_recipes(&recipes, &ConstraintSet::default(), None, 0);
        assert_eq!(one.len(), 1);

        let five = matcher().find_matching_recipes(&recipes, &ConstraintSet::default(), None, 5);
        assert_eq!(five.len(), 5);
    }

    #[test]
    fn test_tightening_calorie_limit_is_monotone() {
        let recipes = pool(
            (0..10)
                .map(|i| tagged(&format!("R{}", i), &[], &[]).with_calories(100.0 * i as f32))
                .collect(),
        );

        let survivors = |limit: f32| {
            let mut c = ConstraintSet::default();
            c.calorie_limit = Some(limit);
            matcher()
                .find_matching_recipes(&recipes, &c, None, 100)
                .len()
        };

        assert!(survivors(400.0) <= survivors(800.0));
        assert!(survivors(100.0) <= survivors(400.0));
    }

    #[test]
    fn test_semantic_signal_prefers_title_match() {
        let mut with_title_overlap = tagged("grilled chicken salad", &[], &[]);
        let mut unrelated = tagged("chocolate fudge cake", &[], &[]);
        // Precomputed embeddings, as the ingest path provides them
        let embedder = HashEmbedder::default();
        with_title_overlap.embedding = embedder.embed(&with_title_overlap.title);
        unrelated.embedding = embedder.embed(&unrelated.title);

        let recipes = pool(vec![unrelated, with_title_overlap]);
        let results = matcher().find_matching_recipes(
            &recipes,
            &ConstraintSet::default(),
            Some("grilled chicken"),
            10,
        );

        assert_eq!(results[0].title, "grilled chicken salad");
    }

    #[test]
    fn test_malformed_embedding_degrades_to_zero() {
        // Stored embedding with a dimension that cannot match the query
        let mut broken = tagged("broken embedding", &[], &[]);
        broken.embedding = Some(nutrimatch_core::Vector::new(vec![1.0, 2.0]));

        let recipes = pool(vec![broken]);
        let results = matcher().find_matching_recipes(
            &recipes,
            &ConstraintSet::default(),
            Some("some query"),
            10,
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.0);
    }
}
