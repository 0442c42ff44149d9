//! # nutrimatch
//!
//! A dietary-intent extraction and recipe ranking engine.
//!
//! nutrimatch turns free-text queries into structured dietary
//! constraints, ranks a cached recipe collection against them with a
//! hybrid lexical/semantic score, and composes weekly meal plans from
//! the ranked pool.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install nutrimatch
//! nutrimatch --http-port 8080 --dataset recipes.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use nutrimatch::prelude::*;
//! use std::sync::Arc;
//!
//! // Extract structured constraints from free text
//! let pipeline = EntityPipeline::default();
//! let outcome = pipeline.run("Keto Indian high protein, no fried, under 500 kcal");
//! assert_eq!(outcome.entities.diet.as_deref(), Some("Keto"));
//!
//! // Rank a recipe pool against them
//! let store = RecipeStore::new();
//! store.append(vec![
//!     RecipeRecord::new(1u64.into(), "Tandoori Paneer").with_calories(420.0),
//! ]);
//!
//! let matcher = RecipeMatcher::new(Arc::new(HashEmbedder::default()));
//! let results = matcher.find_matching_recipes(
//!     &store.snapshot(),
//!     &outcome.entities,
//!     Some("tandoori paneer"),
//!     10,
//! );
//! assert_eq!(results.len(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! nutrimatch is composed of several crates:
//!
//! - [`nutrimatch-core`](https://docs.rs/nutrimatch-core) - Vocabularies, constraint sets, recipe records, append-only store
//! - [`nutrimatch-extract`](https://docs.rs/nutrimatch-extract) - Lexical extraction, auxiliary tagging, consolidation
//! - [`nutrimatch-ranking`](https://docs.rs/nutrimatch-ranking) - Hard filters and hybrid scoring
//! - [`nutrimatch-plan`](https://docs.rs/nutrimatch-plan) - Weekly plan builder
//! - [`nutrimatch-storage`](https://docs.rs/nutrimatch-storage) - Cache persistence, CSV loading, upstream fetch
//! - [`nutrimatch-api`](https://docs.rs/nutrimatch-api) - REST API
//!
//! ## Features
//!
//! - **Closed-vocabulary extraction**: deterministic, never fails, no model weights
//! - **Multi-signal consolidation**: per-field merge strategies with voting
//! - **Hybrid ranking**: hard filters, lexical rule score, embedding cosine similarity
//! - **Progressive relaxation**: weekly plans degrade filters instead of failing
//! - **Append-only store**: lock-free snapshot reads during refresh

// Re-export core types
pub use nutrimatch_core::{
    ConstraintSet, ProteinBand, ProteinGoal,
    RecipeId, RecipeRecord, RecipeStore, Snapshot,
    Vector, Error, Result,
};

// Re-export extraction
pub use nutrimatch_extract::{
    consolidate, extract_entities,
    EntityPipeline, EntityTagger, ExtractionOutcome,
    HeuristicTagger, NoopTagger, TaggedPhrase,
};

// Re-export ranking
pub use nutrimatch_ranking::{
    HashEmbedder, MatchResult, NoopEmbedder, RecipeMatcher, TextEmbedder,
    DEFAULT_TOP_K,
};

// Re-export planning
pub use nutrimatch_plan::{
    generate_weekly_plan, MealSlot, MealsPerDay, PlanRequest, WeeklyPlan,
};

// Re-export storage
pub use nutrimatch_storage::{load_dataset, FetchConfig, RecipeFetcher, RecipeRepository};

// Re-export API
pub use nutrimatch_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConstraintSet, ProteinBand, ProteinGoal,
        RecipeId, RecipeRecord, RecipeStore, Snapshot,
        Vector, Error, Result,
        consolidate, extract_entities,
        EntityPipeline, EntityTagger, ExtractionOutcome,
        HeuristicTagger, NoopTagger, TaggedPhrase,
        HashEmbedder, MatchResult, NoopEmbedder, RecipeMatcher, TextEmbedder,
        DEFAULT_TOP_K,
        generate_weekly_plan, MealSlot, MealsPerDay, PlanRequest, WeeklyPlan,
        load_dataset, FetchConfig, RecipeFetcher, RecipeRepository,
        AppState, RestApi,
    };
}
