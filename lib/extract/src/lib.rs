//! # nutrimatch Extract
//!
//! Turns free-text dietary queries into structured [`ConstraintSet`]s.
//!
//! Three stages, each usable on its own:
//!
//! - [`extract_entities`] - closed-vocabulary lexical extraction
//! - [`EntityTagger`] - optional auxiliary tagging capability with a
//!   no-op implementation for injection at construction time
//! - [`consolidate`] - table-driven merge of both signals into one
//!   canonical constraint record
//!
//! ## Example
//!
//! ```rust
//! use nutrimatch_extract::EntityPipeline;
//!
//! let pipeline = EntityPipeline::default();
//! let outcome = pipeline.run("Keto Indian high protein, no fried, under 500 kcal");
//!
//! assert_eq!(outcome.entities.diet.as_deref(), Some("Keto"));
//! assert!(outcome.entities.cuisines.contains("Indian"));
//! assert_eq!(outcome.entities.calorie_limit, Some(500.0));
//! ```

pub mod consolidate;
pub mod extractor;
pub mod tagger;

pub use consolidate::consolidate;
pub use extractor::{extract_entities, EntityPipeline, ExtractionOutcome};
pub use tagger::{EntityTagger, HeuristicTagger, NoopTagger, TaggedPhrase};
