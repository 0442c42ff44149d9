//! # nutrimatch Ranking
//!
//! Ranks a cached recipe collection against a canonical constraint set.
//!
//! - [`TextEmbedder`] - deterministic embedding capability with a
//!   hash-based default and a no-op implementation
//! - [`filters`] - hard-filter predicates, shared with the plan builder
//! - [`RecipeMatcher`] - hybrid scorer combining lexical rule overlap
//!   with embedding cosine similarity
//!
//! ## Scoring
//!
//! Survivors of the hard filters are scored
//! `0.7 * semantic + 0.3 * min(rule / 15, 1.0)` where the rule score is
//! `5 * |cuisine ∩| + 3 * |flavor ∩| + 2 * |method ∩|` and the semantic
//! score is the cosine similarity between the query embedding and the
//! recipe embedding. Either signal degrades to zero when unavailable;
//! ranking never fails a request.

pub mod embedder;
pub mod filters;
pub mod matcher;

pub use embedder::{HashEmbedder, NoopEmbedder, TextEmbedder, DEFAULT_TEXT_DIM};
pub use matcher::{rule_score, MatchResult, RecipeMatcher, DEFAULT_TOP_K};
