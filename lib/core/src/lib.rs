//! # nutrimatch Core
//!
//! Core library for the nutrimatch recipe engine.
//!
//! This crate provides the fundamental data structures and vocabularies:
//!
//! - [`ConstraintSet`] - Structured representation of a user's dietary intent
//! - [`RecipeRecord`] - A cached recipe row with its own tagged attributes
//! - [`RecipeStore`] - Append-only recipe collection with snapshot reads
//! - [`Vector`] - Dense vector representation with cosine similarity
//! - [`vocab`] - Closed vocabularies and numeric extraction patterns
//!
//! ## Example
//!
//! ```rust
//! use nutrimatch_core::{RecipeRecord, RecipeStore};
//!
//! let store = RecipeStore::new();
//! let recipe = RecipeRecord::new(1u64.into(), "Grilled Paneer Tikka")
//!     .with_calories(420.0)
//!     .with_region("Indian");
//! store.append(vec![recipe]);
//!
//! // Readers iterate a point-in-time snapshot
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.len(), 1);
//! ```

pub mod constraints;
pub mod error;
pub mod recipe;
pub mod store;
pub mod vector;
pub mod vocab;

pub use constraints::{ConstraintSet, ProteinBand, ProteinGoal};
pub use error::{Error, Result};
pub use recipe::{RecipeId, RecipeRecord};
pub use store::{RecipeStore, Snapshot};
pub use vector::Vector;
