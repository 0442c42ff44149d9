//! Text embedding capability.
//!
//! Embeddings are an optional signal: the matcher treats an unavailable
//! or malformed embedding as "semantic score 0" rather than an error.
//! The default implementation hashes character trigrams and words into
//! a fixed-size vector, which is deterministic (same input, same
//! output) and needs no model weights.

use nutrimatch_core::Vector;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Default embedding dimension
pub const DEFAULT_TEXT_DIM: usize = 64;

/// Capability interface for turning text into a fixed-dimension vector.
///
/// Substituted at construction time; implementations must be
/// deterministic and signal unavailability with `None` instead of
/// failing.
pub trait TextEmbedder: Send + Sync {
    /// Implementation name, for logging
    fn name(&self) -> &str;

    /// Embedding dimension
    fn dim(&self) -> usize;

    /// Embed one text. `None` means the signal is unavailable for this
    /// input.
    fn embed(&self, text: &str) -> Option<Vector>;
}

/// Hash-based embedder.
///
/// Trigrams are hashed to vector positions with weight 1, whole words
/// with weight 2, and the result is L2-normalized.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_DIM)
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Option<Vector> {
        if text.trim().is_empty() {
            return None;
        }

        let normalized = text.to_lowercase();
        let mut components = vec![0.0f32; self.dim];

        for trigram in generate_trigrams(&normalized) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            components[pos] += 1.0;
        }

        // Words contribute more than trigrams
        for word in normalized.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            components[pos] += 2.0;
        }

        let mut vector = Vector::new(components);
        vector.normalize();
        Some(vector)
    }
}

/// Embedder that never produces a vector; semantic scoring degrades to
/// zero everywhere
pub struct NoopEmbedder;

impl TextEmbedder for NoopEmbedder {
    fn name(&self) -> &str {
        "noop"
    }

    fn dim(&self) -> usize {
        0
    }

    fn embed(&self, _text: &str) -> Option<Vector> {
        None
    }
}

fn generate_trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return HashSet::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
