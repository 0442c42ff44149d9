//! Auxiliary tagging capability.
//!
//! A tagger produces raw (phrase, label) pairs unconstrained by the fixed
//! vocabularies. The signal is best-effort: implementations return an
//! empty result instead of failing, so the lexical extraction path is
//! never affected by a missing or broken tagger.

use serde::Serialize;

/// A raw tagged phrase from an auxiliary tagger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedPhrase {
    pub phrase: String,
    pub label: String,
}

impl TaggedPhrase {
    #[must_use]
    pub fn new(phrase: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            label: label.into(),
        }
    }
}

/// Capability interface for general-purpose entity tagging.
///
/// Substituted at construction time so the pipeline is testable without
/// a real model and degrades cleanly when none is available.
pub trait EntityTagger: Send + Sync {
    /// Implementation name, for logging
    fn name(&self) -> &str;

    /// Tag the input text. Must not fail; errors collapse to an empty
    /// result set.
    fn tag(&self, text: &str) -> Vec<TaggedPhrase>;
}

/// Tagger that never produces output
pub struct NoopTagger;

impl EntityTagger for NoopTagger {
    fn name(&self) -> &str {
        "noop"
    }

    fn tag(&self, _text: &str) -> Vec<TaggedPhrase> {
        Vec::new()
    }
}

/// Heuristic tagger emitting runs of capitalized tokens as candidate
/// entity phrases ("Keto Indian curry" -> "Keto Indian").
pub struct HeuristicTagger;

impl HeuristicTagger {
    fn is_capitalized(token: &str) -> bool {
        token
            .chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(|c| c.is_uppercase())
    }
}

impl EntityTagger for HeuristicTagger {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn tag(&self, text: &str) -> Vec<TaggedPhrase> {
        let mut phrases = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for token in text.split_whitespace() {
            let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
            if !trimmed.is_empty() && Self::is_capitalized(trimmed) {
                run.push(trimmed);
            } else if !run.is_empty() {
                phrases.push(TaggedPhrase::new(run.join(" "), "TERM"));
                run.clear();
            }
        }
        if !run.is_empty() {
            phrases.push(TaggedPhrase::new(run.join(" "), "TERM"));
        }

        phrases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_tagger_is_empty() {
        assert!(NoopTagger.tag("Keto Indian dinner").is_empty());
    }

    #[test]
    fn test_heuristic_tagger_groups_capitalized_runs() {
        let tags = HeuristicTagger.tag("give me Keto Indian food, maybe Thai");
        let phrases: Vec<&str> = tags.iter().map(|t| t.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["Keto Indian", "Thai"]);
    }

    #[test]
    fn test_heuristic_tagger_strips_punctuation() {
        let tags = HeuristicTagger.tag("Mediterranean, under 500 kcal");
        assert_eq!(tags[0].phrase, "Mediterranean");
    }

    #[test]
    fn test_heuristic_tagger_empty_input() {
        assert!(HeuristicTagger.tag("").is_empty());
        assert!(HeuristicTagger.tag("all lowercase words").is_empty());
    }
}
