use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured representation of a user's dietary intent.
///
/// Every field is independently optional; an all-empty set matches
/// everything downstream (no filter fires).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(default)]
    pub cuisines: BTreeSet<String>,
    /// Single winner, not a set
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub flavors: BTreeSet<String>,
    #[serde(default)]
    pub methods_preferred: BTreeSet<String>,
    /// Derived from negation cues ("no fried")
    #[serde(default)]
    pub methods_avoided: BTreeSet<String>,
    #[serde(default)]
    pub protein_goal: Option<ProteinGoal>,
    /// Upper bound, kcal
    #[serde(default)]
    pub calorie_limit: Option<f32>,
}

impl ConstraintSet {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty()
            && self.diet.is_none()
            && self.flavors.is_empty()
            && self.methods_preferred.is_empty()
            && self.methods_avoided.is_empty()
            && self.protein_goal.is_none()
            && self.calorie_limit.is_none()
    }

    /// Numeric protein floor in grams, if a goal is set.
    #[inline]
    #[must_use]
    pub fn protein_threshold(&self) -> Option<f32> {
        self.protein_goal.as_ref().map(ProteinGoal::threshold_grams)
    }
}

/// Qualitative protein band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProteinBand {
    High,
    Medium,
    Low,
}

/// A protein goal - either a qualitative band or an explicit gram figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProteinGoal {
    Band(ProteinBand),
    Grams(u32),
}

impl ProteinGoal {
    /// Bucket the goal into a qualitative band.
    ///
    /// Gram figures map as >25g high, 15-25g inclusive medium, <15g low.
    #[must_use]
    pub fn band(&self) -> ProteinBand {
        match self {
            ProteinGoal::Band(band) => *band,
            ProteinGoal::Grams(g) => {
                if *g > 25 {
                    ProteinBand::High
                } else if *g >= 15 {
                    ProteinBand::Medium
                } else {
                    ProteinBand::Low
                }
            }
        }
    }

    /// Numeric filtering threshold in grams.
    #[must_use]
    pub fn threshold_grams(&self) -> f32 {
        match self {
            ProteinGoal::Band(ProteinBand::High) => 25.0,
            ProteinGoal::Band(ProteinBand::Medium) => 15.0,
            ProteinGoal::Band(ProteinBand::Low) => 0.0,
            ProteinGoal::Grams(g) => *g as f32,
        }
    }
}
