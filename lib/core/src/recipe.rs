use crate::constraints::ConstraintSet;
use crate::vector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recipe identifier - upstream rows carry integers or strings, rows
/// without one get a generated UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    String(String),
    Integer(u64),
    Uuid(Uuid),
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeId::String(s) => write!(f, "{}", s),
            RecipeId::Integer(i) => write!(f, "{}", i),
            RecipeId::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        RecipeId::String(s)
    }
}

impl From<u64> for RecipeId {
    fn from(i: u64) -> Self {
        RecipeId::Integer(i)
    }
}

impl From<Uuid> for RecipeId {
    fn from(u: Uuid) -> Self {
        RecipeId::Uuid(u)
    }
}

impl RecipeId {
    /// Fresh random identifier for rows that arrive without one
    #[must_use]
    pub fn random() -> Self {
        RecipeId::Uuid(Uuid::new_v4())
    }
}

/// A cached recipe row.
///
/// Numeric fields are `None` when the source value is missing or
/// non-finite, never coerced to zero - filters treat unknown values
/// permissively. Records are immutable once appended to a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub calories: Option<f32>,
    #[serde(default)]
    pub protein_g: Option<f32>,
    #[serde(default)]
    pub total_time_min: Option<f32>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sub_region: Option<String>,
    /// Raw cooking-process text from upstream
    #[serde(default)]
    pub processes: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    /// The recipe's own lexical attributes
    #[serde(default)]
    pub entities: ConstraintSet,
    /// Precomputed title embedding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vector>,
}

fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

impl RecipeRecord {
    #[must_use]
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            calories: None,
            protein_g: None,
            total_time_min: None,
            region: None,
            sub_region: None,
            processes: None,
            ingredients: None,
            instructions: None,
            entities: ConstraintSet::default(),
            embedding: None,
        }
    }

    #[must_use]
    pub fn with_calories(mut self, calories: f32) -> Self {
        self.calories = finite(calories);
        self
    }

    #[must_use]
    pub fn with_protein(mut self, protein_g: f32) -> Self {
        self.protein_g = finite(protein_g);
        self
    }

    #[must_use]
    pub fn with_total_time(mut self, minutes: f32) -> Self {
        self.total_time_min = finite(minutes);
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_sub_region(mut self, sub_region: impl Into<String>) -> Self {
        self.sub_region = Some(sub_region.into());
        self
    }

    #[must_use]
    pub fn with_processes(mut self, processes: impl Into<String>) -> Self {
        self.processes = Some(processes.into());
        self
    }

    #[must_use]
    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    #[must_use]
    pub fn with_entities(mut self, entities: ConstraintSet) -> Self {
        self.entities = entities;
        self
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Text the recipe's own entities are derived from.
    #[must_use]
    pub fn attribute_text(&self) -> String {
        let mut parts = vec![self.title.as_str()];
        if let Some(region) = &self.region {
            parts.push(region);
        }
        if let Some(processes) = &self.processes {
            parts.push(processes);
        }
        parts.join(" ")
    }

    /// Text scanned for the vegetarian check (title + ingredients).
    #[must_use]
    pub fn dietary_text(&self) -> String {
        match &self.ingredients {
            Some(ingredients) => format!("{} {}", self.title, ingredients),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_values_become_unknown() {
        let recipe = RecipeRecord::new(1u64.into(), "Test")
            .with_calories(f32::NAN)
            .with_protein(f32::INFINITY)
            .with_total_time(30.0);

        assert_eq!(recipe.calories, None);
        assert_eq!(recipe.protein_g, None);
        assert_eq!(recipe.total_time_min, Some(30.0));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(RecipeId::from(42u64).to_string(), "42");
        assert_eq!(RecipeId::from("r-1".to_string()).to_string(), "r-1");
    }

    #[test]
    fn test_attribute_text_joins_known_fields() {
        let recipe = RecipeRecord::new(1u64.into(), "Tandoori Paneer")
            .with_region("Indian")
            .with_processes("grilled marinated");
        assert_eq!(recipe.attribute_text(), "Tandoori Paneer Indian grilled marinated");

        let bare = RecipeRecord::new(2u64.into(), "Plain Rice");
        assert_eq!(bare.attribute_text(), "Plain Rice");
    }
}
