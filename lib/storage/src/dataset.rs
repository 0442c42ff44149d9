//! CSV dataset ingestion.
//!
//! Rows may carry a pre-tagged entity JSON column; when it parses it is
//! used as-is, otherwise the entities are recomputed from the row text
//! and the malformed payload is logged and skipped. A bad row never
//! aborts the batch.

use nutrimatch_core::{ConstraintSet, Error, RecipeId, RecipeRecord, Result};
use nutrimatch_extract::extract_entities;
use nutrimatch_ranking::TextEmbedder;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawRecipeRow {
    #[serde(rename = "Recipe_id", default)]
    recipe_id: Option<String>,
    #[serde(rename = "Recipe_title", default)]
    recipe_title: Option<String>,
    #[serde(rename = "Region", default)]
    region: Option<String>,
    #[serde(rename = "Sub_region", default)]
    sub_region: Option<String>,
    #[serde(rename = "Calories", default)]
    calories: Option<String>,
    #[serde(rename = "Protein (g)", default)]
    protein_g: Option<String>,
    #[serde(rename = "Processes", default)]
    processes: Option<String>,
    #[serde(rename = "total_time", default)]
    total_time: Option<String>,
    #[serde(rename = "ingredients", default)]
    ingredients: Option<String>,
    #[serde(rename = "instructions", default)]
    instructions: Option<String>,
    #[serde(rename = "NER_ENTITIES", default)]
    entities_json: Option<String>,
}

fn parse_f32(value: Option<&str>) -> Option<f32> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|v| v.is_finite())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn row_id(raw: Option<String>) -> RecipeId {
    match non_empty(raw) {
        Some(id) => match id.parse::<u64>() {
            Ok(n) => RecipeId::Integer(n),
            Err(_) => RecipeId::String(id),
        },
        None => RecipeId::random(),
    }
}

fn convert_row(row: RawRecipeRow, embedder: &dyn TextEmbedder) -> Option<RecipeRecord> {
    let title = non_empty(row.recipe_title)?;

    let mut record = RecipeRecord::new(row_id(row.recipe_id), title);
    record.calories = parse_f32(row.calories.as_deref());
    record.protein_g = parse_f32(row.protein_g.as_deref());
    record.total_time_min = parse_f32(row.total_time.as_deref());
    record.region = non_empty(row.region);
    record.sub_region = non_empty(row.sub_region);
    record.processes = non_empty(row.processes);
    record.ingredients = non_empty(row.ingredients);
    record.instructions = non_empty(row.instructions);

    record.entities = match non_empty(row.entities_json) {
        Some(json) => match serde_json::from_str::<ConstraintSet>(&json) {
            Ok(entities) => entities,
            Err(e) => {
                warn!(
                    "recipe {}: unparsable stored entities ({}), recomputing",
                    record.id, e
                );
                extract_entities(&record.attribute_text())
            }
        },
        None => extract_entities(&record.attribute_text()),
    };

    record.embedding = embedder.embed(&record.title);

    Some(record)
}

/// Load and enrich a recipe dataset from a CSV file.
///
/// Undecodable rows are logged and skipped; only an unreadable file is
/// an error.
pub fn load_dataset(path: &Path, embedder: &dyn TextEmbedder) -> Result<Vec<RecipeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Dataset(e.to_string()))?;

    let mut recipes = Vec::new();
    for (index, result) in reader.deserialize::<RawRecipeRow>().enumerate() {
        match result {
            Ok(row) => {
                if let Some(record) = convert_row(row, embedder) {
                    recipes.push(record);
                } else {
                    warn!("dataset row {}: missing title, skipped", index + 1);
                }
            }
            Err(e) => warn!("dataset row {}: {}, skipped", index + 1, e),
        }
    }

    Ok(recipes)
}
