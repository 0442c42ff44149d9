//! Paginated upstream recipe fetch.
//!
//! Pulls recipe rows page by page from the upstream API, stopping at
//! the first empty page, error status or transport failure - whatever
//! was fetched so far is kept. Rows are enriched (entities + title
//! embedding) before they reach the store.

use nutrimatch_core::{Error, RecipeId, RecipeRecord, Result};
use nutrimatch_extract::extract_entities;
use nutrimatch_ranking::TextEmbedder;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const RECIPES_ENDPOINT: &str = "/recipe/recipesinfo";

/// Upstream connection settings
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_pages: u32,
    pub page_size: u32,
}

impl FetchConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            max_pages: 10,
            page_size: 50,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Deserialize)]
struct FetchEnvelope {
    #[serde(default)]
    payload: Option<FetchPayload>,
}

#[derive(Debug, Deserialize)]
struct FetchPayload {
    #[serde(default)]
    data: Vec<UpstreamRecipe>,
}

#[derive(Debug, Deserialize)]
struct UpstreamRecipe {
    #[serde(rename = "Recipe_id", default)]
    recipe_id: Option<Value>,
    #[serde(rename = "Recipe_title", default)]
    recipe_title: Option<String>,
    #[serde(rename = "Region", default)]
    region: Option<String>,
    #[serde(rename = "Sub_region", default)]
    sub_region: Option<String>,
    #[serde(rename = "Calories", default)]
    calories: Option<Value>,
    #[serde(rename = "Protein (g)", default)]
    protein_g: Option<Value>,
    #[serde(rename = "Processes", default)]
    processes: Option<String>,
    #[serde(rename = "total_time", default)]
    total_time: Option<Value>,
    #[serde(rename = "ingredients", default)]
    ingredients: Option<String>,
    #[serde(rename = "instructions", default)]
    instructions: Option<String>,
}

// Upstream emits numerics inconsistently as numbers or strings
fn json_f32(value: Option<&Value>) -> Option<f32> {
    let value = value?;
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn json_id(value: Option<&Value>) -> RecipeId {
    match value {
        Some(Value::Number(n)) if n.as_u64().is_some() => {
            RecipeId::Integer(n.as_u64().unwrap_or_default())
        }
        Some(Value::String(s)) if !s.trim().is_empty() => RecipeId::String(s.trim().to_string()),
        _ => RecipeId::random(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Fetches and enriches recipe rows from the upstream API.
pub struct RecipeFetcher {
    client: reqwest::Client,
    config: FetchConfig,
    embedder: Arc<dyn TextEmbedder>,
}

impl RecipeFetcher {
    pub fn new(config: FetchConfig, embedder: Arc<dyn TextEmbedder>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            config,
            embedder,
        })
    }

    fn convert(&self, raw: UpstreamRecipe) -> Option<RecipeRecord> {
        let title = non_empty(raw.recipe_title)?;

        let mut record = RecipeRecord::new(json_id(raw.recipe_id.as_ref()), title);
        record.calories = json_f32(raw.calories.as_ref());
        record.protein_g = json_f32(raw.protein_g.as_ref());
        record.total_time_min = json_f32(raw.total_time.as_ref());
        record.region = non_empty(raw.region);
        record.sub_region = non_empty(raw.sub_region);
        record.processes = non_empty(raw.processes);
        record.ingredients = non_empty(raw.ingredients);
        record.instructions = non_empty(raw.instructions);

        record.entities = extract_entities(&record.attribute_text());
        record.embedding = self.embedder.embed(&record.title);

        Some(record)
    }

    /// Fetch up to `max_pages` pages of recipes.
    ///
    /// Transport errors and error statuses end the pagination early
    /// with a warning; pages already fetched are returned.
    pub async fn fetch_all(&self) -> Vec<RecipeRecord> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            RECIPES_ENDPOINT
        );
        let mut all = Vec::new();

        for page in 1..=self.config.max_pages {
            let mut request = self
                .client
                .get(&url)
                .query(&[("page", page), ("limit", self.config.page_size)]);
            if let Some(key) = &self.config.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("fetch page {}: {}", page, e);
                    break;
                }
            };

            if !response.status().is_success() {
                warn!("fetch page {}: upstream returned {}", page, response.status());
                break;
            }

            let envelope: FetchEnvelope = match response.json().await {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!("fetch page {}: malformed payload ({})", page, e);
                    break;
                }
            };

            let rows = envelope.payload.map(|p| p.data).unwrap_or_default();
            if rows.is_empty() {
                break;
            }

            let page_count = rows.len();
            all.extend(rows.into_iter().filter_map(|raw| self.convert(raw)));
            info!("fetched page {}: {} recipes", page, page_count);
        }

        info!("fetch complete: {} recipes", all.len());
        all
    }
}
