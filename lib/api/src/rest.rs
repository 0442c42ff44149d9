use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use actix_cors::Cors;
use nutrimatch_extract::EntityPipeline;
use nutrimatch_plan::{generate_weekly_plan, MealsPerDay, PlanRequest};
use nutrimatch_ranking::{RecipeMatcher, DEFAULT_TOP_K};
use nutrimatch_storage::{RecipeFetcher, RecipeRepository};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state for all routes
pub struct AppState {
    pub repository: Arc<RecipeRepository>,
    pub pipeline: EntityPipeline,
    pub matcher: RecipeMatcher,
    /// Absent when no upstream is configured
    pub fetcher: Option<Arc<RecipeFetcher>>,
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    top_k: Option<usize>,
}

fn default_vegetarian() -> bool {
    true
}

#[derive(Deserialize)]
struct WeeklyPlanRequest {
    daily_calories: f32,
    #[serde(default = "default_vegetarian")]
    vegetarian: bool,
    max_cooking_time: Option<f32>,
    region: Option<String>,
    min_protein: Option<f32>,
    meals_per_day: Option<u8>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .route("/", web::get().to(health))
                .route("/entities/extract", web::post().to(extract_entities))
                .route("/recipes/search", web::post().to(search_recipes))
                .route("/recipes/refresh", web::post().to(refresh_recipes))
                .route("/plans/weekly", web::post().to(weekly_plan))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn health(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "cached_recipes": state.repository.len(),
    })))
}

async fn extract_entities(
    state: web::Data<Arc<AppState>>,
    req: web::Json<ExtractRequest>,
) -> ActixResult<HttpResponse> {
    let outcome = state.pipeline.run(&req.text);
    Ok(HttpResponse::Ok().json(outcome))
}

async fn search_recipes(
    state: web::Data<Arc<AppState>>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    let outcome = state.pipeline.run(&req.query);
    let snapshot = state.repository.snapshot();

    let matches = state.matcher.find_matching_recipes(
        &snapshot,
        &outcome.entities,
        Some(&req.query),
        req.top_k.unwrap_or(DEFAULT_TOP_K),
    );
    debug!(
        "search \"{}\": {} of {} recipes matched",
        req.query,
        matches.len(),
        snapshot.len()
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "entities": outcome.entities,
        "result": matches,
    })))
}

async fn weekly_plan(
    state: web::Data<Arc<AppState>>,
    req: web::Json<WeeklyPlanRequest>,
) -> ActixResult<HttpResponse> {
    if req.daily_calories <= 0.0 || !req.daily_calories.is_finite() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "daily_calories must be positive"
        })));
    }

    let meals_per_day = match req.meals_per_day {
        Some(count) => match MealsPerDay::from_count(count) {
            Some(meals) => meals,
            None => {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "meals_per_day must be 2 or 3"
                })));
            }
        },
        None => MealsPerDay::Three,
    };

    let mut plan_request = PlanRequest::new(req.daily_calories)
        .with_vegetarian(req.vegetarian)
        .with_meals_per_day(meals_per_day);
    if let Some(max_time) = req.max_cooking_time {
        plan_request = plan_request.with_max_time(max_time);
    }
    if let Some(region) = &req.region {
        plan_request = plan_request.with_region(region.clone());
    }
    if let Some(min_protein) = req.min_protein {
        plan_request = plan_request.with_min_protein(min_protein);
    }

    let snapshot = state.repository.snapshot();
    match generate_weekly_plan(&plan_request, &snapshot) {
        Some(plan) => Ok(HttpResponse::Ok().json(plan)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Could not generate plan with given constraints."
        }))),
    }
}

async fn refresh_recipes(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    let Some(fetcher) = &state.fetcher else {
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "no upstream recipe source configured"
        })));
    };

    let fetched = fetcher.fetch_all().await;
    let fetched_count = fetched.len();

    match state.repository.ingest(fetched) {
        Ok(inserted) => {
            info!("refresh: {} fetched, {} new", fetched_count, inserted);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": { "fetched": fetched_count, "inserted": inserted }
            })))
        }
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}
