//! Weekly plan construction.

use ahash::AHashSet;
use nutrimatch_core::{RecipeId, RecipeRecord};
use nutrimatch_ranking::filters;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Fixed day labels, Monday first
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Share of the daily target per slot in a three-meal day
const BREAKFAST_SHARE: f32 = 0.30;
const LUNCH_SHARE: f32 = 0.40;
const DINNER_SHARE: f32 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

/// Two- or three-slot day layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealsPerDay {
    Two,
    Three,
}

impl MealsPerDay {
    /// Parse a slot count from a request payload.
    #[must_use]
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            2 => Some(MealsPerDay::Two),
            3 => Some(MealsPerDay::Three),
            _ => None,
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        match self {
            MealsPerDay::Two => 2,
            MealsPerDay::Three => 3,
        }
    }

    /// Calorie target per slot as fixed fractions of the daily target.
    ///
    /// Three meals split 30/40/30. Two meals keep the lunch:dinner
    /// ratio renormalized to the whole day (4/7 and 3/7).
    #[must_use]
    pub fn slot_targets(&self, daily_calories: f32) -> Vec<(MealSlot, f32)> {
        match self {
            MealsPerDay::Three => vec![
                (MealSlot::Breakfast, daily_calories * BREAKFAST_SHARE),
                (MealSlot::Lunch, daily_calories * LUNCH_SHARE),
                (MealSlot::Dinner, daily_calories * DINNER_SHARE),
            ],
            MealsPerDay::Two => vec![
                (MealSlot::Lunch, daily_calories * (4.0 / 7.0)),
                (MealSlot::Dinner, daily_calories * (3.0 / 7.0)),
            ],
        }
    }
}

/// Inputs for one weekly plan
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Daily calorie target, must be positive (validated at the serving
    /// boundary)
    pub daily_calories: f32,
    /// The one constraint never relaxed
    pub vegetarian_only: bool,
    pub max_time_min: Option<f32>,
    pub region: Option<String>,
    pub min_protein_g: Option<f32>,
    pub meals_per_day: MealsPerDay,
}

impl PlanRequest {
    #[must_use]
    pub fn new(daily_calories: f32) -> Self {
        Self {
            daily_calories,
            vegetarian_only: true,
            max_time_min: None,
            region: None,
            min_protein_g: None,
            meals_per_day: MealsPerDay::Three,
        }
    }

    #[must_use]
    pub fn with_vegetarian(mut self, vegetarian_only: bool) -> Self {
        self.vegetarian_only = vegetarian_only;
        self
    }

    #[must_use]
    pub fn with_max_time(mut self, minutes: f32) -> Self {
        self.max_time_min = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_min_protein(mut self, grams: f32) -> Self {
        self.min_protein_g = Some(grams);
        self
    }

    #[must_use]
    pub fn with_meals_per_day(mut self, meals_per_day: MealsPerDay) -> Self {
        self.meals_per_day = meals_per_day;
        self
    }
}

/// Recipe projection recorded into the plan
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMeal {
    pub id: RecipeId,
    pub title: String,
    pub calories: Option<f32>,
    pub protein_g: Option<f32>,
    pub total_time_min: Option<f32>,
    pub region: Option<String>,
    pub sub_region: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
}

impl From<&RecipeRecord> for PlannedMeal {
    fn from(recipe: &RecipeRecord) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            calories: recipe.calories,
            protein_g: recipe.protein_g,
            total_time_min: recipe.total_time_min,
            region: recipe.region.clone(),
            sub_region: recipe.sub_region.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MealAssignment {
    pub slot: MealSlot,
    pub recipe: PlannedMeal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub day: String,
    pub meals: Vec<MealAssignment>,
}

/// Seven days, every configured slot filled
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// Whether every day has every configured slot filled.
    #[must_use]
    pub fn is_complete(&self, meals_per_day: usize) -> bool {
        self.days.len() == WEEK_DAYS.len()
            && self.days.iter().all(|d| d.meals.len() == meals_per_day)
    }
}

// Relaxation levels as (time, region, protein) filter switches, applied
// in order. Protein is dropped first, then time, then region. The
// vegetarian flag survives every level; only the final whole-collection
// fallback ignores it.
const RELAXATION_LEVELS: &[(bool, bool, bool)] = &[
    (true, true, true),
    (true, true, false),
    (false, true, false),
    (false, false, false),
];

fn build_pool(request: &PlanRequest, recipes: &[Arc<RecipeRecord>]) -> Vec<Arc<RecipeRecord>> {
    for (level, &(use_time, use_region, use_protein)) in RELAXATION_LEVELS.iter().enumerate() {
        let pool: Vec<Arc<RecipeRecord>> = recipes
            .iter()
            .filter(|recipe| {
                (!request.vegetarian_only || filters::is_vegetarian(recipe))
                    && (!use_time || filters::within_time(recipe, request.max_time_min))
                    && (!use_region || filters::in_region(recipe, request.region.as_deref()))
                    && (!use_protein
                        || filters::meets_protein_floor(recipe, request.min_protein_g))
            })
            .cloned()
            .collect();

        if !pool.is_empty() {
            debug!(
                "candidate pool: {} of {} recipes at relaxation level {}",
                pool.len(),
                recipes.len(),
                level
            );
            return pool;
        }
    }

    debug!("all filters exhausted, falling back to the whole collection");
    recipes.to_vec()
}

fn calorie_distance(recipe: &RecipeRecord, target: f32) -> f32 {
    recipe
        .calories
        .map_or(f32::INFINITY, |calories| (calories - target).abs())
}

/// Build a weekly plan from the recipe collection.
///
/// Returns `None` only when the collection itself is empty; every
/// filter level relaxes before giving up.
#[must_use]
pub fn generate_weekly_plan(
    request: &PlanRequest,
    recipes: &[Arc<RecipeRecord>],
) -> Option<WeeklyPlan> {
    let pool = build_pool(request, recipes);
    if pool.is_empty() {
        return None;
    }

    let targets = request.meals_per_day.slot_targets(request.daily_calories);
    let mut used: AHashSet<String> = AHashSet::new();
    let mut days = Vec::with_capacity(WEEK_DAYS.len());

    for day in WEEK_DAYS {
        let mut meals = Vec::with_capacity(targets.len());

        for (slot, target) in &targets {
            // Once every pool member has been used, allow reuse
            if pool.iter().all(|r| used.contains(&r.id.to_string())) {
                used.clear();
            }

            let chosen = pool
                .iter()
                .filter(|r| !used.contains(&r.id.to_string()))
                .min_by(|a, b| {
                    calorie_distance(a, *target)
                        .partial_cmp(&calorie_distance(b, *target))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })?;

            used.insert(chosen.id.to_string());
            meals.push(MealAssignment {
                slot: *slot,
                recipe: PlannedMeal::from(chosen.as_ref()),
            });
        }

        days.push(DayPlan {
            day: day.to_string(),
            meals,
        });
    }

    Some(WeeklyPlan { days })
}
