//! Hard-filter predicates.
//!
//! A hard filter unconditionally excludes a candidate before any
//! scoring. Unknown numeric values pass every filter - a recipe is
//! only excluded on evidence, never on absence of it. The plan builder
//! reuses these predicates for its candidate pool.

use nutrimatch_core::vocab;
use nutrimatch_core::{ConstraintSet, RecipeRecord};
use std::collections::BTreeSet;

/// Method-avoidance check: a recipe whose own preferred methods
/// intersect the avoided set is disqualified outright.
#[must_use]
pub fn avoids_conflicting_methods(recipe: &RecipeRecord, avoided: &BTreeSet<String>) -> bool {
    if avoided.is_empty() {
        return true;
    }
    recipe
        .entities
        .methods_preferred
        .intersection(avoided)
        .next()
        .is_none()
}

/// Calorie ceiling: known calories above the limit exclude the recipe.
#[must_use]
pub fn within_calorie_limit(recipe: &RecipeRecord, limit: Option<f32>) -> bool {
    match (limit, recipe.calories) {
        (Some(limit), Some(calories)) => calories <= limit,
        _ => true,
    }
}

/// Protein floor: known protein below the threshold excludes the
/// recipe.
#[must_use]
pub fn meets_protein_floor(recipe: &RecipeRecord, floor: Option<f32>) -> bool {
    match (floor, recipe.protein_g) {
        (Some(floor), Some(protein)) => protein >= floor,
        _ => true,
    }
}

/// Diet match: excludes only when both sides are set and differ
/// (case-insensitive).
#[must_use]
pub fn diet_compatible(recipe: &RecipeRecord, user_diet: Option<&str>) -> bool {
    match (user_diet, recipe.entities.diet.as_deref()) {
        (Some(user), Some(recipe_diet)) => user.eq_ignore_ascii_case(recipe_diet),
        _ => true,
    }
}

/// Preparation-time ceiling: known times above the limit exclude the
/// recipe.
#[must_use]
pub fn within_time(recipe: &RecipeRecord, max_time_min: Option<f32>) -> bool {
    match (max_time_min, recipe.total_time_min) {
        (Some(max), Some(time)) => time <= max,
        _ => true,
    }
}

/// Region match: the requested string must appear in the recipe's
/// region or sub-region, case-insensitive.
#[must_use]
pub fn in_region(recipe: &RecipeRecord, region: Option<&str>) -> bool {
    let Some(wanted) = region else {
        return true;
    };
    let wanted = wanted.to_lowercase();

    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&wanted))
    };

    contains(&recipe.region) || contains(&recipe.sub_region)
}

/// Vegetarian check over title and ingredient text.
#[must_use]
pub fn is_vegetarian(recipe: &RecipeRecord) -> bool {
    !vocab::mentions_non_veg(&recipe.dietary_text())
}

/// The matcher's full hard-filter chain, applied in order with
/// short-circuit semantics: method-avoidance, calorie ceiling, protein
/// floor, diet match.
#[must_use]
pub fn passes_hard_filters(recipe: &RecipeRecord, constraints: &ConstraintSet) -> bool {
    avoids_conflicting_methods(recipe, &constraints.methods_avoided)
        && within_calorie_limit(recipe, constraints.calorie_limit)
        && meets_protein_floor(recipe, constraints.protein_threshold())
        && diet_compatible(recipe, constraints.diet.as_deref())
}
