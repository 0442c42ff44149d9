//! # nutrimatch Plan
//!
//! Builds weekly meal plans from the cached recipe collection.
//!
//! The builder assembles a candidate pool through progressive filter
//! relaxation (the vegetarian flag is the one constraint never
//! relaxed), then fills 7 days of meal slots greedily, picking the pool
//! member closest in calories to each slot's target while avoiding
//! repetition until the pool is exhausted.
//!
//! ## Example
//!
//! ```rust
//! use nutrimatch_core::RecipeRecord;
//! use nutrimatch_plan::{generate_weekly_plan, PlanRequest};
//! use std::sync::Arc;
//!
//! let pool: Vec<Arc<RecipeRecord>> = vec![
//!     Arc::new(RecipeRecord::new(1u64.into(), "Oat Bowl").with_calories(420.0)),
//!     Arc::new(RecipeRecord::new(2u64.into(), "Lentil Curry").with_calories(650.0)),
//! ];
//!
//! let request = PlanRequest::new(2100.0);
//! let plan = generate_weekly_plan(&request, &pool).unwrap();
//! assert_eq!(plan.days.len(), 7);
//! ```

pub mod planner;

pub use planner::{
    generate_weekly_plan, DayPlan, MealAssignment, MealSlot, MealsPerDay, PlanRequest,
    PlannedMeal, WeeklyPlan, WEEK_DAYS,
};
