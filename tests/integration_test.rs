// Integration tests for nutrimatch
use nutrimatch::prelude::*;
use nutrimatch_core::vocab;
use std::sync::Arc;

fn recipe(id: u64, title: &str, calories: f32) -> RecipeRecord {
    RecipeRecord::new(id.into(), title)
        .with_calories(calories)
        .with_entities(extract_entities(title))
}

fn matcher() -> RecipeMatcher {
    RecipeMatcher::new(Arc::new(HashEmbedder::default()))
}

#[test]
fn test_extraction_stays_inside_vocabulary() {
    let queries = [
        "Keto Indian high protein, no fried, under 500 kcal",
        "sweet japanese dessert, steamed",
        "anything at all!! 12345",
        "",
    ];

    for query in queries {
        let set = extract_entities(query);
        for cuisine in &set.cuisines {
            assert!(vocab::SUPPORTED_CUISINES.contains(&cuisine.as_str()));
        }
        for flavor in &set.flavors {
            assert!(vocab::SUPPORTED_FLAVORS.contains(&flavor.as_str()));
        }
        for method in &set.methods_preferred {
            assert!(vocab::SUPPORTED_METHODS.contains(&method.as_str()));
        }
        if let Some(diet) = &set.diet {
            assert!(vocab::SUPPORTED_DIETS.contains(&diet.as_str()));
        }
    }
}

#[test]
fn test_extraction_is_idempotent_end_to_end() {
    let pipeline = EntityPipeline::default();
    let text = "Spicy Mediterranean, vegan, 20g protein, below 700 calories";

    let first = pipeline.run(text);
    let second = pipeline.run(text);
    assert_eq!(first.entities, second.entities);
}

#[test]
fn test_scenario_constraint_decoding() {
    let set = extract_entities("Keto Indian high protein, no fried, under 500 kcal");

    assert_eq!(set.diet.as_deref(), Some("Keto"));
    assert!(set.cuisines.contains("Indian"));
    assert!(set.protein_threshold().unwrap() >= 25.0);
    assert_eq!(set.calorie_limit, Some(500.0));
    assert!(set.methods_avoided.contains("Fried"));
}

#[test]
fn test_scenario_calorie_ceiling_excludes_high_scorer() {
    let mut constraints = ConstraintSet::default();
    constraints.calorie_limit = Some(500.0);
    constraints.cuisines.insert("Indian".to_string());

    let pool: Vec<Arc<RecipeRecord>> = vec![
        Arc::new(recipe(1, "Rich Indian Curry", 700.0)),
        Arc::new(recipe(2, "Light Salad", 250.0)),
        Arc::new(recipe(3, "Simple Soup", 300.0)),
    ];

    let results = matcher().find_matching_recipes(&pool, &constraints, Some("indian curry"), 10);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.title != "Rich Indian Curry"));
}

#[test]
fn test_scenario_empty_collection() {
    let results = matcher().find_matching_recipes(
        &[],
        &ConstraintSet::default(),
        Some("anything"),
        DEFAULT_TOP_K,
    );
    assert!(results.is_empty());

    let plan = generate_weekly_plan(&PlanRequest::new(2000.0), &[]);
    assert!(plan.is_none());
}

#[test]
fn test_scenario_slot_targets_and_nearest_choice() {
    let targets = MealsPerDay::Three.slot_targets(2100.0);
    let values: Vec<f32> = targets.iter().map(|(_, t)| *t).collect();
    assert_eq!(values, vec![630.0, 840.0, 630.0]);

    let pool: Vec<Arc<RecipeRecord>> = vec![
        Arc::new(recipe(1, "Small Bowl", 200.0)),
        Arc::new(recipe(2, "Breakfast Sized", 620.0)),
        Arc::new(recipe(3, "Lunch Sized", 850.0)),
    ];

    let plan = generate_weekly_plan(&PlanRequest::new(2100.0), &pool).unwrap();
    let monday = &plan.days[0];
    assert_eq!(monday.day, "Monday");
    assert_eq!(monday.meals[0].recipe.title, "Breakfast Sized");
    assert_eq!(monday.meals[1].recipe.title, "Lunch Sized");
}

#[test]
fn test_scenario_two_recipe_pool_fills_all_21_slots() {
    let pool: Vec<Arc<RecipeRecord>> = vec![
        Arc::new(recipe(1, "Bean Stew", 500.0)),
        Arc::new(recipe(2, "Veggie Rice", 800.0)),
    ];

    let plan = generate_weekly_plan(&PlanRequest::new(2100.0), &pool).unwrap();
    assert!(plan.is_complete(3));

    let filled: usize = plan.days.iter().map(|d| d.meals.len()).sum();
    assert_eq!(filled, 21);
}

#[test]
fn test_avoided_methods_are_a_strict_narrowing() {
    let mut constraints = ConstraintSet::default();
    constraints.methods_avoided.insert("Fried".to_string());
    constraints.methods_avoided.insert("Deep-fried".to_string());

    let pool: Vec<Arc<RecipeRecord>> = (0..50)
        .map(|i| {
            let title = if i % 2 == 0 {
                format!("Fry Special {}", i)
            } else {
                format!("Steamed Dish {}", i)
            };
            let mut entities = ConstraintSet::default();
            if i % 2 == 0 {
                entities.methods_preferred.insert("Fried".to_string());
            } else {
                entities.methods_preferred.insert("Steamed".to_string());
            }
            Arc::new(
                RecipeRecord::new((i as u64).into(), title).with_entities(entities),
            )
        })
        .collect();

    let results = matcher().find_matching_recipes(&pool, &constraints, None, 100);
    for result in &results {
        assert!(result
            .matched_entities
            .methods_preferred
            .intersection(&constraints.methods_avoided)
            .next()
            .is_none());
    }
}

#[test]
fn test_tightening_the_calorie_limit_never_grows_results() {
    let pool: Vec<Arc<RecipeRecord>> = (0..40)
        .map(|i| Arc::new(recipe(i as u64, &format!("Dish {}", i), 50.0 * i as f32)))
        .collect();

    let survivors = |limit: Option<f32>| {
        let mut constraints = ConstraintSet::default();
        constraints.calorie_limit = limit;
        matcher()
            .find_matching_recipes(&pool, &constraints, None, 1000)
            .len()
    };

    let mut previous = survivors(None);
    for limit in [1500.0, 1000.0, 500.0, 100.0, 0.0] {
        let current = survivors(Some(limit));
        assert!(current <= previous, "limit {} grew the result set", limit);
        previous = current;
    }
}

#[test]
fn test_equal_scores_preserve_collection_order() {
    let pool: Vec<Arc<RecipeRecord>> = (0..5)
        .map(|i| {
            Arc::new(RecipeRecord::new(
                (i as u64).into(),
                format!("Identical {}", i),
            ))
        })
        .collect();

    // No query and no constraint overlap: every score is identical
    let no_semantic = RecipeMatcher::new(Arc::new(NoopEmbedder));
    let results = no_semantic.find_matching_recipes(&pool, &ConstraintSet::default(), None, 10);

    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Identical 0",
            "Identical 1",
            "Identical 2",
            "Identical 3",
            "Identical 4"
        ]
    );
}

#[test]
fn test_search_pipeline_end_to_end() {
    let store = RecipeStore::new();
    let embedder = HashEmbedder::default();

    let rows = [
        (1u64, "Tandoori Grilled Paneer Indian", 420.0, 30.0),
        (2u64, "Fried Chicken Bucket", 900.0, 40.0),
        (3u64, "Italian Margherita Pizza", 650.0, 20.0),
    ];
    store.append(
        rows.iter()
            .map(|(id, title, cal, protein)| {
                let mut r = RecipeRecord::new((*id).into(), *title)
                    .with_calories(*cal)
                    .with_protein(*protein)
                    .with_entities(extract_entities(title));
                r.embedding = embedder.embed(title);
                r
            })
            .collect(),
    );

    let pipeline = EntityPipeline::default();
    let query = "Grilled Indian high protein, no fried, under 500 kcal";
    let outcome = pipeline.run(query);

    let results = matcher().find_matching_recipes(
        &store.snapshot(),
        &outcome.entities,
        Some(query),
        DEFAULT_TOP_K,
    );

    // The fried bucket is filtered out; pizza fails the calorie and
    // protein checks; the paneer dish survives and ranks first
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Tandoori Grilled Paneer Indian");
    assert!(results[0].score > 0.0);
}

#[test]
fn test_repository_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    {
        let repo = RecipeRepository::open(dir.path()).unwrap();
        repo.ingest(vec![
            recipe(1, "Cached Dish", 500.0),
            recipe(2, "Another Dish", 600.0),
        ])
        .unwrap();
    }

    let reopened = RecipeRepository::open(dir.path()).unwrap();
    assert_eq!(reopened.len(), 2);

    // The reloaded collection feeds the planner directly
    let plan = generate_weekly_plan(&PlanRequest::new(1800.0), &reopened.snapshot());
    assert!(plan.is_some());
}

#[test]
fn test_consolidation_diet_vote_end_to_end() {
    // Lexical pass and heuristic tagger both see "Keto"; the vote keeps it
    let pipeline = EntityPipeline::default();
    let outcome = pipeline.run("Keto Vegan Indian bowl, mostly Keto");
    assert_eq!(outcome.entities.diet.as_deref(), Some("Keto"));
}
