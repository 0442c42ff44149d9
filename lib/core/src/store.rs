use crate::recipe::RecipeRecord;
use ahash::AHashSet;
use parking_lot::RwLock;
use std::sync::Arc;

/// A point-in-time view of the recipe collection.
///
/// Snapshots are cheap to clone and stay valid while a refresh swaps in
/// a new collection behind them.
pub type Snapshot = Arc<Vec<Arc<RecipeRecord>>>;

/// Append-only recipe collection.
///
/// Existing entries are never mutated or removed; a refresh appends new
/// rows (deduplicated by identifier) and publishes a new snapshot.
/// Readers iterate whatever snapshot they hold without locking.
pub struct RecipeStore {
    recipes: RwLock<Snapshot>,
    seen_ids: RwLock<AHashSet<String>>,
}

impl RecipeStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(Arc::new(Vec::new())),
            seen_ids: RwLock::new(AHashSet::new()),
        }
    }

    /// Current snapshot of the collection.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.recipes.read().clone()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.read().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.read().is_empty()
    }

    /// Append a batch, skipping identifiers already present.
    ///
    /// Returns the number of rows actually inserted. Publishes one new
    /// snapshot for the whole batch.
    pub fn append(&self, batch: Vec<RecipeRecord>) -> usize {
        let mut seen = self.seen_ids.write();
        let fresh: Vec<Arc<RecipeRecord>> = batch
            .into_iter()
            .filter(|recipe| seen.insert(recipe.id.to_string()))
            .map(Arc::new)
            .collect();

        if fresh.is_empty() {
            return 0;
        }

        let inserted = fresh.len();
        let mut recipes = self.recipes.write();
        let mut next: Vec<Arc<RecipeRecord>> = Vec::with_capacity(recipes.len() + inserted);
        next.extend(recipes.iter().cloned());
        next.extend(fresh);
        *recipes = Arc::new(next);

        inserted
    }
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}
