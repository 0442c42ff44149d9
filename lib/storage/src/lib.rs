//! # nutrimatch Storage
//!
//! Feeds and persists the in-memory recipe collection:
//!
//! - [`RecipeRepository`] - facade owning the store and its on-disk
//!   JSON cache
//! - [`dataset`] - CSV dataset ingestion
//! - [`fetcher`] - paginated upstream API fetch
//!
//! Every ingestion path enriches rows the same way: lexical entities
//! extracted from title + region + processes, and a title embedding
//! when the configured embedder provides one.

pub mod dataset;
pub mod fetcher;
pub mod persistence;

pub use dataset::load_dataset;
pub use fetcher::{FetchConfig, RecipeFetcher};
pub use persistence::{CacheFile, CacheSnapshot};

use nutrimatch_core::{RecipeRecord, RecipeStore, Result, Snapshot};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Owns the process-wide recipe store and keeps the disk cache in sync
/// with it.
pub struct RecipeRepository {
    store: Arc<RecipeStore>,
    cache: CacheFile,
}

impl RecipeRepository {
    /// Open a repository rooted at `data_dir`, loading any cached
    /// recipes from a previous run. An unreadable cache is logged and
    /// ignored, never fatal.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;

        let cache = CacheFile::new(&data_dir);
        let store = Arc::new(RecipeStore::new());

        match cache.load() {
            Ok(Some(recipes)) => {
                let loaded = store.append(recipes);
                info!("loaded {} recipes from cache", loaded);
            }
            Ok(None) => {}
            Err(e) => warn!("ignoring unreadable recipe cache: {}", e),
        }

        Ok(Self { store, cache })
    }

    #[must_use]
    pub fn store(&self) -> Arc<RecipeStore> {
        self.store.clone()
    }

    /// Current point-in-time view of the collection.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Append a batch and persist the grown collection when anything
    /// new was inserted. Returns the inserted count.
    pub fn ingest(&self, recipes: Vec<RecipeRecord>) -> Result<usize> {
        let inserted = self.store.append(recipes);
        if inserted > 0 {
            self.cache.save(&self.store.snapshot())?;
        }
        Ok(inserted)
    }
}
