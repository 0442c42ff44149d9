//! On-disk recipe cache.
//!
//! One JSON file, written atomically (temp file + rename) so a crash
//! mid-save never leaves a torn cache behind.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use nutrimatch_core::{Error, RecipeRecord, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CACHE_FILE_NAME: &str = "recipes.json";

/// Serialized cache payload
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub saved_at: DateTime<Utc>,
    pub recipes: Vec<RecipeRecord>,
}

/// Handle to the cache file inside a data directory
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    #[must_use]
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(CACHE_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole collection to disk atomically.
    pub fn save(&self, recipes: &[Arc<RecipeRecord>]) -> Result<()> {
        let snapshot = CacheSnapshot {
            saved_at: Utc::now(),
            recipes: recipes.iter().map(|r| r.as_ref().clone()).collect(),
        };

        let data =
            serde_json::to_vec(&snapshot).map_err(|e| Error::Serialization(e.to_string()))?;

        let file = AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite);
        file.write(|f| f.write_all(&data))
            .map_err(|e| Error::Cache(e.to_string()))?;

        Ok(())
    }

    /// Load the cached collection, `None` when no cache exists yet.
    pub fn load(&self) -> Result<Option<Vec<RecipeRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(&self.path)?;
        let snapshot: CacheSnapshot =
            serde_json::from_slice(&data).map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(Some(snapshot.recipes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheFile::new(dir.path());
        assert!(cache.load().unwrap().is_none());

        let recipes = vec![Arc::new(
            RecipeRecord::new(7u64.into(), "Dal Tadka")
                .with_calories(380.0)
                .with_region("Indian"),
        )];
        cache.save(&recipes).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Dal Tadka");
        assert_eq!(loaded[0].calories, Some(380.0));
    }

    #[test]
    fn test_save_overwrites_previous_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheFile::new(dir.path());

        cache
            .save(&[Arc::new(RecipeRecord::new(1u64.into(), "Old"))])
            .unwrap();
        cache
            .save(&[
                Arc::new(RecipeRecord::new(1u64.into(), "Old")),
                Arc::new(RecipeRecord::new(2u64.into(), "New")),
            ])
            .unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_corrupt_cache_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CACHE_FILE_NAME), b"{broken").unwrap();

        let cache = CacheFile::new(dir.path());
        assert!(cache.load().is_err());
    }
}
