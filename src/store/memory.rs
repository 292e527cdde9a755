//! In-process artifact store

use std::sync::{PoisonError, RwLock};

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::store::{ArtifactStore, missing};

/// Artifact store keeping record batches in memory for the process lifetime
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: RwLock<FxHashMap<String, RecordBatch>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryStore {
    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    fn contains(&self, name: &str) -> Result<bool> {
        let artifacts = self.artifacts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(artifacts.contains_key(name))
    }

    fn read_artifact(&self, name: &str) -> Result<Vec<RecordBatch>> {
        let artifacts = self.artifacts.read().unwrap_or_else(PoisonError::into_inner);
        artifacts
            .get(name)
            .map(|batch| vec![batch.clone()])
            .ok_or_else(|| missing(name))
    }

    fn write_artifact(&self, name: &str, batch: &RecordBatch) -> Result<()> {
        let mut artifacts = self.artifacts.write().unwrap_or_else(PoisonError::into_inner);
        artifacts.insert(name.to_string(), batch.clone());
        Ok(())
    }
}
