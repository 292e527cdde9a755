//! Artifact persistence
//!
//! Stages hand their outputs to each other through an `ArtifactStore`: each
//! sub-index stage writes its artifact and the composite stage reads all three
//! back. The store also acts as a cache when artifacts are reused between runs.

pub mod file;
pub mod memory;

use arrow::record_batch::RecordBatch;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::{Error, Result};
use crate::models::{COMPOSITE_ARTIFACT, CompositeArtifact, IndexDomain, SubIndexArtifact};
use crate::utils::io::TableFormat;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Named storage for artifact tables
pub trait ArtifactStore: Send + Sync {
    /// Short description used in log lines
    fn describe(&self) -> String;

    /// Whether an artifact has been written
    fn contains(&self, name: &str) -> Result<bool>;

    /// Read an artifact back
    ///
    /// # Errors
    /// `MissingPrerequisite` when the artifact has never been written.
    fn read_artifact(&self, name: &str) -> Result<Vec<RecordBatch>>;

    /// Write an artifact, replacing any previous version
    fn write_artifact(&self, name: &str, batch: &RecordBatch) -> Result<()>;
}

/// Open the store selected by the configuration
///
/// # Errors
/// `Configuration` when the backend is unknown or the target directory cannot
/// be used.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn ArtifactStore>> {
    let store: Box<dyn ArtifactStore> = match config.backend()? {
        StoreBackend::Parquet => Box::new(FileStore::new(&config.directory, TableFormat::Parquet)?),
        StoreBackend::Csv => Box::new(FileStore::new(&config.directory, TableFormat::Csv)?),
        StoreBackend::Memory => Box::new(MemoryStore::new()),
    };
    log::info!("Using artifact store: {}", store.describe());
    Ok(store)
}

/// Persist a sub-index artifact under its domain's name
pub fn write_sub_index(store: &dyn ArtifactStore, artifact: &SubIndexArtifact) -> Result<()> {
    store.write_artifact(artifact.domain.artifact_name(), &artifact.to_record_batch()?)
}

/// Read a sub-index artifact, validating its schema and year uniqueness
pub fn read_sub_index(store: &dyn ArtifactStore, domain: IndexDomain) -> Result<SubIndexArtifact> {
    let batches = store.read_artifact(domain.artifact_name())?;
    SubIndexArtifact::from_record_batches(domain, &batches).map_err(|e| schema_context(e, domain.artifact_name()))
}

/// Persist the composite artifact
pub fn write_composite(store: &dyn ArtifactStore, artifact: &CompositeArtifact) -> Result<()> {
    store.write_artifact(COMPOSITE_ARTIFACT, &artifact.to_record_batch()?)
}

/// Read the composite artifact
pub fn read_composite(store: &dyn ArtifactStore) -> Result<CompositeArtifact> {
    let batches = store.read_artifact(COMPOSITE_ARTIFACT)?;
    CompositeArtifact::from_record_batches(&batches).map_err(|e| schema_context(e, COMPOSITE_ARTIFACT))
}

fn schema_context(err: Error, artifact: &str) -> Error {
    match err {
        Error::ColumnNotFound { column } => {
            Error::Schema(format!("Artifact '{artifact}' is missing column '{column}'"))
        }
        Error::InvalidDataType { column, expected } => Error::Schema(format!(
            "Artifact '{artifact}' column '{column}' is not {expected}"
        )),
        other => other,
    }
}

fn missing(name: &str) -> Error {
    Error::MissingPrerequisite {
        artifact: name.to_string(),
    }
}
