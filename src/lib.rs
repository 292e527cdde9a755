//! Inequality-adjusted composite development index
//!
//! Computes health, income and education sub-indices for a single region over
//! a multi-year panel, adjusts each for inequality with an Atkinson discount,
//! and combines them by geometric mean into a composite index with
//! year-over-year growth rates.
//!
//! Inputs come from a [`DataSource`] (survey microdata and aggregate indicator
//! series); stage outputs are handed over through an [`ArtifactStore`].

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod utils;

// Core types
pub use config::{PipelineConfig, StoreBackend, StoreConfig};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, Stage};

// Models
pub use models::{
    ArrowSchema, CompositeArtifact, CompositeRow, IndexDomain, IndicatorSeries, MicrodataBatch,
    MicrodataRecord, SubIndexArtifact, SubIndexRow, SurveyDomain,
};

// Collaborator boundaries
pub use source::{DataSource, DirectorySource, InMemorySource};
pub use store::{ArtifactStore, FileStore, MemoryStore, open_store};

// Arrow types
pub use arrow::record_batch::RecordBatch;
