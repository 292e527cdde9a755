//! Domain models for the index engine
//!
//! Typed records for the raw inputs (survey microdata, indicator series) and
//! the year-indexed artifacts produced by each pipeline stage.

pub mod artifact;
pub mod indicator;
pub mod microdata;
pub mod traits;

pub use artifact::{
    COMPOSITE_ARTIFACT, CompositeArtifact, CompositeRow, IndexDomain, SubIndexArtifact,
    SubIndexRow,
};
pub use indicator::IndicatorSeries;
pub use microdata::{MicrodataBatch, MicrodataRecord, SurveyDomain};
pub use traits::ArrowSchema;
