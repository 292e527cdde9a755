//! Traits shared by the tabular models

use arrow::datatypes::{FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::utils::arrow::conform_to_schema;

/// A row type with a fixed Arrow schema.
///
/// Conversion goes through `serde_arrow` using the declared schema, so the
/// column order and types in persisted artifacts never depend on sample data.
pub trait ArrowSchema: Sized + Serialize + DeserializeOwned {
    /// Get the Arrow schema for this row type
    fn schema() -> Schema;

    /// Convert rows to a `RecordBatch`
    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch> {
        let fields: Vec<FieldRef> = Self::schema().fields().iter().cloned().collect();
        Ok(serde_arrow::to_record_batch(&fields, &rows)?)
    }

    /// Convert a `RecordBatch` to rows, validating its shape first
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let conformed = conform_to_schema(batch, &Self::schema())?;
        Ok(serde_arrow::from_record_batch(&conformed)?)
    }

    /// Convert several batches of the same table to rows
    fn from_record_batches(batches: &[RecordBatch]) -> Result<Vec<Self>> {
        let mut rows = Vec::new();
        for batch in batches {
            rows.extend(Self::from_record_batch(batch)?);
        }
        Ok(rows)
    }
}
