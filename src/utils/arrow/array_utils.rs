//! Utilities for working with Arrow arrays.
//!
//! Column lookup is case-insensitive because survey extracts are published with
//! both upper- and lower-case headers depending on the release channel.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Find the index of a column by name, ignoring ASCII case
#[must_use]
pub fn find_column(batch: &RecordBatch, column_name: &str) -> Option<usize> {
    let schema = batch.schema();
    schema
        .index_of(column_name)
        .ok()
        .or_else(|| {
            schema
                .fields()
                .iter()
                .position(|f| f.name().eq_ignore_ascii_case(column_name))
        })
}

/// Get a column from a record batch, cast to the expected data type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller will downcast to
/// * `required` - Whether a missing column is an error or `None`
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column, converted if necessary
/// * `Ok(None)` - The column is absent and not required
/// * `Err(Error)` - The column is required and absent, or cannot be cast
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Some(idx) = find_column(batch, column_name) else {
        if required {
            return Err(Error::ColumnNotFound {
                column: column_name.to_string(),
            });
        }
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    let converted = cast(column, expected_type).map_err(|_| Error::InvalidDataType {
        column: column_name.to_string(),
        expected: format!("{expected_type:?}"),
    })?;
    Ok(Some(converted))
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| Error::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Project and cast a record batch onto an expected schema
///
/// Every expected column must be present (case-insensitive) and castable to its
/// expected type; non-nullable columns must not contain nulls. Extra columns are
/// dropped.
pub fn conform_to_schema(batch: &RecordBatch, schema: &Schema) -> Result<RecordBatch> {
    let columns = schema
        .fields()
        .iter()
        .map(|field| {
            let column = get_column(batch, field.name(), field.data_type(), true)?
                .ok_or_else(|| Error::ColumnNotFound {
                    column: field.name().clone(),
                })?;
            if !field.is_nullable() && column.null_count() > 0 {
                return Err(Error::Schema(format!(
                    "Column '{}' must not contain nulls ({} found)",
                    field.name(),
                    column.null_count()
                )));
            }
            Ok(column)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}
