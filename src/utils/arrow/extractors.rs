//! Field extraction utilities for Arrow record batches
//!
//! Whole-column extraction into `Vec<Option<T>>`, the shape the calculators
//! consume. Nulls (and values that do not survive the cast) become `None`.

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::array_utils::{downcast_array, get_column};

/// Extract an integer column
///
/// # Returns
///
/// * `Ok(Some(values))` - One entry per row
/// * `Ok(None)` - The column is absent and not required
pub fn extract_i64_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<i64>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Int64, required)? else {
        return Ok(None);
    };
    let values = downcast_array::<Int64Array>(&array, column_name, "Int64")?;
    Ok(Some(values.iter().collect()))
}

/// Extract a floating point column
pub fn extract_f64_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<f64>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Float64, required)? else {
        return Ok(None);
    };
    let values = downcast_array::<Float64Array>(&array, column_name, "Float64")?;
    Ok(Some(values.iter().collect()))
}

/// Extract a string column
pub fn extract_string_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<Vec<Option<String>>>> {
    let Some(array) = get_column(batch, column_name, &DataType::Utf8, required)? else {
        return Ok(None);
    };
    let values = downcast_array::<StringArray>(&array, column_name, "String")?;
    Ok(Some(
        (0..values.len())
            .map(|i| (!values.is_null(i)).then(|| values.value(i).to_string()))
            .collect(),
    ))
}
