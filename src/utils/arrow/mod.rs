//! Arrow data handling utilities
//!
//! Helpers for locating columns by name and reading them as typed vectors,
//! casting from whatever physical type the source file used.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{conform_to_schema, downcast_array, find_column, get_column};
pub use extractors::{extract_f64_column, extract_i64_column, extract_string_column};
