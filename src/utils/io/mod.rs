//! IO utilities for file operations
//!
//! Reading and writing Parquet and CSV tables, and locating yearly microdata
//! files by name.

pub mod paths;
pub mod table;

pub use paths::{extract_survey_year, find_survey_year_files};
pub use table::{TableFormat, find_table_files, read_table, write_table};
