//! Path utilities for survey data files

pub mod survey_year;

pub use survey_year::{extract_survey_year, find_survey_year_files};
