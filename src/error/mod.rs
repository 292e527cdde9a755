//! Error handling for the index engine.
//!
//! Per-year failures (`Domain`, `InsufficientData`) carry the offending year so a
//! calculator can log them and continue with the next year. Everything else is
//! fatal for the operation that raised it.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for the index engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty or non-positive sample passed to a geometric-mean step
    #[error("Domain error{}: {message}", fmt_year(*year))]
    Domain {
        /// Year being computed, when known
        year: Option<i32>,
        /// What made the sample invalid
        message: String,
    },

    /// Microdata for a year lacks enough distinct observations
    #[error("Insufficient data{}: {message}", fmt_year(*year))]
    InsufficientData {
        /// Year being computed, when known
        year: Option<i32>,
        /// Which observations were missing
        message: String,
    },

    /// An upstream artifact is absent from the store
    #[error("Prerequisite stage missing: artifact '{artifact}' has not been produced")]
    MissingPrerequisite {
        /// Name of the missing artifact
        artifact: String,
    },

    /// Invalid or unsupported configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required column is not present in a table
    #[error("Column not found: {column}")]
    ColumnNotFound {
        /// Column name that was looked up
        column: String,
    },

    /// A column could not be read as the expected type
    #[error("Invalid data type for column '{column}': expected {expected}")]
    InvalidDataType {
        /// Column name
        column: String,
        /// Human-readable expected type
        expected: String,
    },

    /// A table does not have the expected shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting between typed rows and record batches
    #[error("Serialization error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn fmt_year(year: Option<i32>) -> String {
    year.map(|y| format!(" for year {y}")).unwrap_or_default()
}

impl Error {
    /// Create a domain error for a given year
    pub fn domain(year: Option<i32>, message: impl Into<String>) -> Self {
        Self::Domain {
            year,
            message: message.into(),
        }
    }

    /// Create an insufficient-data error for a given year
    pub fn insufficient_data(year: Option<i32>, message: impl Into<String>) -> Self {
        Self::InsufficientData {
            year,
            message: message.into(),
        }
    }

    /// Attach a year to a per-year error that does not carry one yet
    #[must_use]
    pub fn for_year(self, year: i32) -> Self {
        match self {
            Self::Domain { year: None, message } => Self::Domain {
                year: Some(year),
                message,
            },
            Self::InsufficientData { year: None, message } => Self::InsufficientData {
                year: Some(year),
                message,
            },
            other => other,
        }
    }

    /// Year the error is attached to, if any
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Domain { year, .. } | Self::InsufficientData { year, .. } => *year,
            _ => None,
        }
    }

    /// Whether the error only invalidates a single year of one sub-index
    #[must_use]
    pub fn is_per_year(&self) -> bool {
        matches!(self, Self::Domain { .. } | Self::InsufficientData { .. })
    }
}

/// Result type for index engine operations
pub type Result<T> = std::result::Result<T, Error>;
