//! Table file operations
//!
//! Parquet and CSV files are both read into Arrow record batches so the rest of
//! the crate only ever sees `RecordBatch`es.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::log_table_read;

/// Default batch size for table reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Rows sampled when inferring a CSV schema
const CSV_INFERENCE_ROWS: usize = 1000;

/// On-disk table format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Apache Parquet
    Parquet,
    /// Comma-separated values with a header row
    Csv,
}

impl TableFormat {
    /// Detect the format of a path from its extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "parquet" => Some(Self::Parquet),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// File extension used when writing this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

fn unsupported(path: &Path) -> Error {
    Error::Schema(format!(
        "Unsupported table format (expected .parquet or .csv): {}",
        path.display()
    ))
}

/// Read a Parquet or CSV file into Arrow record batches
///
/// CSV schemas are inferred from the first rows of the file.
///
/// # Arguments
/// * `path` - Path to a `.parquet` or `.csv` file
///
/// # Returns
/// A vector of `RecordBatch` objects
pub fn read_table(path: &Path) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();

    let batches = match TableFormat::from_path(path) {
        Some(TableFormat::Parquet) => read_parquet(path)?,
        Some(TableFormat::Csv) => {
            let mut file = safe_open_file(path, "inferring csv schema")?;
            let (schema, _) = Format::default()
                .with_header(true)
                .infer_schema(&mut file, Some(CSV_INFERENCE_ROWS))?;
            file.seek(SeekFrom::Start(0))?;
            read_csv(file, Arc::new(schema))?
        }
        None => return Err(unsupported(path)),
    };

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_table_read(path, rows, start.elapsed());
    Ok(batches)
}

fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "reading parquet table")?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(batches)
}

fn read_csv(file: File, schema: SchemaRef) -> Result<Vec<RecordBatch>> {
    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(batches)
}

/// Write a record batch to a Parquet or CSV file, replacing any existing file
pub fn write_table(path: &Path, batch: &RecordBatch) -> Result<()> {
    let format = TableFormat::from_path(path).ok_or_else(|| unsupported(path))?;
    let file = File::create(path)?;

    match format {
        TableFormat::Parquet => {
            let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
            writer.write(batch)?;
            writer.close()?;
        }
        TableFormat::Csv => {
            let mut writer = WriterBuilder::new().with_header(true).build(file);
            writer.write(batch)?;
        }
    }

    log::debug!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

/// Find table files named `<stem>.parquet` or `<stem>.csv` in a directory
///
/// # Returns
/// Matching paths, Parquet first
#[must_use]
pub fn find_table_files(dir: &Path, stem: &str) -> Vec<PathBuf> {
    [TableFormat::Parquet, TableFormat::Csv]
        .into_iter()
        .map(|format| dir.join(format!("{stem}.{}", format.extension())))
        .filter(|path| path.is_file())
        .collect_vec()
}
