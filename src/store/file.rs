//! Directory-backed artifact store, one file per artifact

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::error::util::ensure_directory;
use crate::error::{Error, Result};
use crate::store::{ArtifactStore, missing};
use crate::utils::io::{TableFormat, read_table, write_table};

/// Artifact store writing `<directory>/<name>.<ext>` files
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
    format: TableFormat,
}

impl FileStore {
    /// Open a store in a directory, creating it if needed
    ///
    /// # Errors
    /// `Configuration` when the directory cannot be created or the path is not
    /// a directory.
    pub fn new(directory: &Path, format: TableFormat) -> Result<Self> {
        ensure_directory(directory).map_err(|e| match e {
            Error::Configuration(message) => Error::Configuration(message),
            other => Error::Configuration(format!(
                "Cannot use {} as artifact directory: {other}",
                directory.display()
            )),
        })?;
        Ok(Self {
            directory: directory.to_path_buf(),
            format,
        })
    }

    /// Path of an artifact's file
    #[must_use]
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.directory
            .join(format!("{name}.{}", self.format.extension()))
    }
}

impl ArtifactStore for FileStore {
    fn describe(&self) -> String {
        format!(
            "{} files in {}",
            self.format.extension(),
            self.directory.display()
        )
    }

    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.artifact_path(name).is_file())
    }

    fn read_artifact(&self, name: &str) -> Result<Vec<RecordBatch>> {
        let path = self.artifact_path(name);
        if !path.is_file() {
            return Err(missing(name));
        }
        read_table(&path)
    }

    fn write_artifact(&self, name: &str, batch: &RecordBatch) -> Result<()> {
        write_table(&self.artifact_path(name), batch)
    }
}
