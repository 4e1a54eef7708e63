//! CSV and Parquet adapters for [`adjacency_core::Matrix`].
//!
//! Readers take the column count from the table header and read every data
//! row as `i64` cells. Writers emit integer columns named `0..cols`.

mod columnar;
mod delimited;
mod errors;
mod ingest;

use std::{
    ffi::OsStr,
    fmt,
    path::{Path, PathBuf},
};

use adjacency_core::Matrix;
use tracing::{info, instrument};

pub use columnar::{read_parquet, read_parquet_path, write_parquet, write_parquet_path};
pub use delimited::{read_csv, read_csv_path, write_csv, write_csv_path};
pub use errors::TabularError;

/// On-disk encoding of a matrix.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum TabularFormat {
    /// Comma-separated text with a header line.
    #[default]
    Csv,
    /// Apache Parquet with one integer column per matrix column.
    Parquet,
}

impl TabularFormat {
    /// Picks a format from the file extension: `.parquet` and `.pq` select
    /// Parquet, anything else CSV.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use adjacency_providers_tabular::TabularFormat;
    ///
    /// assert_eq!(TabularFormat::from_path(Path::new("m.parquet")), TabularFormat::Parquet);
    /// assert_eq!(TabularFormat::from_path(Path::new("m.txt")), TabularFormat::Csv);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") || ext.eq_ignore_ascii_case("pq") => {
                Self::Parquet
            }
            _ => Self::Csv,
        }
    }

    /// Returns the conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Reads the matrix stored at `path` in this format.
    ///
    /// # Errors
    /// Propagates the error of the selected reader.
    pub fn read_path(self, path: &Path) -> Result<Matrix, TabularError> {
        match self {
            Self::Csv => read_csv_path(path),
            Self::Parquet => read_parquet_path(path),
        }
    }

    /// Writes `matrix` to `path` in this format.
    ///
    /// # Errors
    /// Propagates the error of the selected writer.
    pub fn write_path(self, matrix: &Matrix, path: &Path) -> Result<(), TabularError> {
        match self {
            Self::Csv => write_csv_path(matrix, path),
            Self::Parquet => write_parquet_path(matrix, path),
        }
    }
}

impl fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Converts a Parquet file into a CSV file beside it and returns the CSV
/// path, which is `source` with its extension replaced by `csv`.
///
/// # Errors
/// Returns [`TabularError::SameDestination`] when `source` already ends in
/// `.csv`, otherwise any error raised by [`read_parquet_path`] or
/// [`write_csv_path`].
#[instrument(name = "tabular.convert", err, skip_all, fields(source = %source.display()))]
pub fn convert_parquet_to_csv(source: &Path) -> Result<PathBuf, TabularError> {
    let destination = source.with_extension(TabularFormat::Csv.extension());
    if destination == source {
        return Err(TabularError::SameDestination { path: destination });
    }
    let matrix = read_parquet_path(source)?;
    write_csv_path(&matrix, &destination)?;
    info!(
        destination = %destination.display(),
        rows = matrix.rows(),
        cols = matrix.cols(),
        "converted parquet to csv"
    );
    Ok(destination)
}

#[cfg(test)]
mod tests;
