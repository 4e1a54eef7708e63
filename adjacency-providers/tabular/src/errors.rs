use std::path::PathBuf;

use adjacency_core::ShapeError;
use arrow_schema::{ArrowError, DataType};
use thiserror::Error;

/// Failure raised while reading or writing a tabular matrix.
#[derive(Debug, Error)]
pub enum TabularError {
    /// The input has no header or the matrix has no columns.
    #[error("table has no columns")]
    EmptyHeader,
    /// A column cannot be widened to `i64` without loss.
    #[error("column `{column}` has type {actual:?}, which does not widen losslessly to Int64")]
    UnsupportedColumnType {
        /// Column name from the schema.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// A cell is empty or null.
    #[error("row {row} has a null value in column `{column}`")]
    NullValue {
        /// Zero-based data row, not counting the header.
        row: usize,
        /// Column name from the schema.
        column: String,
    },
    /// Converting would overwrite the input file.
    #[error("refusing to overwrite `{}` with its own conversion", path.display())]
    SameDestination {
        /// Path shared by the input and the output.
        path: PathBuf,
    },
    /// The decoded cells do not form the declared shape.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
    /// CSV or Arrow decoding failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet decoding or encoding failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// File access failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
