//! Parquet input and output.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use adjacency_core::Matrix;
use parquet::arrow::{ArrowWriter, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use tracing::{Span, field, instrument};

use crate::errors::TabularError;
use crate::ingest::{append_batch, matrix_to_batch, validate_schema};

/// Reads a Parquet file into a [`Matrix`].
///
/// # Errors
/// See [`read_parquet`]; opening the file may also fail with
/// [`TabularError::Io`].
pub fn read_parquet_path(path: &Path) -> Result<Matrix, TabularError> {
    read_parquet(File::open(path)?)
}

/// Reads Parquet data into a [`Matrix`].
///
/// Columns are taken in schema order; their names are ignored. Every
/// column must hold a signed integer type or an unsigned type narrower
/// than 64 bits.
///
/// # Errors
/// Returns [`TabularError::EmptyHeader`] for a schema without columns,
/// [`TabularError::UnsupportedColumnType`] for non-integer columns and
/// [`TabularError::NullValue`] for null cells.
#[instrument(
    name = "tabular.read_parquet",
    err,
    skip_all,
    fields(rows = field::Empty, cols = field::Empty),
)]
pub fn read_parquet<R>(reader: R) -> Result<Matrix, TabularError>
where
    R: ChunkReader + 'static,
{
    let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
    let cols = validate_schema(builder.schema())?;
    let mut values = Vec::new();
    let mut rows = 0_usize;
    for decoded in builder.build()? {
        rows += append_batch(&decoded?, rows, &mut values)?;
    }
    let span = Span::current();
    span.record("rows", rows);
    span.record("cols", cols);
    Ok(Matrix::from_row_major(rows, cols, values)?)
}

/// Writes `matrix` as Parquet with `Int64` columns named `0..cols`.
///
/// # Errors
/// Returns [`TabularError::EmptyHeader`] for a matrix without columns and
/// [`TabularError::Parquet`] when encoding fails.
#[instrument(
    name = "tabular.write_parquet",
    err,
    skip_all,
    fields(rows = matrix.rows(), cols = matrix.cols()),
)]
pub fn write_parquet<W: Write + Send>(matrix: &Matrix, writer: W) -> Result<(), TabularError> {
    let batch = matrix_to_batch(matrix)?;
    let mut encoder = ArrowWriter::try_new(writer, batch.schema(), None)?;
    encoder.write(&batch)?;
    encoder.close()?;
    Ok(())
}

/// Writes `matrix` as Parquet to `path`, replacing any existing file.
///
/// # Errors
/// See [`write_parquet`]; creating the file may also fail with
/// [`TabularError::Io`].
pub fn write_parquet_path(matrix: &Matrix, path: &Path) -> Result<(), TabularError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_parquet(matrix, &mut out)?;
    out.flush()?;
    Ok(())
}
