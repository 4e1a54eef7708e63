//! CSV input and output.
//!
//! The first line is always a header. Reading takes the column count from it
//! and ignores the names; writing emits `0,1,…` so output reads back as-is.
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use adjacency_core::Matrix;
use arrow_csv::{ReaderBuilder, WriterBuilder, reader::Format};
use tracing::{Span, field, instrument};

use crate::errors::TabularError;
use crate::ingest::{append_batch, int64_schema, matrix_to_batch};

/// Reads a CSV file into a [`Matrix`].
///
/// # Errors
/// See [`read_csv`]; opening the file may also fail with
/// [`TabularError::Io`].
pub fn read_csv_path(path: &Path) -> Result<Matrix, TabularError> {
    read_csv(BufReader::new(File::open(path)?))
}

/// Reads CSV text into a [`Matrix`].
///
/// The reader is rewound once after the header has been inspected.
///
/// An empty header line followed only by empty lines reads as a matrix
/// with no columns and one row per empty line.
///
/// # Errors
/// Returns [`TabularError::EmptyHeader`] when the input has no header,
/// [`TabularError::NullValue`] for empty cells and
/// [`TabularError::Arrow`] when a cell is not an integer or a row has the
/// wrong number of fields.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use adjacency_providers_tabular::read_csv;
///
/// let matrix = read_csv(Cursor::new("a,b\n0,1\n1,0\n"))?;
/// assert_eq!(matrix.to_nested(), vec![vec![0, 1], vec![1, 0]]);
/// # Ok::<(), adjacency_providers_tabular::TabularError>(())
/// ```
#[instrument(
    name = "tabular.read_csv",
    err,
    skip_all,
    fields(rows = field::Empty, cols = field::Empty),
)]
pub fn read_csv<R: Read + Seek>(mut reader: R) -> Result<Matrix, TabularError> {
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut reader, Some(0))?;
    let cols = header.fields().len();
    reader.seek(SeekFrom::Start(0))?;
    if cols == 0 {
        let rows = count_columnless_rows(reader)?;
        record_shape(rows, cols);
        return Ok(Matrix::from_row_major(rows, cols, Vec::new())?);
    }
    let batches = ReaderBuilder::new(int64_schema(cols))
        .with_header(true)
        .build(reader)?;
    let mut values = Vec::new();
    let mut rows = 0_usize;
    for decoded in batches {
        rows += append_batch(&decoded?, rows, &mut values)?;
    }
    record_shape(rows, cols);
    Ok(Matrix::from_row_major(rows, cols, values)?)
}

fn record_shape(rows: usize, cols: usize) {
    let span = Span::current();
    span.record("rows", rows);
    span.record("cols", cols);
}

/// Counts the rows of a CSV whose header and rows are all empty lines.
fn count_columnless_rows<R: Read>(mut reader: R) -> Result<usize, TabularError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if text.is_empty() || text.lines().any(|line| !line.trim().is_empty()) {
        return Err(TabularError::EmptyHeader);
    }
    Ok(text.lines().count().saturating_sub(1))
}

/// Writes `matrix` as CSV with a `0,1,…` header.
///
/// A matrix without columns is written as an empty header line followed by
/// one empty line per row, which [`read_csv`] reads back unchanged.
///
/// # Errors
/// Returns [`TabularError::Arrow`] when encoding or writing fails and
/// [`TabularError::Io`] when writing a matrix without columns fails.
///
/// # Examples
/// ```
/// use adjacency_core::Matrix;
/// use adjacency_providers_tabular::write_csv;
///
/// let matrix = Matrix::from_nested(vec![vec![0, 2], vec![2, 0]])?;
/// let mut out = Vec::new();
/// write_csv(&matrix, &mut out)?;
/// assert_eq!(String::from_utf8_lossy(&out), "0,1\n0,2\n2,0\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "tabular.write_csv",
    err,
    skip_all,
    fields(rows = matrix.rows(), cols = matrix.cols()),
)]
pub fn write_csv<W: Write>(matrix: &Matrix, mut writer: W) -> Result<(), TabularError> {
    if matrix.cols() == 0 {
        return write_columnless(matrix.rows(), &mut writer);
    }
    let batch = matrix_to_batch(matrix)?;
    let mut csv = WriterBuilder::new().with_header(true).build(writer);
    csv.write(&batch)?;
    Ok(())
}

/// Writes `matrix` as CSV to `path`, replacing any existing file.
///
/// # Errors
/// See [`write_csv`]; creating or flushing the file may also fail with
/// [`TabularError::Io`].
pub fn write_csv_path(matrix: &Matrix, path: &Path) -> Result<(), TabularError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_csv(matrix, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes the empty header line and one empty line per row.
fn write_columnless<W: Write>(rows: usize, writer: &mut W) -> Result<(), TabularError> {
    writer.write_all(b"\n")?;
    for _ in 0..rows {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
