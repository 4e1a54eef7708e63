//! Helpers moving cells between Arrow record batches and row-major buffers.
use std::sync::Arc;

use adjacency_core::Matrix;
use arrow_array::{
    Array, ArrayRef, Int64Array, RecordBatch,
    cast::AsArray,
    types::{Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type, UInt16Type, UInt32Type},
};
use arrow_schema::{DataType, Field, Schema, SchemaRef};

use crate::errors::TabularError;

/// Builds the all-`Int64` schema used for every matrix we write, with
/// columns named `0..cols`.
pub(crate) fn int64_schema(cols: usize) -> SchemaRef {
    let fields: Vec<Field> = (0..cols)
        .map(|index| Field::new(index.to_string(), DataType::Int64, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Checks that every column widens losslessly to `i64`.
pub(crate) fn validate_schema(schema: &Schema) -> Result<usize, TabularError> {
    if schema.fields().is_empty() {
        return Err(TabularError::EmptyHeader);
    }
    for field in schema.fields() {
        if !widens_to_i64(field.data_type()) {
            return Err(TabularError::UnsupportedColumnType {
                column: field.name().clone(),
                actual: field.data_type().clone(),
            });
        }
    }
    Ok(schema.fields().len())
}

const fn widens_to_i64(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
    )
}

fn cell(array: &dyn Array, row: usize) -> Option<i64> {
    match array.data_type() {
        DataType::Int8 => array
            .as_primitive_opt::<Int8Type>()
            .map(|values| i64::from(values.value(row))),
        DataType::Int16 => array
            .as_primitive_opt::<Int16Type>()
            .map(|values| i64::from(values.value(row))),
        DataType::Int32 => array
            .as_primitive_opt::<Int32Type>()
            .map(|values| i64::from(values.value(row))),
        DataType::Int64 => array
            .as_primitive_opt::<Int64Type>()
            .map(|values| values.value(row)),
        DataType::UInt8 => array
            .as_primitive_opt::<UInt8Type>()
            .map(|values| i64::from(values.value(row))),
        DataType::UInt16 => array
            .as_primitive_opt::<UInt16Type>()
            .map(|values| i64::from(values.value(row))),
        DataType::UInt32 => array
            .as_primitive_opt::<UInt32Type>()
            .map(|values| i64::from(values.value(row))),
        _ => None,
    }
}

/// Appends the rows of `batch` to `out` in row-major order and returns how
/// many rows were appended.
///
/// `start_row` is the absolute index of the batch's first row and only
/// feeds error messages.
pub(crate) fn append_batch(
    batch: &RecordBatch,
    start_row: usize,
    out: &mut Vec<i64>,
) -> Result<usize, TabularError> {
    let schema = batch.schema();
    let rows = batch.num_rows();
    out.reserve(rows.saturating_mul(batch.num_columns()));
    for row in 0..rows {
        for (field, column) in schema.fields().iter().zip(batch.columns()) {
            let present = if column.is_null(row) {
                None
            } else {
                cell(column.as_ref(), row)
            };
            let Some(value) = present else {
                return Err(TabularError::NullValue {
                    row: start_row.saturating_add(row),
                    column: field.name().clone(),
                });
            };
            out.push(value);
        }
    }
    Ok(rows)
}

/// Converts `matrix` into a single batch using [`int64_schema`].
pub(crate) fn matrix_to_batch(matrix: &Matrix) -> Result<RecordBatch, TabularError> {
    if matrix.cols() == 0 {
        return Err(TabularError::EmptyHeader);
    }
    let columns: Vec<ArrayRef> = (0..matrix.cols())
        .map(|col| {
            let values = matrix
                .rows_iter()
                .map(|row| row.get(col).copied().unwrap_or_default());
            Arc::new(Int64Array::from_iter_values(values)) as ArrayRef
        })
        .collect();
    Ok(RecordBatch::try_new(int64_schema(matrix.cols()), columns)?)
}
