use super::{TabularError, TabularFormat, support::{matrix, parquet_bytes}};
use crate::{read_parquet, read_parquet_path, write_parquet};
use arrow_array::{ArrayRef, Float64Array, Int16Array, Int64Array};
use arrow_schema::{DataType, Field};
use bytes::Bytes;
use rstest::rstest;
use std::sync::Arc;
use tempfile::TempDir;

#[rstest]
fn written_parquet_reads_back_identically() {
    let original = matrix(vec![vec![0, 1], vec![1, 0], vec![5, 5]]);
    let mut buffer = Vec::new();
    write_parquet(&original, &mut buffer).expect("write parquet");
    let parsed = read_parquet(Bytes::from(buffer)).expect("read parquet");
    assert_eq!(parsed, original);
}

#[rstest]
fn narrow_integer_columns_are_widened() {
    let bytes = parquet_bytes(vec![
        (
            Field::new("a", DataType::Int16, false),
            Arc::new(Int16Array::from(vec![1_i16, -2])) as ArrayRef,
        ),
        (
            Field::new("b", DataType::Int64, false),
            Arc::new(Int64Array::from(vec![3_i64, 4])) as ArrayRef,
        ),
    ]);
    let parsed = read_parquet(bytes).expect("integer columns");
    assert_eq!(parsed, matrix(vec![vec![1, 3], vec![-2, 4]]));
}

#[rstest]
fn float_columns_are_rejected() {
    let bytes = parquet_bytes(vec![(
        Field::new("weight", DataType::Float64, false),
        Arc::new(Float64Array::from(vec![0.5])) as ArrayRef,
    )]);
    let err = read_parquet(bytes).expect_err("float column");
    assert!(matches!(
        err,
        TabularError::UnsupportedColumnType { ref column, actual: DataType::Float64 }
            if column == "weight"
    ));
}

#[rstest]
fn null_cells_are_rejected() {
    let bytes = parquet_bytes(vec![(
        Field::new("0", DataType::Int64, true),
        Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef,
    )]);
    let err = read_parquet(bytes).expect_err("null cell");
    assert!(matches!(err, TabularError::NullValue { row: 1, .. }));
}

#[rstest]
fn garbage_is_a_parquet_error() {
    let err = read_parquet(Bytes::from_static(b"not a parquet file")).expect_err("garbage");
    assert!(matches!(err, TabularError::Parquet(_)));
}

#[rstest]
fn format_dispatch_writes_parquet() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("m.parquet");
    let original = matrix(vec![vec![2, 0], vec![0, 2]]);
    let format = TabularFormat::from_path(&path);
    assert_eq!(format, TabularFormat::Parquet);
    format.write_path(&original, &path).expect("write parquet");
    assert_eq!(read_parquet_path(&path).expect("read parquet"), original);
}
