use super::{TabularError, support::matrix};
use crate::{convert_parquet_to_csv, read_csv_path, write_parquet_path};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
fn conversion_writes_csv_beside_input() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("graph.parquet");
    let original = matrix(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    write_parquet_path(&original, &source).expect("write parquet");

    let destination = convert_parquet_to_csv(&source).expect("convert");

    assert_eq!(destination, dir.path().join("graph.csv"));
    assert_eq!(read_csv_path(&destination).expect("read csv"), original);
}

#[rstest]
fn conversion_refuses_to_overwrite_its_input() {
    let dir = TempDir::new().expect("tempdir");
    let source = dir.path().join("graph.csv");
    let err = convert_parquet_to_csv(&source).expect_err("same destination");
    assert!(matches!(err, TabularError::SameDestination { ref path } if path == &source));
}
