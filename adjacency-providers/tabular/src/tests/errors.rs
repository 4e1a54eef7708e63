use super::TabularError;
use adjacency_core::ShapeError;
use arrow_schema::{ArrowError, DataType};
use parquet::errors::ParquetError;
use rstest::rstest;
use std::io;

#[rstest]
#[case::arrow(TabularError::from(ArrowError::ParseError("boom".into())), "arrow error: Parser error: boom")]
#[case::parquet(TabularError::from(ParquetError::General("boom".into())), "parquet error: Parquet error: boom")]
#[case::io(TabularError::from(io::Error::other("boom")), "i/o error: boom")]
#[case::shape(
    TabularError::from(ShapeError::LengthMismatch { expected: 4, actual: 3 }),
    "shape error: row-major buffer has 3 values but the shape requires 4",
)]
fn conversions_keep_the_source_message(#[case] err: TabularError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn column_errors_name_the_column() {
    let unsupported = TabularError::UnsupportedColumnType {
        column: "weight".to_owned(),
        actual: DataType::Float64,
    };
    assert!(unsupported.to_string().contains("`weight`"));
    let null = TabularError::NullValue {
        row: 4,
        column: "2".to_owned(),
    };
    assert_eq!(null.to_string(), "row 4 has a null value in column `2`");
}
