//! Shape error codes and messages.

use adjacency_core::{ShapeError, ShapeErrorCode};
use rstest::rstest;

#[rstest]
#[case(
    ShapeError::NonRectangular { row: 2, expected: 3, actual: 1 },
    ShapeErrorCode::NonRectangular,
    "SHAPE_NON_RECTANGULAR",
)]
#[case(
    ShapeError::NotSquare { rows: 2, cols: 3 },
    ShapeErrorCode::NotSquare,
    "SHAPE_NOT_SQUARE",
)]
#[case(
    ShapeError::LengthMismatch { expected: 4, actual: 3 },
    ShapeErrorCode::LengthMismatch,
    "SHAPE_LENGTH_MISMATCH",
)]
#[case(
    ShapeError::CapacityOverflow { rows: usize::MAX, cols: 2 },
    ShapeErrorCode::CapacityOverflow,
    "SHAPE_CAPACITY_OVERFLOW",
)]
fn returns_expected_shape_code(
    #[case] error: ShapeError,
    #[case] expected: ShapeErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(expected.to_string(), text);
}

#[rstest]
#[case(
    ShapeError::NotSquare { rows: 2, cols: 3 },
    "adjacency matrix not square: nx,ny=(2, 3)",
)]
#[case(
    ShapeError::NonRectangular { row: 1, expected: 2, actual: 1 },
    "row 1 has length 1 but expected 2",
)]
fn display_names_the_dimensions(#[case] error: ShapeError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}
