//! Property tests tying matrix construction, generation and conversion
//! together.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use std::num::NonZeroU32;

use adjacency_core::{Graph, Matrix, MatrixBuilder, ShapeError, SymmetryPolicy};
use proptest::prelude::*;

fn rectangular() -> impl Strategy<Value = Vec<Vec<i64>>> {
    (0_usize..6, 0_usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(-3_i64..4, cols), rows)
    })
}

fn square() -> impl Strategy<Value = Vec<Vec<i64>>> {
    (0_usize..7).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0_i64..3, n), n)
    })
}

fn policy() -> impl Strategy<Value = SymmetryPolicy> {
    prop_oneof![
        Just(SymmetryPolicy::Either),
        Just(SymmetryPolicy::Both),
        Just(SymmetryPolicy::Upper),
        Just(SymmetryPolicy::Lower),
    ]
}

proptest! {
    #[test]
    fn nested_input_is_preserved(data in rectangular()) {
        let matrix = Matrix::from_nested(data.clone()).expect("rectangular input");
        prop_assert_eq!(matrix.rows(), data.len());
        prop_assert_eq!(matrix.to_nested(), data);
    }

    #[test]
    fn ragged_input_names_first_bad_row(
        cols in 1_usize..5,
        good in 0_usize..4,
        short in 0_usize..5,
    ) {
        prop_assume!(short != cols);
        let mut data = vec![vec![0_i64; cols]; good + 1];
        data.push(vec![1; short]);
        data.push(vec![2; cols + 1]);
        let err = Matrix::from_nested(data).expect_err("ragged input must fail");
        prop_assert_eq!(
            err,
            ShapeError::NonRectangular { row: good + 1, expected: cols, actual: short }
        );
    }

    #[test]
    fn generated_cells_respect_bound(
        rows in 0_usize..12,
        cols in 0_usize..12,
        upper in 1_u32..50,
        seed in any::<u64>(),
    ) {
        let builder = MatrixBuilder::new()
            .with_shape(rows, cols)
            .with_upper_bound(NonZeroU32::new(upper).expect("strategy excludes zero"))
            .with_seed(seed);
        let matrix = builder.random().expect("small shapes fit");
        prop_assert_eq!(matrix.shape(), (rows, cols));
        prop_assert!(matrix.as_slice().iter().all(|&cell| (0..i64::from(upper)).contains(&cell)));
        prop_assert_eq!(builder.random().expect("small shapes fit"), matrix);
    }

    #[test]
    fn graph_edges_match_policy(data in square(), policy in policy()) {
        let matrix = Matrix::from_nested(data).expect("square input");
        let graph = Graph::from_adjacency(&matrix, policy).expect("square converts");
        let n = matrix.rows();
        prop_assert_eq!(graph.node_count(), n);
        for a in 0..n {
            for b in a..n {
                let upper = matrix.get(a, b).expect("in bounds") != 0;
                let lower = matrix.get(b, a).expect("in bounds") != 0;
                let expected = match policy {
                    SymmetryPolicy::Either => upper || lower,
                    SymmetryPolicy::Both => upper && lower,
                    SymmetryPolicy::Upper => upper,
                    SymmetryPolicy::Lower => lower,
                };
                prop_assert_eq!(graph.contains_edge(a, b), expected, "pair ({}, {})", a, b);
            }
        }
    }

    #[test]
    fn symmetric_matrices_ignore_policy(data in square(), policy in policy()) {
        let matrix = Matrix::from_nested(data).expect("square input");
        let n = matrix.rows();
        let mirrored: Vec<Vec<i64>> = (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| matrix.get(r.min(c), r.max(c)).expect("in bounds"))
                    .collect()
            })
            .collect();
        let symmetric = Matrix::from_nested(mirrored).expect("square input");
        let baseline = Graph::from_adjacency(&symmetric, SymmetryPolicy::Either)
            .expect("square converts");
        let graph = Graph::from_adjacency(&symmetric, policy).expect("square converts");
        prop_assert_eq!(graph, baseline);
    }

    #[test]
    fn non_square_shapes_are_rejected(rows in 0_usize..6, cols in 0_usize..6) {
        prop_assume!(rows != cols);
        let matrix = MatrixBuilder::new()
            .with_shape(rows, cols)
            .with_seed(0)
            .random()
            .expect("small shapes fit");
        let err = Graph::from_adjacency(&matrix, SymmetryPolicy::Either)
            .expect_err("non-square must fail");
        prop_assert_eq!(err, ShapeError::NotSquare { rows, cols });
    }
}
