//! Builder utilities for producing [`Matrix`] values.
//!
//! [`MatrixBuilder`] configures the random generator used to synthesise test
//! matrices and also offers the nested-list entry point, so both ways of
//! obtaining a matrix live behind one type.

use std::num::NonZeroU32;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{
    Result,
    error::ShapeError,
    matrix::{Matrix, cell_count},
};

const DEFAULT_ROWS: usize = 5;
const DEFAULT_COLS: usize = 5;
const DEFAULT_UPPER_BOUND: NonZeroU32 = match NonZeroU32::new(2) {
    Some(bound) => bound,
    None => NonZeroU32::MIN,
};

/// Configures and produces [`Matrix`] instances.
///
/// Random cells are drawn independently from `[0, upper_bound)`. When a seed
/// is configured the generator is a [`SmallRng`] seeded from it, so the same
/// configuration always yields the same matrix. Without a seed the generator
/// is seeded from operating-system entropy and every call differs.
///
/// # Examples
/// ```
/// use std::num::NonZeroU32;
/// use adjacency_core::MatrixBuilder;
///
/// let builder = MatrixBuilder::new()
///     .with_rows(5)
///     .with_cols(5)
///     .with_upper_bound(NonZeroU32::new(2).expect("non-zero"))
///     .with_seed(0);
/// let first = builder.random()?;
/// let second = builder.random()?;
/// assert_eq!(first.shape(), (5, 5));
/// assert!(first.as_slice().iter().all(|value| (0..2).contains(value)));
/// assert_eq!(first, second);
/// # Ok::<(), adjacency_core::ShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixBuilder {
    rows: usize,
    cols: usize,
    upper_bound: NonZeroU32,
    seed: Option<u64>,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            upper_bound: DEFAULT_UPPER_BOUND,
            seed: None,
        }
    }
}

impl MatrixBuilder {
    /// Creates a builder populated with default parameters: a `5 × 5` matrix
    /// of cells in `[0, 2)` with no seed.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::MatrixBuilder;
    ///
    /// let builder = MatrixBuilder::new();
    /// assert_eq!((builder.rows(), builder.cols()), (5, 5));
    /// assert_eq!(builder.upper_bound().get(), 2);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from nested rows.
    ///
    /// Equivalent to [`Matrix::from_nested`]; exposed here so callers can
    /// reach both construction paths from the builder.
    ///
    /// # Errors
    /// Returns [`crate::ShapeError::NonRectangular`] when inner lengths differ.
    pub fn from_nested(data: Vec<Vec<i64>>) -> Result<Matrix> {
        Matrix::from_nested(data)
    }

    /// Overrides the number of rows to generate.
    #[must_use]
    pub const fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Overrides the number of columns to generate.
    #[must_use]
    pub const fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    /// Sets both dimensions at once.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::MatrixBuilder;
    ///
    /// let builder = MatrixBuilder::new().with_shape(3, 7);
    /// assert_eq!((builder.rows(), builder.cols()), (3, 7));
    /// ```
    #[must_use]
    pub const fn with_shape(self, rows: usize, cols: usize) -> Self {
        self.with_rows(rows).with_cols(cols)
    }

    /// Overrides the exclusive upper bound of generated cells.
    #[must_use]
    pub const fn with_upper_bound(mut self, upper_bound: NonZeroU32) -> Self {
        self.upper_bound = upper_bound;
        self
    }

    /// Seeds the generator so that output is reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clears any configured seed; generation then draws on OS entropy.
    #[must_use]
    pub const fn without_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Returns the configured row count.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the configured column count.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the configured exclusive upper bound.
    #[must_use]
    pub const fn upper_bound(&self) -> NonZeroU32 {
        self.upper_bound
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a random matrix from the current configuration.
    ///
    /// A zero row or column count yields an empty matrix.
    ///
    /// # Errors
    /// Returns [`crate::ShapeError::CapacityOverflow`] when `rows * cols` does
    /// not fit in `usize` or the cells cannot be allocated.
    #[instrument(
        name = "matrix.random",
        skip(self),
        fields(
            rows = self.rows,
            cols = self.cols,
            upper_bound = self.upper_bound.get(),
            seeded = self.seed.is_some(),
        ),
    )]
    pub fn random(&self) -> Result<Matrix> {
        let total = cell_count(self.rows, self.cols)?;
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let bound = self.upper_bound.get();
        let mut values = Vec::new();
        values
            .try_reserve_exact(total)
            .map_err(|_| ShapeError::CapacityOverflow {
                rows: self.rows,
                cols: self.cols,
            })?;
        values.extend((0..total).map(|_| i64::from(rng.gen_range(0..bound))));
        debug!(cells = total, "generated random matrix");
        Ok(Matrix::from_parts(self.rows, self.cols, values))
    }
}
