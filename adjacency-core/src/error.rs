//! Error types for the adjacency core library.
//!
//! Defines the shape error exposed by the public API, its stable error codes
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A matrix did not have the shape an operation requires.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ShapeError {
    /// A nested sequence had rows of differing lengths.
    #[error("row {row} has length {actual} but expected {expected}")]
    NonRectangular {
        /// Index of the first row whose length differs from row 0.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// An adjacency matrix must have as many rows as columns.
    #[error("adjacency matrix not square: nx,ny=({rows}, {cols})")]
    NotSquare {
        /// Number of rows in the rejected matrix.
        rows: usize,
        /// Number of columns in the rejected matrix.
        cols: usize,
    },
    /// A flat row-major buffer did not hold `rows * cols` values.
    #[error("row-major buffer has {actual} values but the shape requires {expected}")]
    LengthMismatch {
        /// Number of values implied by the declared shape.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// The requested shape holds more cells than the address space allows.
    #[error("matrix with {rows} rows and {cols} columns exceeds capacity limits")]
    CapacityOverflow {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ShapeError`] variants.
    enum ShapeErrorCode for ShapeError {
        /// A nested sequence had rows of differing lengths.
        NonRectangular => NonRectangular { .. } => "SHAPE_NON_RECTANGULAR",
        /// An adjacency matrix must have as many rows as columns.
        NotSquare => NotSquare { .. } => "SHAPE_NOT_SQUARE",
        /// A flat row-major buffer did not hold `rows * cols` values.
        LengthMismatch => LengthMismatch { .. } => "SHAPE_LENGTH_MISMATCH",
        /// The requested shape holds more cells than the address space allows.
        CapacityOverflow => CapacityOverflow { .. } => "SHAPE_CAPACITY_OVERFLOW",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ShapeError>;
