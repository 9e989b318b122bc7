//! Error plumbing shared by the colonet components.
//!
//! Every component owns its own error enum so a failure in one computation
//! never leaks into another. Each enum carries a stable machine-readable code
//! generated by [`define_error_codes!`], which the CLI attaches to its log
//! records.

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

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
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

pub(crate) use define_error_codes;

/// Shape errors raised while validating an adjacency matrix.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// The matrix has no rows.
    #[error("matrix must contain at least one row")]
    Empty,
    /// A row length differs from the number of rows.
    #[error("row {row} has {len} entries but the matrix has {expected} rows")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Expected row length (the row count).
        expected: usize,
    },
    /// A distance matrix has a non-zero self-distance.
    #[error("self-distance of node {index} must be 0 (got {value})")]
    NonZeroDiagonal {
        /// The node whose diagonal entry is non-zero.
        index: usize,
        /// The offending diagonal value.
        value: u32,
    },
}

define_error_codes! {
    /// Stable codes describing [`MatrixError`] variants.
    enum MatrixErrorCode for MatrixError {
        /// The matrix has no rows.
        Empty => Empty => "MATRIX_EMPTY",
        /// A row length differs from the number of rows.
        NotSquare => NotSquare { .. } => "MATRIX_NOT_SQUARE",
        /// A distance matrix has a non-zero self-distance.
        NonZeroDiagonal => NonZeroDiagonal { .. } => "MATRIX_NON_ZERO_DIAGONAL",
    }
}
