//! Unified error type for matrix construction and operations.
//!
//! Every variant corresponds to a contract violation at the call site; none
//! of them are retried or recovered internally, and a failed construction
//! never leaves a partially populated value behind.

use symmat_expr::{ExprError, LinAlgError};
use thiserror::Error;

/// Errors surfaced by the matrix layer.
#[derive(Error, Debug)]
pub enum MatrixError {
    /// Constructor arguments did not match any supported call shape.
    #[error("invalid construction arguments: {0}")]
    InvalidConstructionArgs(String),

    /// Zero-argument construction was requested without a fixed shape.
    #[error("cannot default-construct a matrix without a fixed shape")]
    ShapeRequired,

    /// Flat data length disagrees with the resolved element count.
    #[error("data length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Rows of nested data or stacked vectors disagree in size.
    #[error("inconsistent columns: {0}")]
    InconsistentColumns(String),

    /// Block grid rows disagree in height or total width.
    #[error("inconsistent block shape: {0}")]
    InconsistentBlockShape(String),

    /// Nested construction data contained matrices.
    #[error("nested construction data contains matrices; use block_matrix")]
    UseBlockConstructor,

    /// The operation requires a row or column vector.
    #[error("operation requires a vector, got shape {rows}x{cols}")]
    NotAVector { rows: usize, cols: usize },

    /// The operation is undefined for this shape.
    #[error("{op} is not supported for shape {rows}x{cols}")]
    UnsupportedShape {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Inversion or division hit a singular matrix; surfaced from the
    /// expression engine, never detected locally.
    #[error("division by a non-invertible matrix")]
    DivisionByNonInvertible(#[source] LinAlgError),

    /// A scalar-level engine operation failed.
    #[error(transparent)]
    Engine(#[from] ExprError),
}

/// Convenience alias used throughout `symmat-core`.
pub type Result<T> = std::result::Result<T, MatrixError>;
