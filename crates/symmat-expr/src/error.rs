//! Error types for the expression engine.

use thiserror::Error;

/// Errors from scalar expression operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Differentiation is only defined with respect to a symbol.
    #[error("cannot differentiate with respect to non-symbol expression `{0}`")]
    NotASymbol(String),

    /// Numeric evaluation reached a symbol with no numeric value.
    #[error("expression contains free symbol `{0}` and cannot be evaluated numerically")]
    FreeSymbol(String),
}

/// Errors from the engine's matrix decomposition routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinAlgError {
    /// A pivot normalized to exactly zero during elimination.
    #[error("matrix is singular (zero pivot encountered)")]
    Singular,

    /// The decomposition is only defined for square matrices.
    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NonSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    /// LDL requires a structurally symmetric matrix.
    #[error("LDL decomposition requires a structurally symmetric matrix")]
    NotSymmetric,

    /// Operand shapes are incompatible.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Flat data length does not match the requested shape.
    #[error("data length {len} does not match shape {rows}x{cols}")]
    DataLength {
        len: usize,
        rows: usize,
        cols: usize,
    },
}
