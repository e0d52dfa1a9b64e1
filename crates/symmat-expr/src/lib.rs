//! # symmat-expr
//!
//! Symbolic scalar expression engine backing the `symmat` matrix types.
//!
//! This crate is the "expression engine" collaborator consumed by
//! `symmat-core`: it owns scalar symbol creation, algebraic normalization,
//! differentiation, numeric evaluation, and the symbolic matrix
//! decompositions (LU, LDL, fraction-free LU/LDU, inverse, solve). The
//! matrix layer above never manipulates expression trees directly; it goes
//! through the operations exported here.
//!
//! ## Expressions
//!
//! [`Expr`] is an immutable expression tree normalized on construction:
//! constants fold, like terms and like factors collect, and children are
//! kept in a canonical order. Structural equality is therefore meaningful
//! for the algebraic identities the matrix layer relies on:
//!
//! ```
//! use symmat_expr::Expr;
//!
//! let x = Expr::symbol("x");
//! assert_eq!(x.clone() - x.clone(), Expr::integer(0));
//! assert_eq!(x.clone() * Expr::integer(1), x);
//! ```
//!
//! ## Calculus
//!
//! ```
//! use symmat_expr::Expr;
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! let f = x.clone() * y.clone();
//!
//! assert_eq!(f.diff(&x).unwrap(), y);
//! ```
//!
//! ## Linear algebra
//!
//! [`ExprMat`] is the engine-native dense matrix (rows, cols, flat row-major
//! data) used by the decomposition routines. The matrix layer re-wraps the
//! results into its own types.

#![deny(warnings)]

mod calculus;
mod error;
mod eval;
mod expr;
pub mod linalg;
mod simplify;


pub use error::{ExprError, LinAlgError};
pub use expr::Expr;
pub use linalg::{ExprMat, SolveMethod};
