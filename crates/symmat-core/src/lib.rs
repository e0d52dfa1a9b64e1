//! # symmat-core
//!
//! Shape-resolved symbolic matrices with group and Lie-group structure.
//!
//! Every construction call resolves to an interned fixed shape from the
//! [`shape`] registry, so downstream code can treat a matrix both as a
//! plain linear-space value and as an algebraic group element (additive
//! convention: identity is zero, composition is addition, the tangent
//! space is the storage space).
//!
//! ## Quick start
//!
//! ```
//! use symmat_core::Matrix;
//! use symmat_expr::Expr;
//!
//! // Construction resolves the shape; algebra follows.
//! let v = Matrix::symbolic("v", 3, 1);
//! let j = Matrix::from_flat(vec![v.squared_norm()])?
//!     .jacobian(&v, true)?;
//! assert_eq!(j.shape(), (1, 3));
//! assert_eq!(j[(0, 0)], Expr::integer(2) * Expr::symbol("v0"));
//! # Ok::<(), symmat_core::MatrixError>(())
//! ```

#![deny(warnings)]

pub mod construct;
pub mod error;
mod matrix;
pub mod ops;
pub mod shape;

#[cfg(test)]
mod property_tests;

pub use construct::{Entry, MatrixArgs};
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use ops::{GroupOps, LieGroupOps, StorageOps};
pub use shape::ShapeType;

pub use symmat_expr::SolveMethod;
