//! # symmat
//!
//! Symbolic matrices with shape resolution and group structure.
//!
//! This is the **meta crate** that re-exports the symmat components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use symmat::prelude::*;
//!
//! // Every construction resolves to an interned fixed shape.
//! let v = Matrix::symbolic("v", 3, 1);
//! assert_eq!(v.shape(), (3, 1));
//!
//! // Matrices carry additive group structure.
//! let zero = v.compose(&v.inverse());
//! assert_eq!(zero, v.identity());
//! ```
//!
//! ## Components
//!
//! ### Matrix Layer ([`core`])
//!
//! Construction resolution, the shape registry, group and Lie-group
//! operations, jacobians, and block assembly.
//!
//! ```
//! use symmat::core::Matrix;
//!
//! let m = Matrix::block_matrix(vec![
//!     vec![Matrix::eye(2, 2), Matrix::zeros(2, 1)],
//! ]).unwrap();
//! assert_eq!(m.shape(), (2, 3));
//! ```
//!
//! ### Expression Engine ([`expr`])
//!
//! Exact scalar expressions, differentiation, substitution, numeric
//! evaluation, and the symbolic decompositions (LU, LDL, fraction-free).
//!
//! ```
//! use symmat::expr::Expr;
//!
//! let x = Expr::symbol("x");
//! let d = (x.clone() * x.clone()).diff(&x).unwrap();
//! assert_eq!(d, Expr::integer(2) * x);
//! ```

#![deny(warnings)]

// Re-export all components
pub use symmat_core as core;
pub use symmat_expr as expr;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use symmat::prelude::*;
    //!
    //! let m = Matrix::eye(3, 3);
    //! assert_eq!(m.shape(), (3, 3));
    //! ```

    // Matrix layer
    pub use crate::core::{
        shape, Entry, GroupOps, LieGroupOps, Matrix, MatrixArgs, MatrixError, ShapeType,
        StorageOps,
    };

    // Engine scalars
    pub use crate::expr::{Expr, ExprMat, SolveMethod};
}
