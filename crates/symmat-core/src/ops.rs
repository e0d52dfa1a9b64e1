//! Storage, group, and Lie-group capability traits.
//!
//! These are the seams the algebraic layer and the jacobian machinery
//! dispatch through. Geometric types built on top of the matrix layer
//! implement the same traits, which is what lets
//! [`Matrix::jacobian`](crate::Matrix::jacobian) differentiate with respect
//! to any Lie-group element, not just plain matrices.
//!
//! Methods take `&self` even where the receiver only supplies shape
//! information, because shape is a per-value property here rather than a
//! per-type one.

use symmat_expr::Expr;

use crate::error::Result;
use crate::matrix::Matrix;

/// Flat scalar serialization of a value.
pub trait StorageOps: Sized {
    /// Number of scalar storage elements.
    fn storage_dim(&self) -> usize;

    /// Flatten to row-major storage order.
    fn to_storage(&self) -> Vec<Expr>;

    /// Rebuild a value of the receiver's shape from flat storage.
    ///
    /// # Errors
    ///
    /// Returns a length-mismatch error when `values.len()` differs from
    /// [`StorageOps::storage_dim`].
    fn from_storage(&self, values: &[Expr]) -> Result<Self>;
}

/// Group structure over composition.
pub trait GroupOps: StorageOps {
    /// The group identity element, shaped like the receiver.
    fn identity(&self) -> Self;

    /// Group composition.
    fn compose(&self, other: &Self) -> Self;

    /// Group inverse: `compose(a, a.inverse()) == a.identity()`.
    fn inverse(&self) -> Self;
}

/// Lie-group structure: a linear tangent parameterization around each
/// element, plus the jacobians between storage and tangent coordinates.
pub trait LieGroupOps: GroupOps {
    /// Dimension of the tangent space.
    fn tangent_dim(&self) -> usize;

    /// Local tangent coordinates of the receiver.
    fn to_tangent(&self) -> Vec<Expr>;

    /// Build an element from tangent coordinates.
    ///
    /// # Errors
    ///
    /// Returns a length-mismatch error when `vec.len()` differs from
    /// [`LieGroupOps::tangent_dim`].
    fn from_tangent(&self, vec: &[Expr]) -> Result<Self>;

    /// Jacobian of storage with respect to tangent coordinates, shape
    /// `(storage_dim, tangent_dim)`.
    fn storage_d_tangent(&self) -> Matrix;

    /// Jacobian of tangent with respect to storage coordinates, shape
    /// `(tangent_dim, storage_dim)`.
    fn tangent_d_storage(&self) -> Matrix;
}
