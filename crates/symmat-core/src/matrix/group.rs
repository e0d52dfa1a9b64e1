//! Group and Lie-group structure for matrices.
//!
//! Matrices form an additive group: identity is the zero matrix,
//! composition is addition, inversion is negation. The tangent space is
//! declared equal to storage, so the storage/tangent jacobians are both
//! identity matrices and `to_tangent`/`from_tangent` are flat reshapes.

use symmat_expr::Expr;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::ops::{GroupOps, LieGroupOps, StorageOps};

impl StorageOps for Matrix {
    fn storage_dim(&self) -> usize {
        self.shape_type().storage_dim()
    }

    fn to_storage(&self) -> Vec<Expr> {
        self.to_flat_list()
    }

    fn from_storage(&self, values: &[Expr]) -> Result<Self> {
        if values.len() != self.storage_dim() {
            return Err(MatrixError::LengthMismatch {
                expected: self.storage_dim(),
                got: values.len(),
            });
        }
        Ok(Matrix::from_parts(self.rows(), self.cols(), values.to_vec()))
    }
}

impl GroupOps for Matrix {
    fn identity(&self) -> Self {
        Matrix::zeros(self.rows(), self.cols())
    }

    fn compose(&self, other: &Self) -> Self {
        self + other
    }

    fn inverse(&self) -> Self {
        -self
    }
}

impl LieGroupOps for Matrix {
    fn tangent_dim(&self) -> usize {
        self.storage_dim()
    }

    fn to_tangent(&self) -> Vec<Expr> {
        self.to_storage()
    }

    fn from_tangent(&self, vec: &[Expr]) -> Result<Self> {
        self.from_storage(vec)
    }

    fn storage_d_tangent(&self) -> Matrix {
        Matrix::eye(self.storage_dim(), self.tangent_dim())
    }

    fn tangent_d_storage(&self) -> Matrix {
        Matrix::eye(self.tangent_dim(), self.storage_dim())
    }
}
