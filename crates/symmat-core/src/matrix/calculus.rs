//! Differentiation and block assembly.
//!
//! The jacobian here is the chain-rule composition that reduces a
//! derivative with respect to an arbitrary Lie-group element to that
//! element's tangent parameterization: differentiate storage against
//! storage, then right-multiply by the element's `storage_d_tangent`.

use symmat_expr::Expr;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::ops::LieGroupOps;

impl Matrix {
    /// Elementwise derivative with respect to one scalar symbol.
    ///
    /// # Errors
    ///
    /// [`MatrixError::Engine`] when `wrt` is not a symbol.
    pub fn diff(&self, wrt: &Expr) -> Result<Matrix> {
        let data = self
            .data()
            .iter()
            .map(|e| e.diff(wrt).map_err(MatrixError::from))
            .collect::<Result<Vec<_>>>()?;
        Ok(Matrix::from_parts(self.rows(), self.cols(), data))
    }

    /// Jacobian of `self` with respect to a Lie-group element `x`.
    ///
    /// `self` must be a column vector. The result has one row per element
    /// of `self`; with `tangent_space` set, the storage jacobian is
    /// right-multiplied by `x.storage_d_tangent()` so the columns span
    /// `x`'s tangent parameterization, otherwise they span its raw storage.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotAVector`] when `self` is not a column vector,
    /// [`MatrixError::Engine`] when an element of `x`'s storage is not a
    /// plain symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_core::Matrix;
    /// use symmat_expr::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let y = Expr::symbol("y");
    /// let f = Matrix::from_flat(vec![x.clone() * y.clone()])?;
    /// let wrt = Matrix::from_flat(vec![x, y])?;
    /// let j = f.jacobian(&wrt, false)?;
    /// assert_eq!(j.to_flat_list(), vec![Expr::symbol("y"), Expr::symbol("x")]);
    /// # Ok::<(), symmat_core::MatrixError>(())
    /// ```
    pub fn jacobian<X: LieGroupOps>(&self, x: &X, tangent_space: bool) -> Result<Matrix> {
        if self.cols() != 1 {
            return Err(MatrixError::NotAVector {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let xs = x.to_storage();
        let mut data = Vec::with_capacity(self.rows() * xs.len());
        for e in self.data() {
            for s in &xs {
                data.push(e.diff(s)?);
            }
        }
        let self_d_storage = Matrix::from_parts(self.rows(), xs.len(), data);
        if tangent_space {
            Ok(&self_d_storage * &x.storage_d_tangent())
        } else {
            Ok(self_d_storage)
        }
    }

    /// Assemble a matrix from a 2-D grid of blocks.
    ///
    /// Every block in a grid row must share that row's height, and every
    /// row's total width must agree.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InconsistentBlockShape`] otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_core::Matrix;
    ///
    /// let m = Matrix::block_matrix(vec![
    ///     vec![Matrix::eye(2, 2), Matrix::zeros(2, 3)],
    ///     vec![Matrix::zeros(1, 2), Matrix::ones(1, 3)],
    /// ])?;
    /// assert_eq!(m.shape(), (3, 5));
    /// # Ok::<(), symmat_core::MatrixError>(())
    /// ```
    pub fn block_matrix(grid: Vec<Vec<Matrix>>) -> Result<Matrix> {
        let mut total_width = None;
        let mut data = Vec::new();
        let mut total_height = 0;
        for (i, row) in grid.iter().enumerate() {
            let height = row.first().map_or(0, Matrix::rows);
            for block in row {
                if block.rows() != height {
                    return Err(MatrixError::InconsistentBlockShape(format!(
                        "block row {i} mixes heights {height} and {}",
                        block.rows()
                    )));
                }
            }
            let width: usize = row.iter().map(Matrix::cols).sum();
            match total_width {
                None => total_width = Some(width),
                Some(w) if w != width => {
                    return Err(MatrixError::InconsistentBlockShape(format!(
                        "block row 0 is {w} wide but row {i} is {width}"
                    )));
                }
                Some(_) => {}
            }
            for r in 0..height {
                for block in row {
                    for c in 0..block.cols() {
                        data.push(block.at(r, c).clone());
                    }
                }
            }
            total_height += height;
        }
        Ok(Matrix::from_parts(total_height, total_width.unwrap_or(0), data))
    }

    /// Stack equal-shape vectors as columns.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InconsistentColumns`] when the arguments are not
    /// vectors of one common shape.
    pub fn column_stack(vectors: &[Matrix]) -> Result<Matrix> {
        let Some(first) = vectors.first() else {
            return Ok(Matrix::zeros(0, 0));
        };
        for v in vectors {
            if !v.is_vector() || v.shape() != first.shape() {
                return Err(MatrixError::InconsistentColumns(format!(
                    "expected vectors of shape {:?}, got {:?}",
                    first.shape(),
                    v.shape()
                )));
            }
        }
        let rows: Vec<Vec<Matrix>> = vectors
            .iter()
            .map(|v| vec![Matrix::from_parts(1, v.data().len(), v.data().to_vec())])
            .collect();
        Ok(Matrix::block_matrix(rows)?.transpose())
    }

    /// Concatenate horizontally.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InconsistentBlockShape`] when the heights differ.
    pub fn row_join(&self, right: &Matrix) -> Result<Matrix> {
        Matrix::block_matrix(vec![vec![self.clone(), right.clone()]])
    }

    /// Concatenate vertically.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InconsistentBlockShape`] when the widths differ.
    pub fn col_join(&self, bottom: &Matrix) -> Result<Matrix> {
        Matrix::block_matrix(vec![vec![self.clone()], vec![bottom.clone()]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(rows: usize, cols: usize, vals: &[i64]) -> Matrix {
        Matrix::from_shape_data(rows, cols, vals.iter().map(|&v| Expr::integer(v)).collect())
            .unwrap()
    }

    #[test]
    fn elementwise_diff() {
        let x = Expr::symbol("x");
        let m = Matrix::from_flat(vec![
            x.clone() * x.clone(),
            Expr::integer(3) * x.clone(),
        ])
        .unwrap();
        let d = m.diff(&x).unwrap();
        assert_eq!(d[(0, 0)], Expr::integer(2) * x);
        assert_eq!(d[(1, 0)], Expr::integer(3));

        assert!(matches!(
            m.diff(&Expr::integer(1)),
            Err(MatrixError::Engine(_))
        ));
    }

    #[test]
    fn storage_jacobian_of_a_product() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let f = Matrix::from_flat(vec![x.clone() * y.clone()]).unwrap();
        let wrt = Matrix::from_flat(vec![x.clone(), y.clone()]).unwrap();
        let j = f.jacobian(&wrt, false).unwrap();
        assert_eq!(j.shape(), (1, 2));
        assert_eq!(j[(0, 0)], y);
        assert_eq!(j[(0, 1)], x);
    }

    #[test]
    fn tangent_jacobian_matches_storage_for_matrices() {
        // storage_d_tangent is the identity for plain matrices, so the two
        // parameterizations agree.
        let v = Matrix::symbolic("v", 3, 1);
        let f = Matrix::from_flat(vec![v.squared_norm()]).unwrap();
        let a = f.jacobian(&v, true).unwrap();
        let b = f.jacobian(&v, false).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[(0, 1)], Expr::integer(2) * Expr::symbol("v1"));
    }

    #[test]
    fn jacobian_requires_a_column_vector() {
        let m = Matrix::symbolic("m", 2, 2);
        let wrt = Matrix::symbolic("x", 2, 1);
        assert!(matches!(
            m.jacobian(&wrt, true),
            Err(MatrixError::NotAVector { rows: 2, cols: 2 })
        ));
    }

    #[test]
    fn block_matrix_literal() {
        let m = Matrix::block_matrix(vec![
            vec![Matrix::eye(2, 2), Matrix::zeros(2, 3)],
            vec![Matrix::zeros(1, 2), Matrix::ones(1, 3)],
        ])
        .unwrap();
        let expected = ints(
            3,
            5,
            &[1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1],
        );
        assert_eq!(m, expected);
    }

    #[test]
    fn block_matrix_rejects_ragged_grids() {
        assert!(matches!(
            Matrix::block_matrix(vec![vec![Matrix::zeros(2, 2), Matrix::zeros(1, 2)]]),
            Err(MatrixError::InconsistentBlockShape(_))
        ));
        assert!(matches!(
            Matrix::block_matrix(vec![
                vec![Matrix::zeros(1, 2)],
                vec![Matrix::zeros(1, 3)],
            ]),
            Err(MatrixError::InconsistentBlockShape(_))
        ));
    }

    #[test]
    fn column_stack_transposes_rows() {
        let a = ints(3, 1, &[1, 2, 3]);
        let b = ints(3, 1, &[4, 5, 6]);
        let m = Matrix::column_stack(&[a, b]).unwrap();
        assert_eq!(m, ints(3, 2, &[1, 4, 2, 5, 3, 6]));
    }

    #[test]
    fn column_stack_rejects_mismatched_vectors() {
        let a = ints(3, 1, &[1, 2, 3]);
        let b = ints(2, 1, &[4, 5]);
        assert!(matches!(
            Matrix::column_stack(&[a.clone(), b]),
            Err(MatrixError::InconsistentColumns(_))
        ));
        let square = Matrix::zeros(3, 3);
        assert!(matches!(
            Matrix::column_stack(&[square]),
            Err(MatrixError::InconsistentColumns(_))
        ));
    }

    #[test]
    fn joins_concatenate() {
        let a = ints(2, 1, &[1, 2]);
        let b = ints(2, 1, &[3, 4]);
        assert_eq!(a.row_join(&b).unwrap(), ints(2, 2, &[1, 3, 2, 4]));
        assert_eq!(a.col_join(&b).unwrap(), ints(4, 1, &[1, 2, 3, 4]));
        assert!(a.row_join(&ints(1, 1, &[9])).is_err());
    }
}
