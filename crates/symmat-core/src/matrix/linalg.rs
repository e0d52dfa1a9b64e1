//! The linear-algebra facade.
//!
//! Vector geometry (dot, cross, norms) is computed locally over the flat
//! data; inversion, solving, and the decompositions pass through to the
//! engine and re-wrap its results into [`Matrix`] values. Engine failures
//! are lifted into the matrix error taxonomy at this boundary: a singular
//! pivot becomes [`MatrixError::DivisionByNonInvertible`] and shape
//! complaints become [`MatrixError::UnsupportedShape`].

use symmat_expr::{Expr, LinAlgError, SolveMethod};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

impl Matrix {
    fn lift(&self, op: &'static str, e: LinAlgError) -> MatrixError {
        match e {
            LinAlgError::Singular => MatrixError::DivisionByNonInvertible(e),
            LinAlgError::NonSquare { op, rows, cols } => {
                MatrixError::UnsupportedShape { op, rows, cols }
            }
            LinAlgError::NotSymmetric
            | LinAlgError::DimensionMismatch { .. }
            | LinAlgError::DataLength { .. } => MatrixError::UnsupportedShape {
                op,
                rows: self.rows(),
                cols: self.cols(),
            },
        }
    }

    fn require_vector(&self, other: Option<&Matrix>) -> Result<()> {
        for m in std::iter::once(self).chain(other) {
            if !m.is_vector() {
                return Err(MatrixError::NotAVector {
                    rows: m.rows(),
                    cols: m.cols(),
                });
            }
        }
        Ok(())
    }

    /// Dot product of two vectors of equal length; row and column vectors
    /// mix freely.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotAVector`] when either operand is not a vector,
    /// [`MatrixError::LengthMismatch`] when the lengths differ.
    pub fn dot(&self, other: &Matrix) -> Result<Expr> {
        self.require_vector(Some(other))?;
        if self.data().len() != other.data().len() {
            return Err(MatrixError::LengthMismatch {
                expected: self.data().len(),
                got: other.data().len(),
            });
        }
        let terms = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(a, b)| a.clone() * b.clone())
            .collect();
        Ok(Expr::add(terms))
    }

    /// Cross product, defined only for 3x1 column vectors.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedShape`] when either operand is not 3x1.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_core::Matrix;
    /// use symmat_expr::Expr;
    ///
    /// let x = Matrix::from_flat(vec![1.into(), 0.into(), 0.into()])?;
    /// let y = Matrix::from_flat(vec![0.into(), 1.into(), 0.into()])?;
    /// let z = x.cross(&y)?;
    /// assert_eq!(z.to_flat_list(), vec![Expr::integer(0), Expr::integer(0), Expr::integer(1)]);
    /// # Ok::<(), symmat_core::MatrixError>(())
    /// ```
    pub fn cross(&self, other: &Matrix) -> Result<Matrix> {
        for m in [self, other] {
            if m.shape() != (3, 1) {
                return Err(MatrixError::UnsupportedShape {
                    op: "cross",
                    rows: m.rows(),
                    cols: m.cols(),
                });
            }
        }
        let (a, b) = (self.data(), other.data());
        let data = vec![
            a[1].clone() * b[2].clone() - a[2].clone() * b[1].clone(),
            a[2].clone() * b[0].clone() - a[0].clone() * b[2].clone(),
            a[0].clone() * b[1].clone() - a[1].clone() * b[0].clone(),
        ];
        Ok(Matrix::from_parts(3, 1, data))
    }

    /// Sum of squared elements.
    pub fn squared_norm(&self) -> Expr {
        let terms = self
            .data()
            .iter()
            .map(|e| e.clone() * e.clone())
            .collect();
        Expr::add(terms)
    }

    /// Norm as `sqrt(squared_norm + epsilon)`.
    ///
    /// The caller supplies `epsilon`; a small positive value keeps the
    /// expression well-defined when the norm may evaluate to zero, and
    /// `0` gives the exact norm.
    pub fn norm(&self, epsilon: &Expr) -> Expr {
        Expr::sqrt(self.squared_norm() + epsilon.clone())
    }

    /// Unit vector in the direction of `self`, with `epsilon` guarding the
    /// division as in [`Matrix::norm`].
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotAVector`] when `self` is not a vector.
    pub fn normalized(&self, epsilon: &Expr) -> Result<Matrix> {
        self.require_vector(None)?;
        Ok(self / self.norm(epsilon))
    }

    /// Parallelism indicator for two 3x1 vectors: exactly `1` when the
    /// vectors are parallel within the tolerance, `0` otherwise, computed
    /// as `(1 - sign(|a x b| - epsilon)) / 2`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedShape`] when either vector is not 3x1.
    pub fn are_parallel(a: &Matrix, b: &Matrix, epsilon: &Expr) -> Result<Expr> {
        let n = a.cross(b)?.norm(&Expr::integer(0));
        let indicator =
            (Expr::integer(1) - Expr::sign(n - epsilon.clone())) / Expr::integer(2);
        Ok(indicator)
    }

    /// Matrix inverse.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DivisionByNonInvertible`] for singular input,
    /// [`MatrixError::UnsupportedShape`] for non-square input.
    pub fn matrix_inverse(&self, method: SolveMethod) -> Result<Matrix> {
        let inv = self
            .to_engine()
            .inv(method)
            .map_err(|e| self.lift("inverse", e))?;
        Ok(Matrix::from_engine(inv))
    }

    /// Solve `self * x = rhs` for `x`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::LengthMismatch`] when `rhs` has the wrong row count,
    /// otherwise as [`Matrix::matrix_inverse`].
    pub fn solve(&self, rhs: &Matrix, method: SolveMethod) -> Result<Matrix> {
        if rhs.rows() != self.rows() {
            return Err(MatrixError::LengthMismatch {
                expected: self.rows(),
                got: rhs.rows(),
            });
        }
        let x = self
            .to_engine()
            .solve(&rhs.to_engine(), method)
            .map_err(|e| self.lift("solve", e))?;
        Ok(Matrix::from_engine(x))
    }

    /// LU decomposition `self = L * U`. `L` is unit lower triangular when
    /// no leading pivot is zero; otherwise the row exchanges the
    /// elimination performs are folded into `L`.
    ///
    /// # Errors
    ///
    /// As [`Matrix::matrix_inverse`].
    pub fn lu(&self) -> Result<(Matrix, Matrix)> {
        let (l, u) = self.to_engine().lu().map_err(|e| self.lift("LU", e))?;
        Ok((Matrix::from_engine(l), Matrix::from_engine(u)))
    }

    /// LDLᵀ decomposition of a symmetric matrix: `self = L * D * Lᵀ`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedShape`] when the matrix is not square or
    /// not structurally symmetric, [`MatrixError::DivisionByNonInvertible`]
    /// on a zero diagonal entry.
    pub fn ldl(&self) -> Result<(Matrix, Matrix)> {
        let (l, d) = self.to_engine().ldl().map_err(|e| self.lift("LDL", e))?;
        Ok((Matrix::from_engine(l), Matrix::from_engine(d)))
    }

    /// Fraction-free LU factors of [`Matrix::ffldu`].
    pub fn fflu(&self) -> Result<(Matrix, Matrix)> {
        let (l, u) = self.to_engine().fflu().map_err(|e| self.lift("FFLU", e))?;
        Ok((Matrix::from_engine(l), Matrix::from_engine(u)))
    }

    /// Bareiss fraction-free LDU decomposition: `self = L * D⁻¹ * U`.
    ///
    /// # Errors
    ///
    /// As [`Matrix::matrix_inverse`].
    pub fn ffldu(&self) -> Result<(Matrix, Matrix, Matrix)> {
        let (l, d, u) = self
            .to_engine()
            .ffldu()
            .map_err(|e| self.lift("FFLDU", e))?;
        Ok((
            Matrix::from_engine(l),
            Matrix::from_engine(d),
            Matrix::from_engine(u),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3(vals: [i64; 3]) -> Matrix {
        Matrix::from_flat(vals.iter().map(|&v| Expr::integer(v)).collect()).unwrap()
    }

    #[test]
    fn dot_of_mixed_vector_orientations() {
        let a = vec3([1, 2, 3]);
        let b = vec3([4, 5, 6]).transpose();
        assert_eq!(a.dot(&b).unwrap(), Expr::integer(32));
    }

    #[test]
    fn dot_rejects_non_vectors_and_length_mismatch() {
        let m = Matrix::zeros(2, 2);
        let v = vec3([1, 2, 3]);
        assert!(matches!(
            m.dot(&v),
            Err(MatrixError::NotAVector { rows: 2, cols: 2 })
        ));
        let w = Matrix::from_flat(vec![Expr::integer(1)]).unwrap();
        assert!(matches!(
            v.dot(&w),
            Err(MatrixError::LengthMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn cross_of_basis_vectors() {
        let x = vec3([1, 0, 0]);
        let y = vec3([0, 1, 0]);
        let z = x.cross(&y).unwrap();
        assert_eq!(z, vec3([0, 0, 1]));
    }

    #[test]
    fn cross_requires_three_by_one() {
        let short = Matrix::from_flat(vec![Expr::integer(1), Expr::integer(2)]).unwrap();
        let v = vec3([1, 2, 3]);
        assert!(matches!(
            short.cross(&v),
            Err(MatrixError::UnsupportedShape {
                op: "cross",
                rows: 2,
                cols: 1
            })
        ));
    }

    #[test]
    fn norm_carries_the_epsilon_under_the_root() {
        let v = vec3([3, 4, 0]);
        assert_eq!(v.norm(&Expr::integer(0)).eval_num().unwrap(), 5.0);

        let eps = Expr::float(1e-12);
        let zero = vec3([0, 0, 0]);
        let n = zero.norm(&eps).eval_num().unwrap();
        assert!(n > 0.0);
    }

    #[test]
    fn normalized_vector_has_unit_norm() {
        let v = vec3([3, 4, 0]);
        let u = v.normalized(&Expr::integer(0)).unwrap();
        let n = u.squared_norm().eval_num().unwrap();
        assert!((n - 1.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_indicator() {
        let eps = Expr::float(1e-9);
        let a = vec3([1, 2, 3]);
        let b = vec3([2, 4, 6]);
        let c = vec3([1, 0, 0]);
        assert_eq!(
            Matrix::are_parallel(&a, &b, &eps).unwrap().eval_num().unwrap(),
            1.0
        );
        assert_eq!(
            Matrix::are_parallel(&a, &c, &eps).unwrap().eval_num().unwrap(),
            0.0
        );
    }

    #[test]
    fn inverse_and_solve_round_trip() {
        let a = Matrix::from_shape_data(
            2,
            2,
            [1, 2, 3, 4].iter().map(|&v| Expr::integer(v)).collect(),
        )
        .unwrap();
        let inv = a.matrix_inverse(SolveMethod::FractionFree).unwrap();
        assert_eq!((&a * &inv).to_array().unwrap(), Matrix::eye(2, 2).to_array().unwrap());

        let b = Matrix::from_flat(vec![Expr::integer(5), Expr::integer(11)]).unwrap();
        let x = a.solve(&b, SolveMethod::Lu).unwrap();
        assert_eq!(x.to_array().unwrap(), vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn singular_inverse_is_lifted() {
        let s = Matrix::from_shape_data(
            2,
            2,
            [1, 2, 2, 4].iter().map(|&v| Expr::integer(v)).collect(),
        )
        .unwrap();
        assert!(matches!(
            s.matrix_inverse(SolveMethod::Lu),
            Err(MatrixError::DivisionByNonInvertible(_))
        ));
    }

    #[test]
    fn permutation_matrix_inverts() {
        let p = Matrix::from_shape_data(
            2,
            2,
            [0, 1, 1, 0].iter().map(|&v| Expr::integer(v)).collect(),
        )
        .unwrap();
        for method in [SolveMethod::Lu, SolveMethod::FractionFree] {
            let inv = p.matrix_inverse(method).unwrap();
            assert_eq!(inv.to_array().unwrap(), p.to_array().unwrap());
        }
    }

    #[test]
    fn non_square_decomposition_is_unsupported() {
        let m = Matrix::zeros(2, 3);
        assert!(matches!(
            m.lu(),
            Err(MatrixError::UnsupportedShape {
                op: "LU",
                rows: 2,
                cols: 3
            })
        ));
    }

    #[test]
    fn decompositions_rewrap_into_matrices() {
        let a = Matrix::from_shape_data(
            2,
            2,
            [4, 2, 2, 3].iter().map(|&v| Expr::integer(v)).collect(),
        )
        .unwrap();
        let (l, d) = a.ldl().unwrap();
        assert_eq!(l.shape(), (2, 2));
        assert_eq!(d[(0, 0)], Expr::integer(4));

        let (l, u) = a.lu().unwrap();
        let back = &l * &u;
        assert_eq!(back.to_array().unwrap(), a.to_array().unwrap());
    }
}
