//! Operator overloads.
//!
//! Overload resolution happens at the type level: matrix-matrix and
//! matrix-scalar combinations each get their own `impl`, so there is no
//! runtime kind-branching. Matrix-matrix `+`/`-` are elementwise, `*` is
//! the matrix product, and scalar operands apply elementwise. Division by
//! a matrix means multiplication by its inverse and is the fallible named
//! method [`Matrix::div_matrix`]; the `/` operator only accepts scalars.
//!
//! Shape mismatches in operator position panic, matching the contract that
//! they are programming errors rather than recoverable conditions. The
//! fallible entry points live on the linear-algebra facade.

use std::ops::{Add, Div, Mul, Neg, Sub};

use symmat_expr::{Expr, SolveMethod};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

impl Matrix {
    fn zip_with<F>(&self, rhs: &Matrix, op: &'static str, f: F) -> Matrix
    where
        F: Fn(&Expr, &Expr) -> Expr,
    {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "{op}: shape mismatch {:?} vs {:?}",
            self.shape(),
            rhs.shape()
        );
        let data = self
            .data()
            .iter()
            .zip(rhs.data())
            .map(|(a, b)| f(a, b))
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    /// Matrix product. Panics when the inner dimensions disagree; the
    /// operator `*` forwards here.
    pub fn matmul(&self, rhs: &Matrix) -> Matrix {
        let engine = self
            .to_engine()
            .matmul(&rhs.to_engine())
            .unwrap_or_else(|e| panic!("matmul: {e}"));
        Matrix::from_engine(engine)
    }

    /// Divide by another matrix, meaning multiply by its inverse on the
    /// right: `self * rhs⁻¹`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DivisionByNonInvertible`] when `rhs` is singular, or
    /// [`MatrixError::UnsupportedShape`] when it is not square.
    pub fn div_matrix(&self, rhs: &Matrix, method: SolveMethod) -> Result<Matrix> {
        let inv = rhs.matrix_inverse(method)?;
        if self.cols() != inv.rows() {
            return Err(MatrixError::UnsupportedShape {
                op: "matrix division",
                rows: rhs.rows(),
                cols: rhs.cols(),
            });
        }
        Ok(self.matmul(&inv))
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, "add", |a, b| a.clone() + b.clone())
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, "sub", |a, b| a.clone() - b.clone())
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        self.matmul(rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.applyfunc(|e| -e.clone())
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Matrix) -> Matrix {
        &self + &rhs
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Matrix) -> Matrix {
        &self - &rhs
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -&self
    }
}

impl Mul<Expr> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Expr) -> Matrix {
        self.applyfunc(|e| e.clone() * rhs.clone())
    }
}

impl Mul<Expr> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Expr) -> Matrix {
        &self * rhs
    }
}

impl Mul<&Matrix> for Expr {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

impl Mul<Matrix> for Expr {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &rhs * self
    }
}

impl Div<Expr> for &Matrix {
    type Output = Matrix;

    fn div(self, rhs: Expr) -> Matrix {
        self.applyfunc(|e| e.clone() / rhs.clone())
    }
}

impl Div<Expr> for Matrix {
    type Output = Matrix;

    fn div(self, rhs: Expr) -> Matrix {
        &self / rhs
    }
}
