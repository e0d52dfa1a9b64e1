//! Engine-native dense matrices and symbolic decompositions.
//!
//! [`ExprMat`] is the flat row-major matrix the engine operates on. The
//! routines here are exact symbolic algorithms: Doolittle LU, LDLᵀ, and the
//! Bareiss fraction-free eliminations. When a leading pivot normalizes to
//! exactly zero the elimination exchanges rows, folding the permutation
//! into the left factor so the returned factors always multiply back to
//! the input; [`LinAlgError::Singular`] is reported only when no row below
//! offers a nonzero pivot. A symbolic pivot is assumed invertible, which is
//! the standard symbolic-engine convention.
//!
//! The fraction-free factorizations satisfy `A = L · D⁻¹ · U`, where `L`
//! carries the column values at each elimination stage (pivots on the
//! diagonal), `U` is the fraction-free upper factor, and `D` is diagonal
//! with `D[k] = p(k-1) · p(k)` over the pivot sequence (`p(0) = 1`).

use crate::error::LinAlgError;
use crate::expr::Expr;

/// Method selector for [`ExprMat::solve`] and [`ExprMat::inv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMethod {
    /// Doolittle LU with exact division.
    Lu,
    /// Bareiss fraction-free elimination.
    FractionFree,
}

/// Dense engine matrix: rows, cols, flat row-major data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMat {
    rows: usize,
    cols: usize,
    data: Vec<Expr>,
}

impl ExprMat {
    /// Create a matrix from flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`LinAlgError::DataLength`] if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<Expr>) -> Result<Self, LinAlgError> {
        if data.len() != rows * cols {
            return Err(LinAlgError::DataLength {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Expr::integer(0); rows * cols],
        }
    }

    /// Square identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, Expr::integer(1));
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat row-major view of the elements.
    pub fn data(&self) -> &[Expr] {
        &self.data
    }

    /// Consume into the flat row-major data.
    pub fn into_data(self) -> Vec<Expr> {
        self.data
    }

    /// Element at (row, col). Panics on out-of-bounds indices.
    pub fn at(&self, r: usize, c: usize) -> &Expr {
        assert!(r < self.rows && c < self.cols, "index out of bounds");
        &self.data[r * self.cols + c]
    }

    fn set(&mut self, r: usize, c: usize, value: Expr) {
        assert!(r < self.rows && c < self.cols, "index out of bounds");
        self.data[r * self.cols + c] = value;
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.swap_row_prefix(a, b, self.cols);
    }

    /// Swap the first `cols` entries of rows `a` and `b`.
    fn swap_row_prefix(&mut self, a: usize, b: usize, cols: usize) {
        for j in 0..cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// First row below `k` with a nonzero entry in column `k`.
    fn pivot_row(&self, k: usize) -> Option<usize> {
        ((k + 1)..self.rows).find(|&r| !self.at(r, k).is_zero())
    }

    /// Matrix product.
    ///
    /// # Errors
    ///
    /// Returns [`LinAlgError::DimensionMismatch`] when the inner dimensions
    /// disagree.
    pub fn matmul(&self, other: &ExprMat) -> Result<ExprMat, LinAlgError> {
        if self.cols != other.rows {
            return Err(LinAlgError::DimensionMismatch {
                expected: (self.cols, other.cols),
                got: (other.rows, other.cols),
            });
        }
        let mut out = ExprMat::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let terms = (0..self.cols)
                    .map(|k| self.at(i, k).clone() * other.at(k, j).clone())
                    .collect();
                out.set(i, j, Expr::add(terms));
            }
        }
        Ok(out)
    }

    fn require_square(&self, op: &'static str) -> Result<usize, LinAlgError> {
        if self.rows != self.cols {
            return Err(LinAlgError::NonSquare {
                op,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.rows)
    }

    fn is_symmetric(&self) -> bool {
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if self.at(i, j) != self.at(j, i) {
                    return false;
                }
            }
        }
        true
    }

    /// Doolittle LU decomposition: `A = L · U`, exchanging rows where a
    /// leading pivot normalizes to exactly zero.
    ///
    /// Without exchanges `L` is unit lower triangular; otherwise the row
    /// permutation is folded into `L`, so `L · U` always reconstructs the
    /// input.
    ///
    /// # Errors
    ///
    /// [`LinAlgError::NonSquare`] for non-square input,
    /// [`LinAlgError::Singular`] when some column offers no nonzero pivot.
    pub fn lu(&self) -> Result<(ExprMat, ExprMat), LinAlgError> {
        let (perm, l, u) = self.lu_pivoted()?;
        Ok((unpermute_rows(&l, &perm), u))
    }

    /// Doolittle elimination with exact division. Returns the row
    /// permutation `perm` along with unit-lower-triangular `L` and upper
    /// `U` such that row `i` of `L · U` is row `perm[i]` of `self`.
    fn lu_pivoted(&self) -> Result<(Vec<usize>, ExprMat, ExprMat), LinAlgError> {
        let n = self.require_square("LU")?;
        let mut u = self.clone();
        let mut l = ExprMat::identity(n);
        let mut perm: Vec<usize> = (0..n).collect();
        for k in 0..n {
            if u.at(k, k).is_zero() {
                let r = u.pivot_row(k).ok_or(LinAlgError::Singular)?;
                u.swap_rows(k, r);
                l.swap_row_prefix(k, r, k);
                perm.swap(k, r);
            }
            let pivot = u.at(k, k).clone();
            for i in (k + 1)..n {
                let factor = u.at(i, k).clone() / pivot.clone();
                l.set(i, k, factor.clone());
                u.set(i, k, Expr::integer(0));
                for j in (k + 1)..n {
                    let v = u.at(i, j).clone() - factor.clone() * u.at(k, j).clone();
                    u.set(i, j, v);
                }
            }
        }
        Ok((perm, l, u))
    }

    /// LDLᵀ decomposition of a structurally symmetric matrix:
    /// `A = L · D · Lᵀ` with `L` unit lower triangular and `D` diagonal.
    ///
    /// # Errors
    ///
    /// [`LinAlgError::NonSquare`], [`LinAlgError::NotSymmetric`], or
    /// [`LinAlgError::Singular`] when a diagonal entry normalizes to zero.
    pub fn ldl(&self) -> Result<(ExprMat, ExprMat), LinAlgError> {
        let n = self.require_square("LDL")?;
        if !self.is_symmetric() {
            return Err(LinAlgError::NotSymmetric);
        }
        let mut l = ExprMat::identity(n);
        let mut d = ExprMat::zeros(n, n);
        for j in 0..n {
            let mut acc = self.at(j, j).clone();
            for k in 0..j {
                let ljk = l.at(j, k).clone();
                acc = acc - ljk.clone() * ljk * d.at(k, k).clone();
            }
            if acc.is_zero() {
                return Err(LinAlgError::Singular);
            }
            d.set(j, j, acc.clone());
            for i in (j + 1)..n {
                let mut v = self.at(i, j).clone();
                for k in 0..j {
                    v = v - l.at(i, k).clone() * l.at(j, k).clone() * d.at(k, k).clone();
                }
                l.set(i, j, v / acc.clone());
            }
        }
        Ok((l, d))
    }

    /// Bareiss fraction-free LU: the `(L, U)` factors of [`ExprMat::ffldu`]
    /// without the diagonal, so `A = L · D⁻¹ · U` for the implied `D`.
    pub fn fflu(&self) -> Result<(ExprMat, ExprMat), LinAlgError> {
        let (l, _, u) = self.ffldu()?;
        Ok((l, u))
    }

    /// Bareiss fraction-free LDU decomposition: `A = L · D⁻¹ · U`, with row
    /// exchanges on exact-zero pivots folded into `L` as in
    /// [`ExprMat::lu`].
    ///
    /// All divisions performed during elimination are exact for entries in
    /// an integral domain, so integer matrices stay integer throughout.
    ///
    /// # Errors
    ///
    /// [`LinAlgError::NonSquare`] or [`LinAlgError::Singular`].
    pub fn ffldu(&self) -> Result<(ExprMat, ExprMat, ExprMat), LinAlgError> {
        let (perm, l, d, u) = self.ffldu_pivoted()?;
        Ok((unpermute_rows(&l, &perm), d, u))
    }

    fn ffldu_pivoted(
        &self,
    ) -> Result<(Vec<usize>, ExprMat, ExprMat, ExprMat), LinAlgError> {
        let n = self.require_square("FFLDU")?;
        let mut u = self.clone();
        let mut l = ExprMat::zeros(n, n);
        let mut perm: Vec<usize> = (0..n).collect();
        let mut pivots = Vec::with_capacity(n);
        let mut prev = Expr::integer(1);
        for k in 0..n {
            if u.at(k, k).is_zero() {
                let r = u.pivot_row(k).ok_or(LinAlgError::Singular)?;
                u.swap_rows(k, r);
                l.swap_row_prefix(k, r, k);
                perm.swap(k, r);
            }
            let pivot = u.at(k, k).clone();
            for i in k..n {
                l.set(i, k, u.at(i, k).clone());
            }
            for i in (k + 1)..n {
                for j in (k + 1)..n {
                    let v = (u.at(i, j).clone() * pivot.clone()
                        - u.at(i, k).clone() * u.at(k, j).clone())
                        / prev.clone();
                    u.set(i, j, v);
                }
                u.set(i, k, Expr::integer(0));
            }
            pivots.push(pivot.clone());
            prev = pivot;
        }
        let mut d = ExprMat::zeros(n, n);
        let mut dprev = Expr::integer(1);
        for (k, p) in pivots.into_iter().enumerate() {
            d.set(k, k, dprev * p.clone());
            dprev = p;
        }
        Ok((perm, l, d, u))
    }

    /// Solve `self · X = rhs` for `X`.
    ///
    /// # Errors
    ///
    /// [`LinAlgError::NonSquare`], [`LinAlgError::DimensionMismatch`] if
    /// `rhs` has a different row count, or [`LinAlgError::Singular`].
    pub fn solve(&self, rhs: &ExprMat, method: SolveMethod) -> Result<ExprMat, LinAlgError> {
        let n = self.require_square("solve")?;
        if rhs.rows != n {
            return Err(LinAlgError::DimensionMismatch {
                expected: (n, rhs.cols),
                got: (rhs.rows, rhs.cols),
            });
        }
        match method {
            SolveMethod::Lu => self.solve_lu(rhs, n),
            SolveMethod::FractionFree => self.solve_fraction_free(rhs, n),
        }
    }

    fn solve_lu(&self, rhs: &ExprMat, n: usize) -> Result<ExprMat, LinAlgError> {
        let (perm, l, u) = self.lu_pivoted()?;
        let mut x = ExprMat::zeros(n, rhs.cols);
        for c in 0..rhs.cols {
            // Forward substitution: L y = permuted b (unit diagonal).
            let mut y = vec![Expr::integer(0); n];
            for i in 0..n {
                let mut acc = rhs.at(perm[i], c).clone();
                for (j, yj) in y.iter().enumerate().take(i) {
                    acc = acc - l.at(i, j).clone() * yj.clone();
                }
                y[i] = acc;
            }
            // Back substitution: U x = y.
            for i in (0..n).rev() {
                let mut acc = y[i].clone();
                for j in (i + 1)..n {
                    acc = acc - u.at(i, j).clone() * x.at(j, c).clone();
                }
                x.set(i, c, acc / u.at(i, i).clone());
            }
        }
        Ok(x)
    }

    fn solve_fraction_free(&self, rhs: &ExprMat, n: usize) -> Result<ExprMat, LinAlgError> {
        // Bareiss elimination on the augmented system keeps every
        // intermediate division exact.
        let m = rhs.cols;
        let mut aug = ExprMat::zeros(n, n + m);
        for i in 0..n {
            for j in 0..n {
                aug.set(i, j, self.at(i, j).clone());
            }
            for j in 0..m {
                aug.set(i, n + j, rhs.at(i, j).clone());
            }
        }
        let mut prev = Expr::integer(1);
        for k in 0..n {
            if aug.at(k, k).is_zero() {
                let r = aug.pivot_row(k).ok_or(LinAlgError::Singular)?;
                aug.swap_rows(k, r);
            }
            let pivot = aug.at(k, k).clone();
            for i in (k + 1)..n {
                for j in (k + 1)..(n + m) {
                    let v = (aug.at(i, j).clone() * pivot.clone()
                        - aug.at(i, k).clone() * aug.at(k, j).clone())
                        / prev.clone();
                    aug.set(i, j, v);
                }
                aug.set(i, k, Expr::integer(0));
            }
            prev = pivot;
        }
        let mut x = ExprMat::zeros(n, m);
        for c in 0..m {
            for i in (0..n).rev() {
                let mut acc = aug.at(i, n + c).clone();
                for j in (i + 1)..n {
                    acc = acc - aug.at(i, j).clone() * x.at(j, c).clone();
                }
                x.set(i, c, acc / aug.at(i, i).clone());
            }
        }
        Ok(x)
    }

    /// Matrix inverse via [`ExprMat::solve`] against the identity.
    ///
    /// # Errors
    ///
    /// Same as [`ExprMat::solve`].
    pub fn inv(&self, method: SolveMethod) -> Result<ExprMat, LinAlgError> {
        let n = self.require_square("inv")?;
        self.solve(&ExprMat::identity(n), method)
    }
}

/// Place row `i` of `m` at row `perm[i]`, undoing the exchanges a pivoted
/// elimination applied so the factors multiply back to the original input.
fn unpermute_rows(m: &ExprMat, perm: &[usize]) -> ExprMat {
    let mut out = ExprMat::zeros(m.rows, m.cols);
    for (i, &p) in perm.iter().enumerate() {
        for j in 0..m.cols {
            out.set(p, j, m.at(i, j).clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(rows: usize, cols: usize, vals: &[i64]) -> ExprMat {
        ExprMat::new(rows, cols, vals.iter().map(|&v| Expr::integer(v)).collect()).unwrap()
    }

    fn assert_num(m: &ExprMat, expected: &[f64]) {
        let got: Vec<f64> = m.data().iter().map(|e| e.eval_num().unwrap()).collect();
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-9, "got {got:?}, expected {expected:?}");
        }
    }

    #[test]
    fn lu_factors_numeric_matrix() {
        let a = ints(2, 2, &[4, 3, 6, 3]);
        let (l, u) = a.lu().unwrap();
        assert_num(&l, &[1.0, 0.0, 1.5, 1.0]);
        assert_num(&u, &[4.0, 3.0, 0.0, -1.5]);
        let back = l.matmul(&u).unwrap();
        assert_num(&back, &[4.0, 3.0, 6.0, 3.0]);
    }

    #[test]
    fn lu_symbolic_pivot_division() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let c = Expr::symbol("c");
        let d = Expr::symbol("d");
        let m = ExprMat::new(2, 2, vec![a.clone(), b.clone(), c.clone(), d.clone()]).unwrap();
        let (l, u) = m.lu().unwrap();
        assert_eq!(l.at(1, 0), &(c.clone() / a.clone()));
        assert_eq!(u.at(1, 1), &(d - b * c / a));
    }

    #[test]
    fn rank_deficient_matrix_is_singular() {
        let a = ints(2, 2, &[1, 2, 2, 4]);
        assert_eq!(a.lu(), Err(LinAlgError::Singular));
        assert_eq!(a.inv(SolveMethod::FractionFree), Err(LinAlgError::Singular));
    }

    #[test]
    fn zero_leading_pivot_exchanges_rows() {
        let a = ints(2, 2, &[0, 1, 1, 0]);
        let (l, u) = a.lu().unwrap();
        let back = l.matmul(&u).unwrap();
        assert_num(&back, &[0.0, 1.0, 1.0, 0.0]);
        let inv = a.inv(SolveMethod::Lu).unwrap();
        assert_num(&inv, &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn ffldu_with_row_exchange() {
        let a = ints(2, 2, &[0, 2, 3, 1]);
        let (l, d, u) = a.ffldu().unwrap();
        assert_num(&l, &[0.0, 6.0, 3.0, 0.0]);
        assert_num(&d, &[3.0, 0.0, 0.0, 18.0]);
        let back = l
            .matmul(&d.inv(SolveMethod::Lu).unwrap())
            .unwrap()
            .matmul(&u)
            .unwrap();
        assert_num(&back, &[0.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn solve_with_permuted_pivot() {
        let a = ints(2, 2, &[0, 1, 1, 0]);
        let b = ints(2, 1, &[3, 5]);
        for method in [SolveMethod::Lu, SolveMethod::FractionFree] {
            let x = a.solve(&b, method).unwrap();
            assert_num(&x, &[5.0, 3.0]);
        }
    }

    #[test]
    fn ldl_symmetric_matrix() {
        let a = ints(2, 2, &[4, 2, 2, 3]);
        let (l, d) = a.ldl().unwrap();
        assert_num(&l, &[1.0, 0.0, 0.5, 1.0]);
        assert_num(&d, &[4.0, 0.0, 0.0, 2.0]);
        // A = L D L^T
        let lt = ExprMat::new(2, 2, vec![
            l.at(0, 0).clone(),
            l.at(1, 0).clone(),
            l.at(0, 1).clone(),
            l.at(1, 1).clone(),
        ])
        .unwrap();
        let back = l.matmul(&d).unwrap().matmul(&lt).unwrap();
        assert_num(&back, &[4.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn ldl_rejects_asymmetric_input() {
        let a = ints(2, 2, &[1, 2, 3, 4]);
        assert_eq!(a.ldl(), Err(LinAlgError::NotSymmetric));
    }

    #[test]
    fn ffldu_reconstructs_input() {
        let a = ints(3, 3, &[2, 1, 1, 1, 3, 2, 1, 0, 0]);
        let (l, d, u) = a.ffldu().unwrap();
        assert_num(&l, &[2.0, 0.0, 0.0, 1.0, 5.0, 0.0, 1.0, -1.0, -1.0]);
        assert_num(&d, &[2.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, -5.0]);
        assert_num(&u, &[2.0, 1.0, 1.0, 0.0, 5.0, 3.0, 0.0, 0.0, -1.0]);
        let back = l
            .matmul(&d.inv(SolveMethod::Lu).unwrap())
            .unwrap()
            .matmul(&u)
            .unwrap();
        assert_num(&back, &[2.0, 1.0, 1.0, 1.0, 3.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn fflu_keeps_integer_entries() {
        let a = ints(3, 3, &[2, 1, 1, 1, 3, 2, 1, 0, 0]);
        let (l, u) = a.fflu().unwrap();
        for e in l.data().iter().chain(u.data()) {
            assert!(matches!(e, Expr::Integer(_)), "non-integer entry {e}");
        }
    }

    #[test]
    fn solve_methods_agree() {
        let a = ints(2, 2, &[2, 1, 1, 3]);
        let b = ints(2, 1, &[3, 5]);
        let x1 = a.solve(&b, SolveMethod::Lu).unwrap();
        let x2 = a.solve(&b, SolveMethod::FractionFree).unwrap();
        assert_num(&x1, &[0.8, 1.4]);
        assert_num(&x2, &[0.8, 1.4]);
    }

    #[test]
    fn inverse_round_trip() {
        let a = ints(2, 2, &[1, 2, 3, 4]);
        let inv = a.inv(SolveMethod::FractionFree).unwrap();
        assert_num(&inv, &[-2.0, 1.0, 1.5, -0.5]);
        let prod = a.matmul(&inv).unwrap();
        assert_num(&prod, &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn solve_shape_mismatch() {
        let a = ints(2, 2, &[1, 0, 0, 1]);
        let b = ints(3, 1, &[1, 2, 3]);
        assert!(matches!(
            a.solve(&b, SolveMethod::Lu),
            Err(LinAlgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn non_square_rejected() {
        let a = ints(2, 3, &[1, 2, 3, 4, 5, 6]);
        assert!(matches!(a.lu(), Err(LinAlgError::NonSquare { .. })));
    }
}
