//! The matrix value type.
//!
//! A [`Matrix`] is a shape-resolved, row-major sequence of engine scalars.
//! Its shape is fixed at construction (the `&'static ShapeType` it carries
//! comes from the registry and never changes); element mutation through
//! indexing is allowed, structural mutation is not. Every constructor goes
//! through [`crate::construct::resolve_args`], so no value ever exists
//! without a resolved shape.
//!
//! Submodules add the operator overloads, the group and Lie-group trait
//! implementations, the linear-algebra facade, and the differentiation and
//! block-assembly utilities.

mod calculus;
mod group;
mod linalg;
mod ops;

use std::fmt;
use std::ops::{Index, IndexMut};

use symmat_expr::{Expr, ExprMat};

use crate::construct::{resolve_args, Entry, MatrixArgs};
use crate::error::{MatrixError, Result};
use crate::shape::{self, ShapeType};

/// A symbolic matrix with an interned fixed shape.
///
/// # Examples
///
/// ```
/// use symmat_core::Matrix;
/// use symmat_expr::Expr;
///
/// let m = Matrix::from_nested(vec![
///     vec![1.into(), 2.into()],
///     vec![3.into(), 4.into()],
/// ])?;
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m[(1, 0)], Expr::integer(3));
/// # Ok::<(), symmat_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    shape: &'static ShapeType,
    data: Vec<Expr>,
}

impl Matrix {
    /// Construct through the dynamic entry point: the resolved shape is
    /// whatever the request implies.
    ///
    /// # Errors
    ///
    /// [`MatrixError::ShapeRequired`] for [`MatrixArgs::Empty`], plus the
    /// per-variant validation errors of the resolver.
    pub fn new(args: MatrixArgs) -> Result<Self> {
        let (rows, cols, data) = resolve_args(None, args)?;
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Zero matrix of the given dimensions.
    ///
    /// # Errors
    ///
    /// Infallible in practice; kept fallible for uniformity with the other
    /// named factories.
    pub fn from_dims(rows: usize, cols: usize) -> Result<Self> {
        Self::new(MatrixArgs::Dims { rows, cols })
    }

    /// Column vector from flat data (or the empty 0x0 matrix).
    pub fn from_flat(data: Vec<Expr>) -> Result<Self> {
        Self::new(MatrixArgs::Flat(data))
    }

    /// Matrix from row-major nested data.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InconsistentColumns`] when rows differ in length,
    /// [`MatrixError::UseBlockConstructor`] when an entry is itself a matrix.
    pub fn from_nested(rows: Vec<Vec<Entry>>) -> Result<Self> {
        Self::new(MatrixArgs::Nested(rows))
    }

    /// Matrix from explicit dimensions plus flat row-major data.
    ///
    /// # Errors
    ///
    /// [`MatrixError::LengthMismatch`] when `data.len() != rows * cols`.
    pub fn from_shape_data(rows: usize, cols: usize, data: Vec<Expr>) -> Result<Self> {
        Self::new(MatrixArgs::Shaped { rows, cols, data })
    }

    /// Matrix populated by calling `f(row, col)` for every position in
    /// row-major order.
    pub fn from_generator<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Expr,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self::new(MatrixArgs::Shaped { rows, cols, data })
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<Expr>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            shape: shape::resolve(rows, cols),
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// The `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        self.shape.shape()
    }

    /// The interned shape descriptor this value was resolved to.
    pub fn shape_type(&self) -> &'static ShapeType {
        self.shape
    }

    /// Flat row-major view of the elements.
    pub fn data(&self) -> &[Expr] {
        &self.data
    }

    pub fn is_vector(&self) -> bool {
        self.shape.is_vector()
    }

    pub(crate) fn at(&self, r: usize, c: usize) -> &Expr {
        &self.data[r * self.cols() + c]
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, value: Expr) {
        let cols = self.cols();
        self.data[r * cols + c] = value;
    }

    pub(crate) fn to_engine(&self) -> ExprMat {
        ExprMat::new(self.rows(), self.cols(), self.data.clone())
            .expect("shape invariant guarantees data length")
    }

    pub(crate) fn from_engine(m: ExprMat) -> Self {
        let (rows, cols) = (m.rows(), m.cols());
        Self::from_parts(rows, cols, m.into_data())
    }
}

/// Builders.
impl Matrix {
    /// Zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_parts(rows, cols, vec![Expr::integer(0); rows * cols])
    }

    /// One-filled matrix.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::from_parts(rows, cols, vec![Expr::integer(1); rows * cols])
    }

    /// Identity-patterned matrix: ones on the main diagonal for the first
    /// `min(rows, cols)` positions, zero elsewhere. Rectangular shapes are
    /// accepted.
    pub fn eye(rows: usize, cols: usize) -> Self {
        let mut m = Self::zeros(rows, cols);
        for i in 0..rows.min(cols) {
            m.set(i, i, Expr::integer(1));
        }
        m
    }

    /// Square diagonal matrix from the given entries.
    pub fn diag(values: Vec<Expr>) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, v) in values.into_iter().enumerate() {
            m.set(i, i, v);
        }
        m
    }

    /// Matrix of fresh named symbols, one per element.
    ///
    /// Column vectors are named `name0`, `name1`, ...; every other shape is
    /// named `name{row}_{col}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_core::Matrix;
    /// use symmat_expr::Expr;
    ///
    /// let v = Matrix::symbolic("v", 3, 1);
    /// assert_eq!(v[(2, 0)], Expr::symbol("v2"));
    /// let m = Matrix::symbolic("m", 2, 2);
    /// assert_eq!(m[(0, 1)], Expr::symbol("m0_1"));
    /// ```
    pub fn symbolic(name: &str, rows: usize, cols: usize) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let sym = if cols == 1 {
                    Expr::symbol(&format!("{name}{r}"))
                } else {
                    Expr::symbol(&format!("{name}{r}_{c}"))
                };
                data.push(sym);
            }
        }
        Self::from_parts(rows, cols, data)
    }
}

/// Shape transforms and elementwise maps.
impl Matrix {
    /// Transpose.
    pub fn transpose(&self) -> Self {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(rows * cols);
        for c in 0..cols {
            for r in 0..rows {
                data.push(self.at(r, c).clone());
            }
        }
        Self::from_parts(cols, rows, data)
    }

    /// Reinterpret the row-major data under new dimensions.
    ///
    /// # Errors
    ///
    /// [`MatrixError::LengthMismatch`] when the element count changes.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Self> {
        if rows * cols != self.data.len() {
            return Err(MatrixError::LengthMismatch {
                expected: rows * cols,
                got: self.data.len(),
            });
        }
        Ok(Self::from_parts(rows, cols, self.data.clone()))
    }

    /// Apply a scalar function to every element.
    pub fn applyfunc<F>(&self, f: F) -> Self
    where
        F: Fn(&Expr) -> Expr,
    {
        let data = self.data.iter().map(f).collect();
        Self::from_parts(self.rows(), self.cols(), data)
    }

    /// Simplify every element.
    pub fn simplify(&self) -> Self {
        self.applyfunc(Expr::simplify)
    }

    /// Substitute scalar expressions elementwise.
    pub fn subs(&self, pairs: &[(Expr, Expr)]) -> Self {
        self.applyfunc(|e| e.subs(pairs))
    }

    /// Numerically evaluate every constant subexpression, elementwise.
    pub fn evalf(&self) -> Self {
        self.applyfunc(Expr::evalf)
    }

    /// Row `i` as a 1xN matrix.
    pub fn row(&self, i: usize) -> Self {
        let cols = self.cols();
        let data = (0..cols).map(|c| self.at(i, c).clone()).collect();
        Self::from_parts(1, cols, data)
    }

    /// Column `j` as an Nx1 matrix.
    pub fn col(&self, j: usize) -> Self {
        let rows = self.rows();
        let data = (0..rows).map(|r| self.at(r, j).clone()).collect();
        Self::from_parts(rows, 1, data)
    }
}

/// Conversion boundary for downstream numeric consumers.
impl Matrix {
    /// Nested row-major copy of the elements.
    pub fn to_list(&self) -> Vec<Vec<Expr>> {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| self.at(r, c).clone()).collect())
            .collect()
    }

    /// Flat row-major copy of the elements.
    pub fn to_flat_list(&self) -> Vec<Expr> {
        self.data.clone()
    }

    /// Fully numeric nested copy.
    ///
    /// # Errors
    ///
    /// [`MatrixError::Engine`] when any element still contains a free
    /// symbol.
    pub fn to_array(&self) -> Result<Vec<Vec<f64>>> {
        (0..self.rows())
            .map(|r| {
                (0..self.cols())
                    .map(|c| self.at(r, c).eval_num().map_err(MatrixError::from))
                    .collect()
            })
            .collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Expr;

    fn index(&self, (r, c): (usize, usize)) -> &Expr {
        assert!(r < self.rows() && c < self.cols(), "index out of bounds");
        self.at(r, c)
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Expr {
        assert!(r < self.rows() && c < self.cols(), "index out of bounds");
        let cols = self.cols();
        &mut self.data[r * cols + c]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            write!(f, "[")?;
            for c in 0..self.cols() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.at(r, c))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Construction through a fixed requesting shape.
///
/// These mirror the [`Matrix`] factories but anchor resolution to `self`,
/// so any request whose resolved shape disagrees is rejected and bare
/// dimensions are never accepted.
impl ShapeType {
    /// Resolve a construction request against this fixed shape.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidConstructionArgs`] when the request resolves to
    /// a different shape or is only legal on the dynamic entry point, plus
    /// the per-variant resolver errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_core::{shape, MatrixArgs};
    ///
    /// let m22 = shape::resolve(2, 2);
    /// let m = m22.new(MatrixArgs::Empty)?;
    /// assert_eq!(m.shape(), (2, 2));
    /// # Ok::<(), symmat_core::MatrixError>(())
    /// ```
    pub fn new(&'static self, args: MatrixArgs) -> Result<Matrix> {
        let (rows, cols, data) = resolve_args(Some(self), args)?;
        Ok(Matrix::from_parts(rows, cols, data))
    }

    /// Zero matrix of this shape.
    pub fn zero(&'static self) -> Matrix {
        Matrix::zeros(self.rows(), self.cols())
    }

    /// One-filled matrix of this shape.
    pub fn one(&'static self) -> Matrix {
        Matrix::ones(self.rows(), self.cols())
    }

    /// Identity-patterned matrix of this shape. Distinct from the group
    /// identity, which is the zero matrix.
    pub fn matrix_identity(&'static self) -> Matrix {
        Matrix::eye(self.rows(), self.cols())
    }

    /// Matrix of fresh named symbols of this shape.
    pub fn symbolic(&'static self, name: &str) -> Matrix {
        Matrix::symbolic(name, self.rows(), self.cols())
    }

    /// Matrix of this shape populated by `f(row, col)`.
    pub fn from_generator<F>(&'static self, f: F) -> Result<Matrix>
    where
        F: FnMut(usize, usize) -> Expr,
    {
        Matrix::from_generator(self.rows(), self.cols(), f)
    }
}
