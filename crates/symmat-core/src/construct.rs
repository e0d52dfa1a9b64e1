//! The construction resolver.
//!
//! All matrix construction funnels through one place: a [`MatrixArgs`]
//! request built by the named factory methods on [`Matrix`](crate::Matrix)
//! and [`ShapeType`](crate::ShapeType) is resolved here into
//! `(rows, cols, flat row-major data)`. Each request variant carries its
//! intent explicitly, so there is no argument sniffing; the resolver only
//! validates and normalizes.
//!
//! Resolution is shape-first: when a fixed requesting shape is present, the
//! resolved shape must agree with it exactly, and requests that are only
//! meaningful on the dynamic entry point (bare dimensions, un-shaped flat
//! data) are rejected on fixed shapes rather than reinterpreted.

use symmat_expr::Expr;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::shape::ShapeType;

/// One cell of a nested construction request.
///
/// Matrices are representable so that the resolver can reject them with
/// [`MatrixError::UseBlockConstructor`] instead of silently flattening;
/// block assembly goes through
/// [`Matrix::block_matrix`](crate::Matrix::block_matrix).
#[derive(Debug, Clone)]
pub enum Entry {
    Scalar(Expr),
    Matrix(Matrix),
}

impl From<Expr> for Entry {
    fn from(e: Expr) -> Self {
        Entry::Scalar(e)
    }
}

impl From<i64> for Entry {
    fn from(n: i64) -> Self {
        Entry::Scalar(Expr::integer(n))
    }
}

impl From<f64> for Entry {
    fn from(f: f64) -> Self {
        Entry::Scalar(Expr::float(f))
    }
}

impl From<Matrix> for Entry {
    fn from(m: Matrix) -> Self {
        Entry::Matrix(m)
    }
}

/// A construction request. Built by the named factories, consumed by
/// [`resolve_args`].
#[derive(Debug, Clone)]
pub enum MatrixArgs {
    /// No arguments. Legal only with a fixed requesting shape; yields zeros.
    Empty,
    /// Copy another matrix's shape and data.
    Copy(Matrix),
    /// Row-major nested data. Every inner vector is one row.
    Nested(Vec<Vec<Entry>>),
    /// Flat data with no shape attached. On a fixed requesting shape the
    /// length must match; on the dynamic entry point this is a column vector.
    Flat(Vec<Expr>),
    /// Bare dimensions; zeros of that shape. Dynamic entry point only.
    Dims { rows: usize, cols: usize },
    /// Dimensions plus flat row-major data.
    Shaped {
        rows: usize,
        cols: usize,
        data: Vec<Expr>,
    },
    /// A literal run of scalars, meaningful only when a fixed requesting
    /// shape pins down the element count.
    Scalars(Vec<Expr>),
}

/// Resolve a construction request against an optional fixed requesting
/// shape, returning `(rows, cols, data)` with `data.len() == rows * cols`
/// in row-major order.
///
/// # Errors
///
/// Every variant of [`MatrixError`] documented on the corresponding factory
/// method; notably [`MatrixError::ShapeRequired`] for [`MatrixArgs::Empty`]
/// without a fixed shape, and [`MatrixError::InvalidConstructionArgs`] for
/// any request that disagrees with the fixed requesting shape.
pub fn resolve_args(
    requested: Option<&'static ShapeType>,
    args: MatrixArgs,
) -> Result<(usize, usize, Vec<Expr>)> {
    let resolved = match args {
        MatrixArgs::Empty => match requested {
            Some(shape) => {
                let (rows, cols) = shape.shape();
                (rows, cols, vec![Expr::integer(0); rows * cols])
            }
            None => return Err(MatrixError::ShapeRequired),
        },
        MatrixArgs::Copy(src) => (src.rows(), src.cols(), src.data().to_vec()),
        MatrixArgs::Nested(rows_data) => resolve_nested(rows_data)?,
        MatrixArgs::Flat(data) => match requested {
            Some(shape) => {
                if data.len() != shape.storage_dim() {
                    return Err(MatrixError::LengthMismatch {
                        expected: shape.storage_dim(),
                        got: data.len(),
                    });
                }
                (shape.rows(), shape.cols(), data)
            }
            None => {
                if data.is_empty() {
                    (0, 0, data)
                } else {
                    (data.len(), 1, data)
                }
            }
        },
        MatrixArgs::Dims { rows, cols } => {
            if requested.is_some() {
                // Ambiguous with a two-scalar literal on a fixed shape.
                return Err(MatrixError::InvalidConstructionArgs(format!(
                    "bare dimensions ({rows}, {cols}) are only accepted on the \
                     dynamic entry point; use zeros or a literal constructor"
                )));
            }
            (rows, cols, vec![Expr::integer(0); rows * cols])
        }
        MatrixArgs::Shaped { rows, cols, data } => {
            if data.len() != rows * cols {
                return Err(MatrixError::LengthMismatch {
                    expected: rows * cols,
                    got: data.len(),
                });
            }
            (rows, cols, data)
        }
        MatrixArgs::Scalars(data) => match requested {
            Some(shape) if data.len() == shape.storage_dim() => {
                (shape.rows(), shape.cols(), data)
            }
            Some(shape) => {
                return Err(MatrixError::InvalidConstructionArgs(format!(
                    "{} scalar literals for a {}x{} shape (needs {})",
                    data.len(),
                    shape.rows(),
                    shape.cols(),
                    shape.storage_dim()
                )))
            }
            None => {
                return Err(MatrixError::InvalidConstructionArgs(
                    "scalar literals need a fixed requesting shape".into(),
                ))
            }
        },
    };

    if let Some(shape) = requested {
        if (resolved.0, resolved.1) != shape.shape() {
            return Err(MatrixError::InvalidConstructionArgs(format!(
                "resolved shape {}x{} disagrees with requested shape {}x{}",
                resolved.0,
                resolved.1,
                shape.rows(),
                shape.cols()
            )));
        }
    }
    Ok(resolved)
}

fn resolve_nested(rows_data: Vec<Vec<Entry>>) -> Result<(usize, usize, Vec<Expr>)> {
    let rows = rows_data.len();
    let cols = rows_data.first().map_or(0, Vec::len);
    let mut data = Vec::with_capacity(rows * cols);
    for (i, row) in rows_data.into_iter().enumerate() {
        if row.len() != cols {
            return Err(MatrixError::InconsistentColumns(format!(
                "row 0 has {cols} entries but row {i} has {}",
                row.len()
            )));
        }
        for entry in row {
            match entry {
                Entry::Scalar(e) => data.push(e),
                Entry::Matrix(_) => return Err(MatrixError::UseBlockConstructor),
            }
        }
    }
    Ok((rows, cols, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape;

    #[test]
    fn empty_requires_a_fixed_shape() {
        let t = shape::resolve(2, 3);
        let (r, c, data) = resolve_args(Some(t), MatrixArgs::Empty).unwrap();
        assert_eq!((r, c), (2, 3));
        assert!(data.iter().all(Expr::is_zero));

        assert!(matches!(
            resolve_args(None, MatrixArgs::Empty),
            Err(MatrixError::ShapeRequired)
        ));
    }

    #[test]
    fn nested_rows_must_agree() {
        let args = MatrixArgs::Nested(vec![
            vec![1.into(), 2.into()],
            vec![3.into()],
        ]);
        assert!(matches!(
            resolve_args(None, args),
            Err(MatrixError::InconsistentColumns(_))
        ));
    }

    #[test]
    fn nested_rejects_matrix_entries() {
        let inner = Matrix::from_dims(1, 1).unwrap();
        let args = MatrixArgs::Nested(vec![vec![inner.into()]]);
        assert!(matches!(
            resolve_args(None, args),
            Err(MatrixError::UseBlockConstructor)
        ));
    }

    #[test]
    fn flat_is_a_column_vector_on_the_dynamic_entry_point() {
        let data = vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)];
        let (r, c, _) = resolve_args(None, MatrixArgs::Flat(data)).unwrap();
        assert_eq!((r, c), (3, 1));

        let (r, c, _) = resolve_args(None, MatrixArgs::Flat(Vec::new())).unwrap();
        assert_eq!((r, c), (0, 0));
    }

    #[test]
    fn flat_length_is_checked_against_a_fixed_shape() {
        let t = shape::resolve(2, 2);
        let short = vec![Expr::integer(1); 3];
        assert!(matches!(
            resolve_args(Some(t), MatrixArgs::Flat(short)),
            Err(MatrixError::LengthMismatch {
                expected: 4,
                got: 3
            })
        ));
    }

    #[test]
    fn bare_dims_are_dynamic_only() {
        let (r, c, data) =
            resolve_args(None, MatrixArgs::Dims { rows: 2, cols: 2 }).unwrap();
        assert_eq!((r, c), (2, 2));
        assert_eq!(data.len(), 4);

        let t = shape::resolve(2, 2);
        assert!(matches!(
            resolve_args(Some(t), MatrixArgs::Dims { rows: 2, cols: 2 }),
            Err(MatrixError::InvalidConstructionArgs(_))
        ));
    }

    #[test]
    fn shaped_data_length_is_checked() {
        let args = MatrixArgs::Shaped {
            rows: 2,
            cols: 3,
            data: vec![Expr::integer(0); 5],
        };
        assert!(matches!(
            resolve_args(None, args),
            Err(MatrixError::LengthMismatch {
                expected: 6,
                got: 5
            })
        ));
    }

    #[test]
    fn scalar_literals_need_an_exact_count() {
        let t = shape::resolve(2, 2);
        let four = vec![Expr::integer(7); 4];
        let (r, c, data) = resolve_args(Some(t), MatrixArgs::Scalars(four)).unwrap();
        assert_eq!((r, c, data.len()), (2, 2, 4));

        let three = vec![Expr::integer(7); 3];
        assert!(matches!(
            resolve_args(Some(t), MatrixArgs::Scalars(three)),
            Err(MatrixError::InvalidConstructionArgs(_))
        ));
        assert!(matches!(
            resolve_args(None, MatrixArgs::Scalars(vec![Expr::integer(7)])),
            Err(MatrixError::InvalidConstructionArgs(_))
        ));
    }

    #[test]
    fn copy_shape_must_match_the_requesting_shape() {
        let src = Matrix::from_dims(2, 3).unwrap();
        let wrong = shape::resolve(3, 2);
        assert!(matches!(
            resolve_args(Some(wrong), MatrixArgs::Copy(src)),
            Err(MatrixError::InvalidConstructionArgs(_))
        ));
    }
}
