//! Property-based tests for matrix construction and algebra
//!
//! This module uses proptest to verify the construction resolver and the
//! group laws across randomly generated shapes and integer contents.

#[cfg(test)]
mod tests {
    use crate::ops::{GroupOps, LieGroupOps, StorageOps};
    use crate::{shape, Matrix, MatrixArgs};
    use proptest::prelude::*;
    use symmat_expr::Expr;

    fn dims_strategy() -> impl Strategy<Value = (usize, usize)> {
        (1usize..=5, 1usize..=5)
    }

    fn matrix_strategy() -> impl Strategy<Value = Matrix> {
        dims_strategy().prop_flat_map(|(rows, cols)| {
            prop::collection::vec(-20i64..=20, rows * cols).prop_map(move |vals| {
                Matrix::from_shape_data(
                    rows,
                    cols,
                    vals.into_iter().map(Expr::integer).collect(),
                )
                .unwrap()
            })
        })
    }

    #[test]
    fn test_proptest_smoke() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(m.shape(), (2, 3));
    }

    proptest! {
        #[test]
        fn prop_resolve_idempotent((rows, cols) in (0usize..=9, 0usize..=9)) {
            let a = shape::resolve(rows, cols);
            let b = shape::resolve(rows, cols);
            prop_assert!(std::ptr::eq(a, b));
            prop_assert_eq!(a.shape(), (rows, cols));
        }

        #[test]
        fn prop_construction_cases_agree(m in matrix_strategy()) {
            // Flat data on the fixed shape, shaped data on the dynamic
            // entry point, and a literal scalar run all build the same
            // value.
            let t = m.shape_type();
            let flat = t.new(MatrixArgs::Flat(m.data().to_vec())).unwrap();
            let shaped = Matrix::from_shape_data(m.rows(), m.cols(), m.data().to_vec()).unwrap();
            let literal = t.new(MatrixArgs::Scalars(m.data().to_vec())).unwrap();
            prop_assert_eq!(&flat, &shaped);
            prop_assert_eq!(&flat, &literal);
        }

        #[test]
        fn prop_storage_round_trip(m in matrix_strategy()) {
            let back = m.from_storage(&m.to_storage()).unwrap();
            prop_assert_eq!(back, m);
        }

        #[test]
        fn prop_group_laws(m in matrix_strategy()) {
            prop_assert_eq!(m.compose(&m.identity()), m.clone());
            prop_assert_eq!(m.compose(&m.inverse()), m.identity());
        }

        #[test]
        fn prop_tangent_jacobians_are_identity(m in matrix_strategy()) {
            let n = m.storage_dim();
            prop_assert_eq!(m.storage_d_tangent(), Matrix::eye(n, n));
            prop_assert_eq!(m.tangent_d_storage(), Matrix::eye(n, n));
        }

        #[test]
        fn prop_transpose_involution(m in matrix_strategy()) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn prop_reshape_preserves_data(m in matrix_strategy()) {
            let flat = m.reshape(m.storage_dim(), 1).unwrap();
            prop_assert_eq!(flat.to_flat_list(), m.to_flat_list());
            let back = flat.reshape(m.rows(), m.cols()).unwrap();
            prop_assert_eq!(back, m);
        }

        #[test]
        fn prop_join_of_split_restores(m in matrix_strategy()) {
            // Splitting into single columns and column-joining the rows
            // back reproduces the value.
            let cols: Vec<Matrix> = (0..m.cols()).map(|j| m.col(j)).collect();
            let mut joined = cols[0].clone();
            for c in &cols[1..] {
                joined = joined.row_join(c).unwrap();
            }
            prop_assert_eq!(joined, m);
        }

        #[test]
        fn prop_column_stack_columns(m in matrix_strategy()) {
            let cols: Vec<Matrix> = (0..m.cols()).map(|j| m.col(j)).collect();
            let stacked = Matrix::column_stack(&cols).unwrap();
            prop_assert_eq!(stacked, m);
        }

        #[test]
        fn prop_scalar_distributes(m in matrix_strategy(), k in -5i64..=5) {
            let k = Expr::integer(k);
            let lhs = &(&m + &m) * k.clone();
            let rhs = &(&m * k.clone()) + &(&m * k);
            prop_assert_eq!(lhs, rhs);
        }
    }
}
