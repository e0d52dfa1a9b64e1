//! Integration tests for symmat-expr
//!
//! These tests verify end-to-end symbolic pipelines: build, differentiate,
//! substitute, evaluate, and decompose.

use anyhow::Result;
use symmat_expr::{Expr, ExprMat, SolveMethod};

#[test]
fn test_differentiate_then_evaluate() -> Result<()> {
    // f = (x + 1)^2, f' = 2(x + 1), f'(3) = 8.
    let x = Expr::symbol("x");
    let f = Expr::pow(x.clone() + Expr::integer(1), Expr::integer(2));
    let df = f.diff(&x)?;
    let at_three = df.subs(&[(x, Expr::integer(3))]);
    assert_eq!(at_three.eval_num()?, 8.0);
    Ok(())
}

#[test]
fn test_normalization_gives_structural_identities() {
    let x = Expr::symbol("x");
    let y = Expr::symbol("y");

    // Identities the matrix layer depends on for its group laws.
    assert_eq!(x.clone() - x.clone(), Expr::integer(0));
    assert_eq!(x.clone() + y.clone(), y.clone() + x.clone());
    assert_eq!((x.clone() / y.clone()) * y.clone(), x);
}

#[test]
fn test_symbolic_solve_round_trip() -> Result<()> {
    // Solve [[a, 0], [0, b]] x = [1, 1] symbolically, then bind values.
    let a = Expr::symbol("a");
    let b = Expr::symbol("b");
    let m = ExprMat::new(
        2,
        2,
        vec![a.clone(), Expr::integer(0), Expr::integer(0), b.clone()],
    )?;
    let rhs = ExprMat::new(2, 1, vec![Expr::integer(1), Expr::integer(1)])?;

    let x = m.solve(&rhs, SolveMethod::Lu)?;
    assert_eq!(x.at(0, 0), &(Expr::integer(1) / a.clone()));

    let bound = x.at(1, 0).subs(&[(b, Expr::integer(4))]);
    assert_eq!(bound.eval_num()?, 0.25);
    Ok(())
}

#[test]
fn test_fraction_free_stays_exact() -> Result<()> {
    let m = ExprMat::new(
        3,
        3,
        [3, 1, 2, 1, 4, 1, 2, 1, 5]
            .iter()
            .map(|&v| Expr::integer(v))
            .collect(),
    )?;
    let (l, _, u) = m.ffldu()?;
    for e in l.data().iter().chain(u.data()) {
        assert!(matches!(e, Expr::Integer(_)), "inexact entry {e}");
    }

    let inv = m.inv(SolveMethod::FractionFree)?;
    let eye = m.matmul(&inv)?;
    for i in 0..3 {
        for j in 0..3 {
            let want = if i == j { 1.0 } else { 0.0 };
            assert!((eye.at(i, j).eval_num()? - want).abs() < 1e-9);
        }
    }
    Ok(())
}
