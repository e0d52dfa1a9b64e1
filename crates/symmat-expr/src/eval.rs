//! Numeric evaluation of expressions.

use crate::error::ExprError;
use crate::expr::Expr;

impl Expr {
    /// Fully evaluate to a float.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::FreeSymbol`] if any symbol remains; bind symbols
    /// with [`Expr::subs`](Expr::subs) first.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_expr::Expr;
    ///
    /// let e = Expr::rational(1, 2) + Expr::sqrt(Expr::integer(4));
    /// assert_eq!(e.eval_num().unwrap(), 2.5);
    /// ```
    pub fn eval_num(&self) -> Result<f64, ExprError> {
        match self {
            Expr::Integer(n) => Ok(*n as f64),
            Expr::Rational(n, d) => Ok(*n as f64 / *d as f64),
            Expr::Float(f) => Ok(*f),
            Expr::Symbol(s) => Err(ExprError::FreeSymbol(s.to_string())),
            Expr::Add(terms) => {
                let mut acc = 0.0;
                for t in terms {
                    acc += t.eval_num()?;
                }
                Ok(acc)
            }
            Expr::Mul(factors) => {
                let mut acc = 1.0;
                for f in factors {
                    acc *= f.eval_num()?;
                }
                Ok(acc)
            }
            Expr::Pow(b, e) => Ok(b.eval_num()?.powf(e.eval_num()?)),
            Expr::Ln(a) => Ok(a.eval_num()?.ln()),
            Expr::Sign(a) => {
                let v = a.eval_num()?;
                Ok(if v == 0.0 {
                    0.0
                } else if v > 0.0 {
                    1.0
                } else {
                    -1.0
                })
            }
        }
    }

    /// Numerically evaluate every fully-constant subtree, leaving symbolic
    /// parts untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_expr::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let e = (Expr::rational(1, 2) + Expr::rational(1, 4)) * x.clone();
    /// assert_eq!(e.evalf(), Expr::float(0.75) * x);
    /// ```
    pub fn evalf(&self) -> Expr {
        if let Ok(v) = self.eval_num() {
            return Expr::Float(v);
        }
        match self {
            Expr::Integer(_) | Expr::Rational(_, _) | Expr::Float(_) | Expr::Symbol(_) => {
                self.clone()
            }
            Expr::Add(terms) => Expr::add(terms.iter().map(Expr::evalf).collect()),
            Expr::Mul(factors) => Expr::mul(factors.iter().map(Expr::evalf).collect()),
            Expr::Pow(b, e) => Expr::pow(b.evalf(), e.evalf()),
            Expr::Ln(a) => Expr::ln(a.evalf()),
            Expr::Sign(a) => Expr::sign(a.evalf()),
        }
    }
}
