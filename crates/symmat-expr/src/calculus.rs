//! Scalar differentiation and substitution.

use crate::error::ExprError;
use crate::expr::Expr;

impl Expr {
    /// Differentiate with respect to `wrt`, which must be a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::NotASymbol`] if `wrt` is any other expression
    /// kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_expr::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let f = Expr::pow(x.clone(), Expr::integer(3));
    /// let df = f.diff(&x).unwrap();
    /// assert_eq!(df, Expr::integer(3) * Expr::pow(x, Expr::integer(2)));
    /// ```
    pub fn diff(&self, wrt: &Expr) -> Result<Expr, ExprError> {
        match wrt {
            Expr::Symbol(name) => Ok(self.diff_named(name)),
            other => Err(ExprError::NotASymbol(other.to_string())),
        }
    }

    fn diff_named(&self, name: &str) -> Expr {
        match self {
            Expr::Integer(_) | Expr::Rational(_, _) | Expr::Float(_) => Expr::Integer(0),
            Expr::Symbol(s) => {
                if s.as_ref() == name {
                    Expr::Integer(1)
                } else {
                    Expr::Integer(0)
                }
            }
            Expr::Add(terms) => Expr::add(terms.iter().map(|t| t.diff_named(name)).collect()),
            Expr::Mul(factors) => {
                // Product rule over n factors.
                let mut terms = Vec::with_capacity(factors.len());
                for i in 0..factors.len() {
                    let mut parts = Vec::with_capacity(factors.len());
                    for (j, f) in factors.iter().enumerate() {
                        if i == j {
                            parts.push(f.diff_named(name));
                        } else {
                            parts.push(f.clone());
                        }
                    }
                    terms.push(Expr::mul(parts));
                }
                Expr::add(terms)
            }
            Expr::Pow(base, exp) => {
                let b = (**base).clone();
                let e = (**exp).clone();
                let db = base.diff_named(name);
                if exp.as_number().is_some() {
                    // d(b^c) = c * b^(c-1) * b'
                    let em1 = e.clone() - Expr::Integer(1);
                    Expr::mul(vec![e, Expr::pow(b, em1), db])
                } else {
                    // d(b^e) = b^e * (e' ln b + e b' / b)
                    let de = exp.diff_named(name);
                    let inner = Expr::mul(vec![de, Expr::ln(b.clone())])
                        + Expr::mul(vec![e, db, Expr::pow(b.clone(), Expr::Integer(-1))]);
                    Expr::mul(vec![self.clone(), inner])
                }
            }
            Expr::Ln(arg) => {
                let da = arg.diff_named(name);
                Expr::mul(vec![da, Expr::pow((**arg).clone(), Expr::Integer(-1))])
            }
            // Zero almost everywhere.
            Expr::Sign(_) => Expr::Integer(0),
        }
    }

    /// Replace every occurrence of each left-hand expression with the paired
    /// right-hand one, bottom-up, renormalizing along the way.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_expr::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let f = x.clone() * x.clone() + Expr::integer(1);
    /// let v = f.subs(&[(x, Expr::integer(3))]);
    /// assert_eq!(v, Expr::integer(10));
    /// ```
    pub fn subs(&self, pairs: &[(Expr, Expr)]) -> Expr {
        for (from, to) in pairs {
            if self == from {
                return to.clone();
            }
        }
        match self {
            Expr::Integer(_) | Expr::Rational(_, _) | Expr::Float(_) | Expr::Symbol(_) => {
                self.clone()
            }
            Expr::Add(terms) => Expr::add(terms.iter().map(|t| t.subs(pairs)).collect()),
            Expr::Mul(factors) => Expr::mul(factors.iter().map(|f| f.subs(pairs)).collect()),
            Expr::Pow(b, e) => Expr::pow(b.subs(pairs), e.subs(pairs)),
            Expr::Ln(a) => Expr::ln(a.subs(pairs)),
            Expr::Sign(a) => Expr::sign(a.subs(pairs)),
        }
    }
}
