//! The scalar expression type and its smart constructors.
//!
//! Every constructor normalizes: constants fold, sums collect like terms,
//! products collect like factors, and children are kept in a canonical
//! order (see `simplify`). Code elsewhere in the workspace builds trees
//! exclusively through these constructors and the operator impls, so any
//! two structurally equal values denote the same expression.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::simplify::{normalize_add, normalize_mul, normalize_pow};

/// A symbolic scalar expression.
///
/// Numeric leaves are exact where possible (`Integer`, `Rational`) and fall
/// back to `Float` when a computation leaves the exact domain. `Rational`
/// values are always reduced with a positive denominator greater than one;
/// whole values normalize to `Integer`.
///
/// # Examples
///
/// ```
/// use symmat_expr::Expr;
///
/// let x = Expr::symbol("x");
/// let e = (x.clone() + Expr::integer(1)) * Expr::integer(2);
/// assert_eq!(e.to_string(), "2 + 2*x");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Exact integer constant.
    Integer(i64),
    /// Exact rational constant, reduced, denominator > 1.
    Rational(i64, i64),
    /// Inexact floating-point constant.
    Float(f64),
    /// A named free symbol.
    Symbol(Arc<str>),
    /// n-ary sum, flattened and sorted, at least two terms.
    Add(Vec<Expr>),
    /// n-ary product, flattened and sorted, at least two factors.
    Mul(Vec<Expr>),
    /// Power with arbitrary base and exponent.
    Pow(Box<Expr>, Box<Expr>),
    /// Natural logarithm.
    Ln(Box<Expr>),
    /// Sign function: -1, 0, or 1.
    Sign(Box<Expr>),
}

/// Exact-or-float numeric value used during normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    /// Reduced rational with positive denominator.
    Rat(i64, i64),
    Float(f64),
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

impl Number {
    pub(crate) const ZERO: Number = Number::Rat(0, 1);
    pub(crate) const ONE: Number = Number::Rat(1, 1);

    /// Build a reduced rational; falls back to float on i64 overflow.
    fn rat(num: i128, den: i128) -> Number {
        debug_assert!(den != 0, "zero denominator");
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = {
            let (mut a, mut b) = (num.abs(), den);
            while b != 0 {
                let t = a % b;
                a = b;
                b = t;
            }
            a.max(1)
        };
        let (num, den) = (num / g, den / g);
        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(n), Ok(d)) => Number::Rat(n, d),
            _ => Number::Float(num as f64 / den as f64),
        }
    }

    pub(crate) fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Rat(a, b), Number::Rat(c, d)) => {
                Number::rat(a as i128 * d as i128 + c as i128 * b as i128, b as i128 * d as i128)
            }
            _ => Number::Float(self.to_f64() + other.to_f64()),
        }
    }

    pub(crate) fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Rat(a, b), Number::Rat(c, d)) => {
                Number::rat(a as i128 * c as i128, b as i128 * d as i128)
            }
            _ => Number::Float(self.to_f64() * other.to_f64()),
        }
    }

    /// Reciprocal; `None` for exact zero.
    pub(crate) fn recip(self) -> Option<Number> {
        match self {
            Number::Rat(0, _) => None,
            Number::Rat(n, d) => Some(Number::rat(d as i128, n as i128)),
            Number::Float(f) if f == 0.0 => None,
            Number::Float(f) => Some(Number::Float(1.0 / f)),
        }
    }

    /// Raise to a (possibly negative) integer power; `None` when that would
    /// divide by zero.
    pub(crate) fn pow_int(self, exp: i64) -> Option<Number> {
        if exp < 0 {
            return self.recip().and_then(|r| r.pow_int(-exp));
        }
        let mut acc = Number::ONE;
        for _ in 0..exp {
            acc = acc.mul(self);
        }
        Some(acc)
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Number::Rat(n, _) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    pub(crate) fn is_one(self) -> bool {
        match self {
            Number::Rat(n, d) => n == 1 && d == 1,
            Number::Float(f) => f == 1.0,
        }
    }

    pub(crate) fn is_integer(self) -> Option<i64> {
        match self {
            Number::Rat(n, 1) => Some(n),
            _ => None,
        }
    }

    pub(crate) fn to_f64(self) -> f64 {
        match self {
            Number::Rat(n, d) => n as f64 / d as f64,
            Number::Float(f) => f,
        }
    }

    pub(crate) fn to_expr(self) -> Expr {
        match self {
            Number::Rat(n, 1) => Expr::Integer(n),
            Number::Rat(n, d) => Expr::Rational(n, d),
            Number::Float(f) => Expr::Float(f),
        }
    }
}

impl Expr {
    /// An exact integer constant.
    pub fn integer(value: i64) -> Expr {
        Expr::Integer(value)
    }

    /// An exact rational constant, reduced on construction.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use symmat_expr::Expr;
    ///
    /// assert_eq!(Expr::rational(2, 4), Expr::rational(1, 2));
    /// assert_eq!(Expr::rational(4, 2), Expr::integer(2));
    /// ```
    pub fn rational(num: i64, den: i64) -> Expr {
        assert!(den != 0, "rational with zero denominator");
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num, den);
        let (num, den) = (num / g, den / g);
        if den == 1 {
            Expr::Integer(num)
        } else {
            Expr::Rational(num, den)
        }
    }

    /// A floating-point constant.
    pub fn float(value: f64) -> Expr {
        Expr::Float(value)
    }

    /// A named free symbol.
    pub fn symbol(name: impl AsRef<str>) -> Expr {
        Expr::Symbol(Arc::from(name.as_ref()))
    }

    /// Normalized n-ary sum of `terms`.
    pub fn add(terms: Vec<Expr>) -> Expr {
        normalize_add(terms)
    }

    /// Normalized n-ary product of `factors`.
    pub fn mul(factors: Vec<Expr>) -> Expr {
        normalize_mul(factors)
    }

    /// Normalized power `base ^ exp`.
    pub fn pow(base: Expr, exp: Expr) -> Expr {
        normalize_pow(base, exp)
    }

    /// Square root, represented as `base ^ (1/2)`.
    pub fn sqrt(base: Expr) -> Expr {
        Expr::pow(base, Expr::rational(1, 2))
    }

    /// Natural logarithm; folds on numeric arguments where exact.
    pub fn ln(arg: Expr) -> Expr {
        match arg.as_number() {
            Some(n) if n.is_one() => Expr::Integer(0),
            Some(Number::Float(f)) if f > 0.0 => Expr::Float(f.ln()),
            _ => Expr::Ln(Box::new(arg)),
        }
    }

    /// Sign function: -1, 0, or 1; folds on numeric arguments.
    pub fn sign(arg: Expr) -> Expr {
        match arg.as_number() {
            Some(n) if n.is_zero() => Expr::Integer(0),
            Some(n) => Expr::Integer(if n.to_f64() > 0.0 { 1 } else { -1 }),
            None => Expr::Sign(Box::new(arg)),
        }
    }

    /// The numeric value of a constant leaf, if this is one.
    pub(crate) fn as_number(&self) -> Option<Number> {
        match *self {
            Expr::Integer(n) => Some(Number::Rat(n, 1)),
            Expr::Rational(n, d) => Some(Number::Rat(n, d)),
            Expr::Float(f) => Some(Number::Float(f)),
            _ => None,
        }
    }

    /// Whether this expression is the normalized zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().map(Number::is_zero).unwrap_or(false)
    }

    /// Whether this expression is the normalized one.
    pub fn is_one(&self) -> bool {
        self.as_number().map(Number::is_one).unwrap_or(false)
    }

    /// Re-normalize the whole tree bottom-up.
    ///
    /// Expressions built through the public constructors are already
    /// normalized; this is the engine's `simplify` entry point for trees
    /// produced by substitution or deserialization.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Integer(_) | Expr::Rational(_, _) | Expr::Float(_) | Expr::Symbol(_) => {
                self.clone()
            }
            Expr::Add(terms) => Expr::add(terms.iter().map(Expr::simplify).collect()),
            Expr::Mul(factors) => Expr::mul(factors.iter().map(Expr::simplify).collect()),
            Expr::Pow(b, e) => Expr::pow(b.simplify(), e.simplify()),
            Expr::Ln(a) => Expr::ln(a.simplify()),
            Expr::Sign(a) => Expr::sign(a.simplify()),
        }
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Expr {
        Expr::Integer(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Expr {
        Expr::Float(value)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::add(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::add(vec![self, Expr::mul(vec![Expr::Integer(-1), rhs])])
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::mul(vec![self, Expr::pow(rhs, Expr::Integer(-1))])
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::mul(vec![Expr::Integer(-1), self])
    }
}

fn fmt_factor(e: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match e {
        Expr::Add(_) => write!(f, "({e})"),
        Expr::Integer(n) if *n < 0 => write!(f, "({e})"),
        Expr::Rational(_, _) => write!(f, "({e})"),
        _ => write!(f, "{e}"),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(n) => write!(f, "{n}"),
            Expr::Rational(n, d) => write!(f, "{n}/{d}"),
            Expr::Float(v) => write!(f, "{v}"),
            Expr::Symbol(s) => write!(f, "{s}"),
            Expr::Add(terms) => {
                for (i, t) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{t}")?;
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                // Print a leading -1 coefficient as a bare minus sign.
                let (prefix, rest) = match factors.first() {
                    Some(Expr::Integer(-1)) if factors.len() > 1 => ("-", &factors[1..]),
                    _ => ("", &factors[..]),
                };
                write!(f, "{prefix}")?;
                for (i, x) in rest.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    fmt_factor(x, f)?;
                }
                Ok(())
            }
            Expr::Pow(b, e) => {
                fmt_factor(b, f)?;
                write!(f, "^")?;
                match e.as_ref() {
                    Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _) => write!(f, "({e})"),
                    Expr::Integer(n) if *n < 0 => write!(f, "({e})"),
                    Expr::Rational(_, _) => write!(f, "({e})"),
                    other => write!(f, "{other}"),
                }
            }
            Expr::Ln(a) => write!(f, "ln({a})"),
            Expr::Sign(a) => write!(f, "sign({a})"),
        }
    }
}
