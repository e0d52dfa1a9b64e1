//! Normalization rules shared by the `Expr` smart constructors.
//!
//! Sums collect like terms by their non-numeric part, products collect like
//! factors by base with numeric exponents summed, and powers fold where the
//! arithmetic stays exact. Children are sorted with a total canonical order
//! so that structurally equal trees are the same value.

use std::cmp::Ordering;

use crate::expr::{Expr, Number};

fn rank(e: &Expr) -> u8 {
    match e {
        Expr::Integer(_) | Expr::Rational(_, _) | Expr::Float(_) => 0,
        Expr::Symbol(_) => 1,
        Expr::Pow(_, _) => 2,
        Expr::Ln(_) => 3,
        Expr::Sign(_) => 4,
        Expr::Mul(_) => 5,
        Expr::Add(_) => 6,
    }
}

/// Total canonical order over expressions.
pub(crate) fn cmp_expr(a: &Expr, b: &Expr) -> Ordering {
    match rank(a).cmp(&rank(b)) {
        Ordering::Equal => {}
        other => return other,
    }
    match (a, b) {
        (Expr::Symbol(x), Expr::Symbol(y)) => x.cmp(y),
        (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) => {
            cmp_expr(b1, b2).then_with(|| cmp_expr(e1, e2))
        }
        (Expr::Ln(x), Expr::Ln(y)) | (Expr::Sign(x), Expr::Sign(y)) => cmp_expr(x, y),
        (Expr::Mul(xs), Expr::Mul(ys)) | (Expr::Add(xs), Expr::Add(ys)) => {
            for (x, y) in xs.iter().zip(ys.iter()) {
                match cmp_expr(x, y) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => {
            // Both numeric: order by value.
            let x = a.as_number().map(Number::to_f64).unwrap_or(0.0);
            let y = b.as_number().map(Number::to_f64).unwrap_or(0.0);
            x.total_cmp(&y)
        }
    }
}

/// Split a term into its numeric coefficient and remaining sorted factors.
fn split_term(term: Expr) -> (Number, Vec<Expr>) {
    match term {
        Expr::Mul(factors) => {
            let mut coeff = Number::ONE;
            let mut rest = Vec::with_capacity(factors.len());
            for f in factors {
                match f.as_number() {
                    Some(n) => coeff = coeff.mul(n),
                    None => rest.push(f),
                }
            }
            (coeff, rest)
        }
        other => (Number::ONE, vec![other]),
    }
}

fn rebuild_term(coeff: Number, mut key: Vec<Expr>) -> Expr {
    if coeff.is_one() {
        if key.len() == 1 {
            key.pop().expect("nonempty key")
        } else {
            Expr::Mul(key)
        }
    } else {
        let mut factors = Vec::with_capacity(key.len() + 1);
        factors.push(coeff.to_expr());
        factors.append(&mut key);
        Expr::Mul(factors)
    }
}

pub(crate) fn normalize_add(terms: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(terms.len());
    for t in terms {
        match t {
            Expr::Add(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    let mut constant = Number::ZERO;
    let mut groups: Vec<(Vec<Expr>, Number)> = Vec::new();
    for t in flat {
        if let Some(n) = t.as_number() {
            constant = constant.add(n);
            continue;
        }
        let (coeff, key) = split_term(t);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, c)) => *c = c.add(coeff),
            None => groups.push((key, coeff)),
        }
    }

    let mut out: Vec<Expr> = groups
        .into_iter()
        .filter(|(_, c)| !c.is_zero())
        .map(|(key, c)| rebuild_term(c, key))
        .collect();
    if !constant.is_zero() {
        out.push(constant.to_expr());
    }
    out.sort_by(cmp_expr);

    match out.len() {
        0 => Expr::Integer(0),
        1 => out.pop().expect("one term"),
        _ => Expr::Add(out),
    }
}

pub(crate) fn normalize_mul(factors: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(factors.len());
    for f in factors {
        match f {
            Expr::Mul(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    let mut coeff = Number::ONE;
    let mut groups: Vec<(Expr, Number)> = Vec::new();
    for f in flat {
        if let Some(n) = f.as_number() {
            coeff = coeff.mul(n);
            continue;
        }
        let (base, exp) = match f {
            Expr::Pow(b, e) => match e.as_number() {
                Some(n) => (*b, n),
                None => (Expr::Pow(b, e), Number::ONE),
            },
            other => (other, Number::ONE),
        };
        match groups.iter_mut().find(|(k, _)| *k == base) {
            Some((_, e)) => *e = e.add(exp),
            None => groups.push((base, exp)),
        }
    }

    if coeff.is_zero() {
        return Expr::Integer(0);
    }

    let mut out: Vec<Expr> = Vec::with_capacity(groups.len() + 1);
    for (base, exp) in groups {
        if exp.is_zero() {
            continue;
        }
        if exp.is_one() {
            out.push(base);
        } else {
            out.push(normalize_pow(base, exp.to_expr()));
        }
    }
    out.sort_by(cmp_expr);
    if !coeff.is_one() {
        // A numeric coefficient over a lone sum distributes into the
        // terms; an opaque `Mul([c, Add(..)])` could never cancel against
        // the sum's flattened terms.
        if matches!(out.as_slice(), [Expr::Add(_)]) {
            let Some(Expr::Add(terms)) = out.pop() else {
                unreachable!("checked above")
            };
            let c = coeff.to_expr();
            return normalize_add(
                terms
                    .into_iter()
                    .map(|t| normalize_mul(vec![c.clone(), t]))
                    .collect(),
            );
        }
        out.insert(0, coeff.to_expr());
    }

    match out.len() {
        0 => Expr::Integer(1),
        1 => out.pop().expect("one factor"),
        _ => Expr::Mul(out),
    }
}

pub(crate) fn normalize_pow(base: Expr, exp: Expr) -> Expr {
    if let Some(e) = exp.as_number() {
        if e.is_zero() {
            return Expr::Integer(1);
        }
        if e.is_one() {
            return base;
        }
        if let Some(b) = base.as_number() {
            if let Some(n) = e.is_integer() {
                if let Some(v) = b.pow_int(n) {
                    return v.to_expr();
                }
            } else if matches!(b, Number::Float(_)) || matches!(e, Number::Float(_)) {
                return Expr::Float(b.to_f64().powf(e.to_f64()));
            }
            // Exact base with fractional exponent (e.g. 2^(1/2)) stays symbolic.
        }
        if let Expr::Pow(inner_base, inner_exp) = &base {
            if let Some(e2) = inner_exp.as_number() {
                return normalize_pow((**inner_base).clone(), e2.mul(e).to_expr());
            }
        }
    }
    Expr::Pow(Box::new(base), Box::new(exp))
}
