//! Multivariate polynomials with rational exponents and an outer exponent.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::ratio::PolyRatio;
use crate::rational::{self, Rational};
use crate::term::{Term, Variable};

/// A sum of terms raised to an outer rational exponent:
/// `(t_0 + t_1 + …)^degree`. The outer exponent defaults to 1 and stays
/// symbolic only when it cannot be pushed inside (radicals).
#[derive(Clone, Debug)]
pub struct Polynomial {
    pub terms: Vec<Term>,
    pub degree: Rational,
}

impl Polynomial {
    pub fn new(terms: Vec<Term>) -> Self {
        Polynomial {
            terms,
            degree: Rational::one(),
        }
    }

    pub fn with_degree(terms: Vec<Term>, degree: Rational) -> Self {
        Polynomial { terms, degree }
    }

    pub fn from_term(term: Term) -> Self {
        Polynomial::new(vec![term])
    }

    pub fn constant(value: Rational) -> Self {
        Polynomial::from_term(Term::constant(value))
    }

    pub fn zero() -> Self {
        Polynomial::constant(Rational::zero())
    }

    pub fn one() -> Self {
        Polynomial::constant(Rational::one())
    }

    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(|t| t.coefficient.is_zero())
    }

    /// The rational value of a simplified constant polynomial.
    pub fn as_constant(&self) -> Option<Rational> {
        if !self.degree.is_one() {
            return None;
        }
        match self.terms.as_slice() {
            [term] if term.variables.is_empty() => Some(term.coefficient),
            _ => None,
        }
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// First non-imaginary variable in canonical term order.
    pub fn first_var(&self) -> Option<&str> {
        self.terms
            .iter()
            .flat_map(|t| t.variables.iter())
            .find(|v| !v.is_imaginary())
            .map(|v| v.name.as_str())
    }

    /// Canonical form: terms sorted, merged, purged, and the outer exponent
    /// resolved where possible. Idempotent and deterministic.
    pub fn simplify(&self) -> Polynomial {
        let inner = Polynomial {
            terms: combine_terms(&self.terms),
            degree: Rational::one(),
        };
        if self.degree.is_one() {
            return inner;
        }
        if inner.is_zero() {
            if self.degree.is_zero() {
                log::warn!("zero polynomial raised to the zeroth power; treating as 1");
                return Polynomial::one();
            }
            return Polynomial::zero();
        }
        if self.degree.is_zero() {
            return Polynomial::one();
        }
        if self.degree.is_integer() {
            let n = self.degree.to_integer();
            if n >= 2 {
                let mut expanded = inner.clone();
                for _ in 1..n {
                    expanded = expanded * inner.clone();
                }
                return expanded;
            }
            // negative exponents stay on the outside
            return Polynomial::with_degree(inner.terms, self.degree);
        }
        // fractional exponent 1/k: reduce a single-term radicand when its
        // coefficient is a perfect k-th power and every exponent divides by k
        if *self.degree.numer() == 1 {
            let k = *self.degree.denom();
            if let [term] = inner.terms.as_slice() {
                let divisible = term
                    .variables
                    .iter()
                    .all(|v| v.degree.is_integer() && v.degree.to_integer() % k == 0);
                if divisible {
                    if let Some(root) = rational::nth_root(&term.coefficient, k) {
                        let variables = term
                            .variables
                            .iter()
                            .map(|v| Variable::new(v.name.clone(), v.degree / Rational::from_integer(k)))
                            .collect();
                        return Polynomial::from_term(Term::new(root, variables));
                    }
                }
            }
        }
        Polynomial::with_degree(inner.terms, self.degree)
    }

    /// Multiply every coefficient by `k`.
    pub fn scale(&self, k: &Rational) -> Polynomial {
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|t| Term::new(t.coefficient * k, t.variables.clone()))
                .collect(),
            degree: self.degree,
        }
    }

    /// Scale all coefficients to integers by the LCM of their denominators.
    /// Returns the scaled polynomial and the factor applied.
    pub fn make_integer(&self) -> (Polynomial, Rational) {
        let mut lcm: i64 = 1;
        for term in &self.terms {
            lcm = lcm.lcm(term.coefficient.denom());
        }
        let scale = Rational::from_integer(lcm);
        (self.scale(&scale), scale)
    }

    /// Extract the monomial content: a factor `F` and quotient `Q` with
    /// `F · Q == self` and `Q` carrying no further common monomial factor.
    pub fn factor(&self) -> (Term, Polynomial) {
        let simplified = self.simplify();
        if simplified.is_zero() {
            return (Term::constant(Rational::one()), simplified);
        }
        let (scaled, scale) = simplified.make_integer();

        let mut coeff_gcd: i64 = 0;
        for term in &scaled.terms {
            coeff_gcd = coeff_gcd.gcd(term.coefficient.numer());
        }
        if scaled.terms[0].coefficient.is_negative() {
            coeff_gcd = -coeff_gcd;
        }
        let factor_coeff = Rational::from_integer(coeff_gcd);

        // variables present in every term, each at its minimum exponent
        let mut common: Vec<(String, Rational)> = scaled.terms[0]
            .variables
            .iter()
            .map(|v| (v.name.clone(), v.degree))
            .collect();
        for term in &scaled.terms[1..] {
            common.retain_mut(|(name, min)| {
                match term.variables.iter().find(|v| v.name == *name) {
                    Some(v) => {
                        if v.degree < *min {
                            *min = v.degree;
                        }
                        true
                    }
                    None => false,
                }
            });
        }

        let mut quotient_terms = Vec::with_capacity(scaled.terms.len());
        for term in &scaled.terms {
            let coefficient = term.coefficient / factor_coeff;
            let variables = term
                .variables
                .iter()
                .map(|v| {
                    let shift = common
                        .iter()
                        .find(|(name, _)| *name == v.name)
                        .map(|(_, min)| *min)
                        .unwrap_or_else(Rational::zero);
                    Variable::new(v.name.clone(), v.degree - shift)
                })
                .collect();
            quotient_terms.push(Term::new(coefficient, variables));
        }

        let factor = Term::new(
            factor_coeff / scale,
            common
                .into_iter()
                .map(|(name, degree)| Variable::new(name, degree))
                .collect(),
        );
        (factor, Polynomial::new(quotient_terms).simplify())
    }

    /// Fold bound variables into coefficients. Powers without an exact
    /// rational value leave the variable symbolic.
    pub fn evaluate(&self, bindings: &[(String, Rational)]) -> Polynomial {
        let terms = self
            .terms
            .iter()
            .map(|term| {
                let mut coefficient = term.coefficient;
                let mut variables = Vec::with_capacity(term.variables.len());
                for var in &term.variables {
                    let substituted = lookup(bindings, &var.name)
                        .and_then(|value| rational::pow_rational(&value, &var.degree));
                    match substituted {
                        Some(power) => coefficient *= power,
                        None => variables.push(var.clone()),
                    }
                }
                Term::new(coefficient, variables)
            })
            .collect();
        Polynomial {
            terms,
            degree: self.degree,
        }
        .simplify()
    }

    /// Partition into (coefficient of `var^d`, remainder). The polynomial is
    /// canonicalized first so each term carries `var` at most once.
    pub fn find_sym_coeff(&self, var: &str, d: i64) -> (Polynomial, Polynomial) {
        let simplified = self.simplify();
        let wanted = Rational::from_integer(d);
        let mut coeff_terms = Vec::new();
        let mut rest = Vec::new();
        for term in &simplified.terms {
            let exponent = term
                .variables
                .iter()
                .find(|v| v.name == var)
                .map(|v| v.degree)
                .unwrap_or_else(Rational::zero);
            if exponent == wanted {
                let variables = term
                    .variables
                    .iter()
                    .filter(|v| v.name != var)
                    .cloned()
                    .collect();
                coeff_terms.push(Term::new(term.coefficient, variables));
            } else {
                rest.push(term.clone());
            }
        }
        (
            Polynomial::new(coeff_terms).simplify(),
            Polynomial::new(rest).simplify(),
        )
    }

    /// Classical long division. Applies only when both sides are univariate
    /// in the divisor's variable with integral non-negative exponents and the
    /// dividend's degree is at least the divisor's.
    pub fn div_rem(&self, divisor: &Polynomial) -> Option<(Polynomial, Polynomial)> {
        let dividend = self.simplify();
        let divisor = divisor.simplify();
        if !dividend.degree.is_one() || !divisor.degree.is_one() {
            return None;
        }
        let var = divisor.first_var()?.to_string();
        let mut remainder = univariate_coeffs(&dividend, &var)?;
        let divisor_coeffs = univariate_coeffs(&divisor, &var)?;

        let divisor_degree = *divisor_coeffs.keys().next_back()?;
        let dividend_degree = remainder.keys().next_back().copied().unwrap_or(0);
        if divisor_degree == 0 || dividend_degree < divisor_degree {
            return None;
        }
        let divisor_lc = divisor_coeffs[&divisor_degree];

        let mut quotient: BTreeMap<i64, Rational> = BTreeMap::new();
        loop {
            let Some((&r_deg, &r_lc)) = remainder.iter().next_back() else {
                break;
            };
            if r_deg < divisor_degree {
                break;
            }
            let power = r_deg - divisor_degree;
            let coeff = r_lc / divisor_lc;
            quotient.insert(power, coeff);
            for (e, c) in &divisor_coeffs {
                let entry = remainder.entry(e + power).or_insert_with(Rational::zero);
                *entry -= c * coeff;
            }
            remainder.retain(|_, c| !c.is_zero());
        }

        Some((
            from_univariate(quotient, &var),
            from_univariate(remainder, &var),
        ))
    }
}

pub(crate) fn lookup(bindings: &[(String, Rational)], name: &str) -> Option<Rational> {
    bindings
        .iter()
        .rev()
        .find(|(bound, _)| bound == name)
        .map(|(_, value)| *value)
}

/// Canonicalize, merge like terms, order, and purge zeros. An empty result
/// collapses to the single zero term.
fn combine_terms(terms: &[Term]) -> Vec<Term> {
    let mut merged: BTreeMap<Vec<(String, Rational)>, Rational> = BTreeMap::new();
    for term in terms {
        let canon = term.canonical();
        let key = canon
            .variables
            .iter()
            .map(|v| (v.name.clone(), v.degree))
            .collect();
        *merged.entry(key).or_insert_with(Rational::zero) += canon.coefficient;
    }
    let mut combined: Vec<Term> = merged
        .into_iter()
        .filter(|(_, coefficient)| !coefficient.is_zero())
        .map(|(key, coefficient)| {
            Term::new(
                coefficient,
                key.into_iter()
                    .map(|(name, degree)| Variable::new(name, degree))
                    .collect(),
            )
        })
        .collect();
    combined.sort_by(term_order);
    if combined.is_empty() {
        combined.push(Term::constant(Rational::zero()));
    }
    combined
}

/// Leading-exponent-descending order with a lexicographic tie-break on the
/// full (name, exponent) tuple (names ascending, exponents descending), so
/// term order is total and stable.
fn term_order(a: &Term, b: &Term) -> Ordering {
    let lead = |t: &Term| {
        t.variables
            .iter()
            .map(|v| v.degree)
            .max()
            .unwrap_or_else(Rational::zero)
    };
    lead(b).cmp(&lead(a)).then_with(|| {
        let mut xs = a.variables.iter();
        let mut ys = b.variables.iter();
        loop {
            match (xs.next(), ys.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(x), Some(y)) => {
                    let ord = x.name.cmp(&y.name).then(y.degree.cmp(&x.degree));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    })
}

fn univariate_coeffs(p: &Polynomial, var: &str) -> Option<BTreeMap<i64, Rational>> {
    let mut coeffs = BTreeMap::new();
    for term in &p.terms {
        if term.coefficient.is_zero() {
            continue;
        }
        let exponent = match term.variables.as_slice() {
            [] => 0,
            [v] if v.name == var && v.degree.is_integer() && *v.degree.numer() >= 0 => {
                v.degree.to_integer()
            }
            _ => return None,
        };
        *coeffs.entry(exponent).or_insert_with(Rational::zero) += term.coefficient;
    }
    coeffs.retain(|_, c| !c.is_zero());
    Some(coeffs)
}

fn from_univariate(coeffs: BTreeMap<i64, Rational>, var: &str) -> Polynomial {
    let terms = coeffs
        .into_iter()
        .map(|(exponent, coefficient)| {
            if exponent == 0 {
                Term::constant(coefficient)
            } else {
                Term::new(
                    coefficient,
                    vec![Variable::new(var, Rational::from_integer(exponent))],
                )
            }
        })
        .collect();
    Polynomial::new(terms).simplify()
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        let a = self.simplify();
        let b = other.simplify();
        a.degree == b.degree && a.terms == b.terms
    }
}

impl Eq for Polynomial {}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        let mut terms = self.simplify().terms;
        terms.extend(rhs.simplify().terms);
        Polynomial::new(terms).simplify()
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(&Rational::from_integer(-1)).simplify()
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        let a = self.simplify();
        let b = rhs.simplify();
        let mut terms = Vec::with_capacity(a.terms.len() * b.terms.len());
        for x in &a.terms {
            for y in &b.terms {
                terms.push(x.mul(y));
            }
        }
        Polynomial::new(terms).simplify()
    }
}

impl std::ops::Div for Polynomial {
    type Output = PolyRatio;

    fn div(self, rhs: Polynomial) -> PolyRatio {
        if let Some((quotient, remainder)) = self.div_rem(&rhs) {
            if remainder.is_zero() {
                return PolyRatio::from(quotient);
            }
        }
        PolyRatio::new(self, rhs).simplify()
    }
}
