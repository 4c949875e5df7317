//! Rational functions: quotients of two polynomials.

use std::collections::BTreeMap;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::polynomial::Polynomial;
use crate::rational::Rational;
use crate::term::{Term, Variable};

/// `numerator / denominator`. After [`PolyRatio::simplify`] the two sides
/// share no monomial content and the denominator's leading coefficient is
/// positive. A denominator that normalizes to zero is kept and surfaced at
/// print time.
#[derive(Clone, Debug)]
pub struct PolyRatio {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

impl PolyRatio {
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        PolyRatio {
            numerator,
            denominator,
        }
    }

    /// The exact rational value of a constant ratio.
    pub fn as_constant(&self) -> Option<Rational> {
        let numerator = self.numerator.simplify().as_constant()?;
        let denominator = self.denominator.simplify().as_constant()?;
        if denominator.is_zero() {
            None
        } else {
            Some(numerator / denominator)
        }
    }

    pub fn evaluate(&self, bindings: &[(String, Rational)]) -> PolyRatio {
        PolyRatio {
            numerator: self.numerator.evaluate(bindings),
            denominator: self.denominator.evaluate(bindings),
        }
        .simplify()
    }

    /// Canonicalize the quotient: clear denominators and negative exponents,
    /// cancel the common monomial content of both sides, collapse equal
    /// residuals, and normalize the denominator's sign.
    pub fn simplify(&self) -> PolyRatio {
        let numerator = self.numerator.simplify();
        let denominator = self.denominator.simplify();
        if denominator.is_zero() {
            return PolyRatio::new(numerator, denominator);
        }
        if numerator.is_zero() {
            return PolyRatio::new(Polynomial::zero(), Polynomial::one());
        }
        if !numerator.degree.is_one() || !denominator.degree.is_one() {
            // radical-bearing sides are left untouched
            return PolyRatio::new(numerator, denominator);
        }

        let (numerator, num_scale) = numerator.make_integer();
        let (denominator, den_scale) = denominator.make_integer();

        // clear negative exponents by multiplying both sides by the offending
        // variables raised to the negated minimum
        let (numerator, denominator) = match exponent_clearer(&numerator, &denominator) {
            Some(clearer) => (
                numerator * Polynomial::from_term(clearer.clone()),
                denominator * Polynomial::from_term(clearer),
            ),
            None => (numerator, denominator),
        };

        // fold the make_integer scales back in crosswise, keeping the overall
        // value intact while every coefficient stays integral
        let numerator = numerator.scale(&den_scale).simplify();
        let denominator = denominator.scale(&num_scale).simplify();

        let (mut num_factor, num_residual) = numerator.factor();
        let (mut den_factor, den_residual) = denominator.factor();

        let shared = num_factor.coefficient.numer().gcd(den_factor.coefficient.numer());
        if shared != 0 {
            let shared = Rational::from_integer(shared);
            num_factor.coefficient /= shared;
            den_factor.coefficient /= shared;
        }
        cancel_common_variables(&mut num_factor, &mut den_factor);

        let (mut numerator, mut denominator) = if num_residual == den_residual {
            (
                Polynomial::from_term(num_factor).simplify(),
                Polynomial::from_term(den_factor).simplify(),
            )
        } else {
            (
                Polynomial::from_term(num_factor) * num_residual,
                Polynomial::from_term(den_factor) * den_residual,
            )
        };

        let leading = denominator
            .terms
            .first()
            .map(|t| t.coefficient)
            .unwrap_or_else(Rational::zero);
        if leading.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        PolyRatio::new(numerator, denominator)
    }
}

impl From<Polynomial> for PolyRatio {
    fn from(polynomial: Polynomial) -> Self {
        PolyRatio::new(polynomial, Polynomial::one())
    }
}

/// Monomial multiplying out every negative exponent appearing on either side.
fn exponent_clearer(numerator: &Polynomial, denominator: &Polynomial) -> Option<Term> {
    let mut minima: BTreeMap<String, Rational> = BTreeMap::new();
    for term in numerator.terms.iter().chain(denominator.terms.iter()) {
        for var in &term.variables {
            if var.degree.is_negative() {
                let entry = minima
                    .entry(var.name.clone())
                    .or_insert_with(Rational::zero);
                if var.degree < *entry {
                    *entry = var.degree;
                }
            }
        }
    }
    if minima.is_empty() {
        return None;
    }
    Some(Term::new(
        Rational::one(),
        minima
            .into_iter()
            .map(|(name, minimum)| Variable::new(name, -minimum))
            .collect(),
    ))
}

fn cancel_common_variables(a: &mut Term, b: &mut Term) {
    for var in a.variables.iter_mut() {
        if let Some(other) = b.variables.iter_mut().find(|v| v.name == var.name) {
            let shared = var.degree.min(other.degree);
            var.degree -= shared;
            other.degree -= shared;
        }
    }
    a.variables.retain(|v| !v.degree.is_zero());
    b.variables.retain(|v| !v.degree.is_zero());
}

impl PartialEq for PolyRatio {
    fn eq(&self, other: &Self) -> bool {
        self.numerator.clone() * other.denominator.clone()
            == other.numerator.clone() * self.denominator.clone()
    }
}

impl Eq for PolyRatio {}

impl Add for PolyRatio {
    type Output = PolyRatio;

    fn add(self, rhs: PolyRatio) -> PolyRatio {
        let numerator = self.numerator.clone() * rhs.denominator.clone()
            + rhs.numerator * self.denominator.clone();
        PolyRatio::new(numerator, self.denominator * rhs.denominator).simplify()
    }
}

impl Sub for PolyRatio {
    type Output = PolyRatio;

    fn sub(self, rhs: PolyRatio) -> PolyRatio {
        self + (-rhs)
    }
}

impl Neg for PolyRatio {
    type Output = PolyRatio;

    fn neg(self) -> PolyRatio {
        PolyRatio::new(-self.numerator, self.denominator)
    }
}

impl Mul for PolyRatio {
    type Output = PolyRatio;

    fn mul(self, rhs: PolyRatio) -> PolyRatio {
        PolyRatio::new(
            self.numerator * rhs.numerator,
            self.denominator * rhs.denominator,
        )
        .simplify()
    }
}

impl Div for PolyRatio {
    type Output = PolyRatio;

    fn div(self, rhs: PolyRatio) -> PolyRatio {
        PolyRatio::new(
            self.numerator * rhs.denominator,
            self.denominator * rhs.numerator,
        )
        .simplify()
    }
}

impl Add<Polynomial> for PolyRatio {
    type Output = PolyRatio;

    fn add(self, rhs: Polynomial) -> PolyRatio {
        self + PolyRatio::from(rhs)
    }
}

impl Sub<Polynomial> for PolyRatio {
    type Output = PolyRatio;

    fn sub(self, rhs: Polynomial) -> PolyRatio {
        self - PolyRatio::from(rhs)
    }
}

impl Mul<Polynomial> for PolyRatio {
    type Output = PolyRatio;

    fn mul(self, rhs: Polynomial) -> PolyRatio {
        self * PolyRatio::from(rhs)
    }
}

impl Div<Polynomial> for PolyRatio {
    type Output = PolyRatio;

    fn div(self, rhs: Polynomial) -> PolyRatio {
        // a plain polynomial divided by a polynomial gets the long-division
        // treatment; anything else falls back to cross-multiplication
        if self.denominator.simplify().is_one() {
            return self.numerator / rhs;
        }
        self / PolyRatio::from(rhs)
    }
}
