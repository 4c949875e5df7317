//! Root finder for linear and quadratic polynomials with symbolic
//! coefficients.

use num_traits::{One, Signed, Zero};

use crate::error::{CalcError, Result};
use crate::polynomial::Polynomial;
use crate::ratio::PolyRatio;
use crate::rational::Rational;
use crate::term::{Term, Variable, IMAGINARY_UNIT};

#[derive(Clone, Debug, PartialEq)]
pub enum SolveOutcome {
    Roots(Vec<Root>),
    /// `0 = 0`: every value of the unknown is a solution.
    AllValues,
    /// A nonzero constant equated to zero.
    NoSolution,
}

/// One root, kept as a list of ratio summands so a radical part can sit next
/// to the rational part on one printed line.
#[derive(Clone, Debug, PartialEq)]
pub struct Root {
    pub summands: Vec<PolyRatio>,
}

impl Root {
    fn single(ratio: PolyRatio) -> Self {
        Root {
            summands: vec![ratio],
        }
    }

    pub fn is_complex(&self) -> bool {
        self.summands.iter().any(|ratio| {
            ratio
                .numerator
                .terms
                .iter()
                .chain(ratio.denominator.terms.iter())
                .flat_map(|t| t.variables.iter())
                .any(Variable::is_imaginary)
        })
    }
}

/// Solve `polynomial = 0` for `var`.
pub fn solve(polynomial: &Polynomial, var: &str) -> Result<SolveOutcome> {
    let p = polynomial.simplify();
    for term in &p.terms {
        for v in &term.variables {
            if v.name == var {
                let supported = v.degree.is_integer() && (0..=2).contains(&v.degree.to_integer());
                if !supported {
                    return Err(CalcError::UnsupportedDegree(format!(
                        "{var} appears with exponent {}",
                        v.degree
                    )));
                }
            }
        }
    }

    let (a, _) = p.find_sym_coeff(var, 2);
    let (b, _) = p.find_sym_coeff(var, 1);
    let (c, _) = p.find_sym_coeff(var, 0);

    if !a.is_zero() {
        Ok(SolveOutcome::Roots(quadratic_roots(a, b, c)))
    } else if !b.is_zero() {
        Ok(SolveOutcome::Roots(vec![linear_root(b, c)]))
    } else if c.is_zero() {
        Ok(SolveOutcome::AllValues)
    } else {
        Ok(SolveOutcome::NoSolution)
    }
}

/// `a·v + b = 0` has the single root `-b / a`.
fn linear_root(a: Polynomial, b: Polynomial) -> Root {
    Root::single(constant_fold(PolyRatio::new((-b).simplify(), a)))
}

/// `a·v² + b·v + c = 0` via the quadratic formula, with a negative rational
/// discriminant rewritten as `(-Δ)·ⅈ²` so the radical stays representable.
fn quadratic_roots(a: Polynomial, b: Polynomial, c: Polynomial) -> Vec<Root> {
    let discriminant =
        (b.clone() * b.clone() - Polynomial::constant(Rational::from_integer(4)) * a.clone() * c)
            .simplify();
    let radicand = match discriminant.as_constant() {
        Some(value) if value.is_negative() => Polynomial::from_term(Term::new(
            -value,
            vec![Variable::new(IMAGINARY_UNIT, Rational::from_integer(2))],
        )),
        _ => discriminant,
    };
    let sqrt = Polynomial::with_degree(radicand.terms.clone(), Rational::new(1, 2)).simplify();

    let neg_b = (-b).simplify();
    let two_a = (a * Polynomial::constant(Rational::from_integer(2))).simplify();

    if sqrt.degree.is_one() {
        // the radical reduced away; each root is a single ratio
        let plus = PolyRatio::new((neg_b.clone() + sqrt.clone()).simplify(), two_a.clone());
        let minus = PolyRatio::new((neg_b - sqrt).simplify(), two_a);
        vec![
            Root::single(constant_fold(plus)),
            Root::single(constant_fold(minus)),
        ]
    } else {
        let head = constant_fold(PolyRatio::new(neg_b, two_a.clone()));
        let plus = Root {
            summands: vec![head.clone(), PolyRatio::new(sqrt.clone(), two_a.clone())],
        };
        let minus = Root {
            summands: vec![head, PolyRatio::new(sqrt, (-two_a).simplify())],
        };
        vec![plus, minus]
    }
}

/// Collapse a ratio of two constants to lowest terms, leaving symbolic
/// ratios untouched.
fn constant_fold(ratio: PolyRatio) -> PolyRatio {
    match (
        ratio.numerator.as_constant(),
        ratio.denominator.as_constant(),
    ) {
        (Some(n), Some(d)) if !d.is_zero() => {
            let value = n / d;
            PolyRatio::new(
                Polynomial::constant(Rational::from_integer(*value.numer())),
                Polynomial::constant(Rational::from_integer(*value.denom())),
            )
        }
        _ => ratio,
    }
}
