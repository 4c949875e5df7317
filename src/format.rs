//! Canonical string rendering for polynomials and ratios.

use std::fmt;

use num_traits::{One, Signed};

use crate::polynomial::Polynomial;
use crate::ratio::PolyRatio;
use crate::rational::pretty_rational;
use crate::term::Term;

/// Sentinel printed in place of a ratio whose denominator normalizes to zero.
pub const DIVISION_BY_ZERO: &str = "ERROR: Division by zero!";

pub fn pretty_polynomial(polynomial: &Polynomial) -> String {
    let mut body = String::new();
    for (i, term) in polynomial.terms.iter().enumerate() {
        let negative = term.coefficient.is_negative();
        if i == 0 {
            if negative {
                body.push('-');
            }
        } else {
            body.push(if negative { '-' } else { '+' });
        }
        push_term(&mut body, term);
    }
    if polynomial.degree.is_one() {
        body
    } else {
        format!("({})^({})", body, pretty_rational(&polynomial.degree))
    }
}

fn push_term(out: &mut String, term: &Term) {
    let magnitude = term.coefficient.abs();
    if term.variables.is_empty() || !magnitude.is_one() {
        if magnitude.is_integer() {
            out.push_str(&magnitude.numer().to_string());
        } else {
            out.push_str(&format!("({}/{})", magnitude.numer(), magnitude.denom()));
        }
    }
    for var in &term.variables {
        out.push_str(&var.name);
        if !var.degree.is_one() {
            out.push_str(&format!("^({})", pretty_rational(&var.degree)));
        }
    }
}

pub fn pretty_ratio(ratio: &PolyRatio) -> String {
    let denominator = ratio.denominator.simplify();
    if denominator.is_zero() {
        return DIVISION_BY_ZERO.to_string();
    }
    let numerator = ratio.numerator.simplify();
    if denominator.is_one() || numerator.is_zero() {
        return pretty_polynomial(&numerator);
    }
    // a quotient that long division can split is shown in mixed form
    if let Some((quotient, remainder)) = numerator.div_rem(&denominator) {
        if remainder.is_zero() {
            return pretty_polynomial(&quotient);
        }
        if !quotient.is_zero() {
            return format!(
                "({}) / ({}) + {}",
                pretty_polynomial(&remainder),
                pretty_polynomial(&denominator),
                pretty_polynomial(&quotient)
            );
        }
    }
    format!(
        "({}) / ({})",
        pretty_polynomial(&numerator),
        pretty_polynomial(&denominator)
    )
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pretty_polynomial(self))
    }
}

impl fmt::Display for PolyRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pretty_ratio(self))
    }
}
