//! Variables and monomial terms.

use num_traits::{One, Zero};

use crate::rational::Rational;

/// Name of the variable standing in for the imaginary unit. The simplifier
/// treats it like any other symbol; only the root finder gives it meaning.
pub const IMAGINARY_UNIT: &str = "ⅈ";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Variable {
    pub name: String,
    pub degree: Rational,
}

impl Variable {
    pub fn new(name: impl Into<String>, degree: Rational) -> Self {
        Variable {
            name: name.into(),
            degree,
        }
    }

    /// A variable with exponent 1.
    pub fn linear(name: impl Into<String>) -> Self {
        Variable::new(name, Rational::one())
    }

    pub fn is_imaginary(&self) -> bool {
        self.name == IMAGINARY_UNIT
    }
}

/// A coefficient times a product of variables. The variable list is not
/// canonical until [`Term::canonical`] has run.
#[derive(Clone, Debug)]
pub struct Term {
    pub coefficient: Rational,
    pub variables: Vec<Variable>,
}

impl Term {
    pub fn new(coefficient: Rational, variables: Vec<Variable>) -> Self {
        Term {
            coefficient,
            variables,
        }
    }

    pub fn constant(coefficient: Rational) -> Self {
        Term {
            coefficient,
            variables: Vec::new(),
        }
    }

    pub fn is_constant(&self) -> bool {
        self.variables.iter().all(|v| v.degree.is_zero())
    }

    /// Sorted-and-merged copy: variables ordered by name, repeated names
    /// collapsed by summing exponents, zero exponents dropped. A zero
    /// coefficient clears the variable list entirely.
    pub fn canonical(&self) -> Term {
        if self.coefficient.is_zero() {
            return Term::constant(Rational::zero());
        }
        let mut sorted = self.variables.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        let mut variables: Vec<Variable> = Vec::with_capacity(sorted.len());
        for var in sorted {
            match variables.last_mut() {
                Some(last) if last.name == var.name => last.degree += var.degree,
                _ => variables.push(var),
            }
        }
        variables.retain(|v| !v.degree.is_zero());
        Term {
            coefficient: self.coefficient,
            variables,
        }
    }

    /// Canonical (name, exponent) multiset, the identity used for combining
    /// like terms.
    pub fn key(&self) -> Vec<(String, Rational)> {
        self.canonical()
            .variables
            .into_iter()
            .map(|v| (v.name, v.degree))
            .collect()
    }

    pub fn mul(&self, other: &Term) -> Term {
        Term {
            coefficient: self.coefficient * other.coefficient,
            variables: self
                .variables
                .iter()
                .chain(other.variables.iter())
                .cloned()
                .collect(),
        }
        .canonical()
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        let a = self.canonical();
        let b = other.canonical();
        a.coefficient == b.coefficient && a.variables == b.variables
    }
}

impl Eq for Term {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_merges_and_sorts() {
        let term = Term::new(
            Rational::from_integer(3),
            vec![
                Variable::linear("y"),
                Variable::new("x", Rational::from_integer(2)),
                Variable::new("y", Rational::from_integer(-1)),
            ],
        );
        let canon = term.canonical();
        assert_eq!(canon.variables, vec![Variable::new("x", Rational::from_integer(2))]);
    }

    #[test]
    fn semantic_equality_ignores_order() {
        let a = Term::new(
            Rational::from_integer(2),
            vec![Variable::linear("x"), Variable::linear("y")],
        );
        let b = Term::new(
            Rational::from_integer(2),
            vec![Variable::linear("y"), Variable::linear("x")],
        );
        assert_eq!(a, b);
    }
}
