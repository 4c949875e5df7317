//! Lowering of the parse tree into engine data types.

use num_traits::{One, Zero};
use pest::iterators::Pair;

use crate::error::{CalcError, Result};
use crate::parser::{self, Rule};
use crate::polynomial::Polynomial;
use crate::rational::{self, Rational};
use crate::term::{Term, Variable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A parenthesized chain of polynomial operands, folded strictly left to
/// right.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub first: Polynomial,
    pub rest: Vec<(BinOp, Polynomial)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rhs {
    Operation(Operation),
    Polynomial(Polynomial),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    Assign { name: String, rhs: Rhs },
    Operation(Operation),
    Simplify(Polynomial),
    Solve {
        polynomial: Polynomial,
        var: Option<String>,
    },
}

/// One source line: the echoed text plus its lowered directive. A recoverable
/// lowering failure (a literal zero denominator) is kept per line so the
/// driver can report it without aborting the run.
#[derive(Debug)]
pub struct Line {
    pub text: String,
    pub directive: Result<Directive>,
}

/// Eagerly parse and lower a whole source file.
pub fn parse_program(source: &str) -> Result<Vec<Line>> {
    let file = parser::parse_file(source)?;
    let mut lines = Vec::new();
    for pair in file.into_inner() {
        if pair.as_rule() == Rule::EOI {
            continue;
        }
        let text = pair.as_str().to_string();
        let directive = directive_from_pair(pair);
        lines.push(Line { text, directive });
    }
    Ok(lines)
}

/// Parse a single polynomial from source, for tests and tooling.
pub fn parse_polynomial(source: &str) -> Result<Polynomial> {
    polynomial_from_pair(parser::parse_polynomial_source(source)?)
}

fn directive_from_pair(pair: Pair<Rule>) -> Result<Directive> {
    match pair.as_rule() {
        Rule::assign => {
            let mut inner = pair.into_inner();
            let target = inner
                .next()
                .ok_or_else(|| CalcError::Parse("assignment without target".into()))?;
            let name = target
                .as_str()
                .split('^')
                .next()
                .unwrap_or_default()
                .to_string();
            let rhs_pair = inner
                .next()
                .ok_or_else(|| CalcError::Parse("assignment without value".into()))?;
            let rhs = match rhs_pair.as_rule() {
                Rule::operation => Rhs::Operation(operation_from_pair(rhs_pair)?),
                Rule::polynomial => Rhs::Polynomial(polynomial_from_pair(rhs_pair)?),
                _ => unreachable!(),
            };
            Ok(Directive::Assign { name, rhs })
        }
        Rule::operation => Ok(Directive::Operation(operation_from_pair(pair)?)),
        Rule::polynomial => Ok(Directive::Simplify(polynomial_from_pair(pair)?)),
        Rule::solve => {
            let mut inner = pair.into_inner();
            let polynomial = polynomial_from_pair(
                inner
                    .next()
                    .ok_or_else(|| CalcError::Parse("solve without polynomial".into()))?,
            )?;
            let var = inner.next().map(|p| p.as_str().to_string());
            Ok(Directive::Solve { polynomial, var })
        }
        _ => unreachable!(),
    }
}

fn operation_from_pair(pair: Pair<Rule>) -> Result<Operation> {
    let mut inner = pair.into_inner();
    let first = polynomial_from_pair(
        inner
            .next()
            .ok_or_else(|| CalcError::Parse("operation without operand".into()))?,
    )?;
    let mut rest = Vec::new();
    while let Some(op) = inner.next() {
        let operand = polynomial_from_pair(
            inner
                .next()
                .ok_or_else(|| CalcError::Parse("operator without operand".into()))?,
        )?;
        let binop = match op.as_rule() {
            Rule::add => BinOp::Add,
            Rule::sub => BinOp::Sub,
            Rule::mul => BinOp::Mul,
            Rule::div => BinOp::Div,
            _ => unreachable!(),
        };
        rest.push((binop, operand));
    }
    Ok(Operation { first, rest })
}

fn polynomial_from_pair(pair: Pair<Rule>) -> Result<Polynomial> {
    let mut terms = Vec::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::term => terms.push(term_from_pair(part)?),
            _ => unreachable!(),
        }
    }
    Ok(Polynomial::new(terms))
}

/// Sign and numeric constituents multiply into the coefficient; variable
/// constituents append to the variable list (implicit multiplication).
fn term_from_pair(pair: Pair<Rule>) -> Result<Term> {
    let mut coefficient = Rational::one();
    let mut variables = Vec::new();
    for factor in pair.into_inner() {
        match factor.as_rule() {
            Rule::sign => {
                if factor.as_str() == "-" {
                    coefficient = -coefficient;
                }
            }
            Rule::number => coefficient *= number_value(factor.as_str())?,
            Rule::fraction => {
                let mut parts = factor.into_inner();
                let numerator = number_value(
                    parts
                        .next()
                        .ok_or_else(|| CalcError::Parse("fraction without numerator".into()))?
                        .as_str(),
                )?;
                let denominator = number_value(
                    parts
                        .next()
                        .ok_or_else(|| CalcError::Parse("fraction without denominator".into()))?
                        .as_str(),
                )?;
                if denominator.is_zero() {
                    return Err(CalcError::DivisionByZero);
                }
                coefficient *= numerator / denominator;
            }
            Rule::var => variables.push(variable_from_str(factor.as_str())?),
            _ => unreachable!(),
        }
    }
    Ok(Term::new(coefficient, variables))
}

/// Atomic `var` text: a name, optionally `^(signed exponent)` with an
/// optional fractional part.
fn variable_from_str(text: &str) -> Result<Variable> {
    let mut parts = text.splitn(2, '^');
    let name = parts.next().unwrap_or_default().to_string();
    let degree = match parts.next() {
        None => Rational::one(),
        Some(exponent) => exponent_value(exponent.trim_matches(|c| c == '(' || c == ')'))?,
    };
    Ok(Variable::new(name, degree))
}

fn exponent_value(text: &str) -> Result<Rational> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let mut parts = body.splitn(2, '/');
    let numerator = number_value(parts.next().unwrap_or_default())?;
    let value = match parts.next() {
        Some(denominator) => {
            let denominator = number_value(denominator)?;
            if denominator.is_zero() {
                return Err(CalcError::DivisionByZero);
            }
            numerator / denominator
        }
        None => numerator,
    };
    Ok(if negative { -value } else { value })
}

fn number_value(text: &str) -> Result<Rational> {
    rational::parse_number(text)
        .ok_or_else(|| CalcError::Parse(format!("invalid number literal `{text}`")))
}
