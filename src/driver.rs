//! Directive loop: owns the binding store and formats per-line output.

use std::io::Write;
use std::path::Path;

use log::debug;

use crate::ast::{self, BinOp, Directive, Line, Operation, Rhs};
use crate::error::{CalcError, Result};
use crate::format::{self, DIVISION_BY_ZERO};
use crate::ratio::PolyRatio;
use crate::rational::{pretty_rational, Rational};
use crate::solver::{self, SolveOutcome};

/// Ordered name/value pairs; the latest assignment wins on lookup.
pub type Bindings = Vec<(String, Rational)>;

/// Read, parse, and execute one input file, writing results to `out`.
pub fn run_file(path: &Path, out: &mut impl Write) -> Result<()> {
    let source = std::fs::read_to_string(path)?;
    let program = ast::parse_program(&source)?;
    drop(source);
    execute_program(program, out)
}

/// Parse and execute a source string. Parsing is eager; evaluation starts
/// only once the whole file has lowered.
pub fn run(source: &str, out: &mut impl Write) -> Result<()> {
    let program = ast::parse_program(source)?;
    execute_program(program, out)
}

fn execute_program(program: Vec<Line>, out: &mut impl Write) -> Result<()> {
    let mut bindings: Bindings = Vec::new();
    for line in program {
        if line.text.trim().is_empty() {
            continue;
        }
        writeln!(out, "{}", line.text)?;
        match line.directive {
            Ok(directive) => execute(directive, &mut bindings, out)?,
            Err(CalcError::DivisionByZero) => writeln!(out, "\t{DIVISION_BY_ZERO}")?,
            Err(other) => return Err(other),
        }
    }
    Ok(())
}

fn execute(directive: Directive, bindings: &mut Bindings, out: &mut impl Write) -> Result<()> {
    match directive {
        Directive::Assign { name, rhs } => {
            debug!("assign {name}");
            let value = match rhs {
                Rhs::Polynomial(p) => PolyRatio::from(p).evaluate(bindings),
                Rhs::Operation(op) => fold_operation(&op).evaluate(bindings),
            };
            if value.denominator.simplify().is_zero() {
                writeln!(out, "\t{DIVISION_BY_ZERO}")?;
                return Ok(());
            }
            let constant = value
                .as_constant()
                .ok_or_else(|| CalcError::NonConstantAssignment(name.clone()))?;
            writeln!(out, "\t{} = {}", name, pretty_rational(&constant))?;
            bindings.push((name, constant));
        }
        Directive::Simplify(polynomial) => {
            debug!("simplify");
            writeln!(out, "\t{}", polynomial.evaluate(bindings))?;
        }
        Directive::Operation(operation) => {
            debug!("operation");
            let result = fold_operation(&operation).evaluate(bindings);
            writeln!(out, "\t{result}")?;
        }
        Directive::Solve { polynomial, var } => {
            debug!("solve");
            // an explicit target stays symbolic even when bound
            let filtered: Bindings = match &var {
                Some(target) => bindings
                    .iter()
                    .filter(|(name, _)| name != target)
                    .cloned()
                    .collect(),
                None => bindings.clone(),
            };
            let p = polynomial.evaluate(&filtered);
            let target = var
                .or_else(|| p.first_var().map(str::to_string))
                .ok_or(CalcError::NoVariable)?;
            print_outcome(&target, solver::solve(&p, &target)?, out)?;
        }
    }
    Ok(())
}

fn fold_operation(operation: &Operation) -> PolyRatio {
    let mut acc = PolyRatio::from(operation.first.clone());
    for (op, operand) in &operation.rest {
        acc = match op {
            BinOp::Add => acc + operand.clone(),
            BinOp::Sub => acc - operand.clone(),
            BinOp::Mul => acc * operand.clone(),
            BinOp::Div => acc / operand.clone(),
        };
    }
    acc
}

fn print_outcome(target: &str, outcome: SolveOutcome, out: &mut impl Write) -> Result<()> {
    match outcome {
        SolveOutcome::AllValues => writeln!(out, "\tAll values of {target} are solutions")?,
        SolveOutcome::NoSolution => writeln!(out, "\tNo roots")?,
        SolveOutcome::Roots(roots) => {
            if roots.iter().any(|root| root.is_complex()) {
                writeln!(out, "\t(i is the imaginary unit)")?;
            }
            for root in roots {
                let rhs = root
                    .summands
                    .iter()
                    .map(|summand| format::pretty_ratio(summand))
                    .collect::<Vec<_>>()
                    .join(" + ");
                writeln!(out, "\t{target} = {rhs}")?;
            }
        }
    }
    Ok(())
}
