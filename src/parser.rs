//! PEG parser over the whole input file.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::{CalcError, Result};

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct PolyParser;

/// Parse a whole source file eagerly. Returns the `file` pair whose children
/// are the per-line directives. Any failure carries pest's positioned
/// diagnostic.
pub fn parse_file(source: &str) -> Result<Pair<'_, Rule>> {
    let mut pairs = PolyParser::parse(Rule::file, source)
        .map_err(|e| CalcError::Parse(e.to_string()))?;
    pairs
        .next()
        .ok_or_else(|| CalcError::Parse("empty parse result".into()))
}

/// Parse a single polynomial, mainly for tests and internal tooling.
pub fn parse_polynomial_source(source: &str) -> Result<Pair<'_, Rule>> {
    let mut pairs = PolyParser::parse(Rule::polynomial, source)
        .map_err(|e| CalcError::Parse(e.to_string()))?;
    pairs
        .next()
        .ok_or_else(|| CalcError::Parse("empty parse result".into()))
}
