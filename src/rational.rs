//! Exact rational scalar used throughout the engine.

use num_rational::Rational64;
use num_traits::{One, Signed, Zero};

/// Exact rational with 64-bit signed numerator and denominator. The library
/// keeps the denominator positive and the fraction fully reduced after every
/// operation. Overflow is not detected.
pub type Rational = Rational64;

/// Parse an integer or decimal literal (`12`, `12.5`) into an exact rational.
pub fn parse_number(text: &str) -> Option<Rational> {
    let text = text.trim();
    match text.split_once('.') {
        None => text.parse::<i64>().ok().map(Rational::from_integer),
        Some((whole, frac)) => {
            let digits: String = [whole, frac].concat();
            let numerator = digits.parse::<i64>().ok()?;
            let denominator = 10_i64.checked_pow(frac.len() as u32)?;
            Some(Rational::new(numerator, denominator))
        }
    }
}

/// Exact k-th root of an integer, if one exists.
fn int_nth_root(n: i64, k: u32) -> Option<i64> {
    if n < 0 {
        if k % 2 == 0 {
            return None;
        }
        return int_nth_root(-n, k).map(|r| -r);
    }
    if n <= 1 || k == 1 {
        return Some(n);
    }
    let mut root = (n as f64).powf(1.0 / f64::from(k)).round() as i64;
    while root > 1 && root.checked_pow(k).map_or(true, |p| p > n) {
        root -= 1;
    }
    while (root + 1).checked_pow(k).is_some_and(|p| p <= n) {
        root += 1;
    }
    (root.checked_pow(k) == Some(n)).then_some(root)
}

/// Exact k-th root of a rational, if both components admit one.
pub fn nth_root(value: &Rational, k: i64) -> Option<Rational> {
    let k = u32::try_from(k).ok().filter(|k| *k > 0)?;
    let numer = int_nth_root(*value.numer(), k)?;
    let denom = int_nth_root(*value.denom(), k)?;
    Some(Rational::new(numer, denom))
}

/// `base^exp` when the power has an exact rational value.
pub fn pow_rational(base: &Rational, exp: &Rational) -> Option<Rational> {
    if exp.is_zero() {
        return Some(Rational::one());
    }
    if exp.is_integer() {
        let e = exp.to_integer();
        if base.is_zero() && e < 0 {
            return None;
        }
        return Some(base.pow(e as i32));
    }
    let root = nth_root(base, *exp.denom())?;
    let e = *exp.numer();
    if root.is_zero() && e < 0 {
        return None;
    }
    Some(root.pow(e as i32))
}

/// Render a rational as `n` or `n/d`.
pub fn pretty_rational(value: &Rational) -> String {
    if value.is_integer() {
        value.numer().to_string()
    } else if value.is_negative() {
        format!("-{}/{}", -value.numer(), value.denom())
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}
