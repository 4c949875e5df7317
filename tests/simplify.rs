use polycalc::{parse_polynomial, Polynomial, Rational, Term, Variable, IMAGINARY_UNIT};

fn poly(input: &str) -> Polynomial {
    parse_polynomial(input).expect("parse polynomial")
}

fn simplified(input: &str) -> String {
    poly(input).simplify().to_string()
}

#[test]
fn canonical_rendering() {
    let cases = vec![
        ("8x^(2)", "8x^(2)"),
        ("2x + 3x", "5x"),
        ("x + x^(2)", "x^(2)+x"),
        ("3 - 6y", "-6y+3"),
        ("xyx", "x^(2)y"),
        ("x^(0)", "1"),
        ("x - x", "0"),
        ("1x", "x"),
        ("-1x", "-x"),
        ("2.5x", "(5/2)x"),
        ("(1/2)x + (1/2)x", "x"),
        ("2x 3y", "6xy"),
        ("z + x", "x+z"),
        ("x^(-1)", "x^(-1)"),
        ("y^(1/2)", "y^(1/2)"),
    ];
    for (input, expected) in cases {
        assert_eq!(simplified(input), expected, "for input {input}");
    }
}

#[test]
fn simplify_is_idempotent() {
    for input in ["8x^(2) + 3x - 1", "xyx - 2yx^(2)", "3 - 6y + 2x", "x^(-2)y"] {
        let once = poly(input).simplify();
        assert_eq!(once.to_string(), once.simplify().to_string(), "for input {input}");
    }
}

#[test]
fn term_order_is_leading_exponent_descending() {
    assert_eq!(simplified("2 + x + 8x^(2)"), "8x^(2)+x+2");
    assert_eq!(simplified("4z + 2x"), "2x+4z");
    assert_eq!(simplified("y^(2) - 11x + 2 + x"), "y^(2)-10x+2");
}

#[test]
fn integer_outer_exponent_expands() {
    let squared = Polynomial::with_degree(poly("x + 1").terms, Rational::from_integer(2));
    assert_eq!(squared.simplify().to_string(), "x^(2)+2x+1");

    let cubed = Polynomial::with_degree(poly("x + y").terms, Rational::from_integer(3));
    assert_eq!(cubed.simplify().to_string(), "x^(3)+y^(3)+3x^(2)y+3xy^(2)");
}

#[test]
fn zero_outer_exponent_is_one() {
    let p = Polynomial::with_degree(poly("2x + 3").terms, Rational::from_integer(0));
    assert_eq!(p.simplify().to_string(), "1");
}

#[test]
fn fractional_outer_exponent_reduces_perfect_radicands() {
    let root = Polynomial::with_degree(poly("9x^(2)").terms, Rational::new(1, 2));
    assert_eq!(root.simplify().to_string(), "3x");

    let cube = Polynomial::with_degree(poly("8y^(3)").terms, Rational::new(1, 3));
    assert_eq!(cube.simplify().to_string(), "2y");
}

#[test]
fn fractional_outer_exponent_stays_symbolic_otherwise() {
    let irrational = Polynomial::with_degree(poly("5").terms, Rational::new(1, 2));
    assert_eq!(irrational.simplify().to_string(), "(5)^(1/2)");

    let sum = Polynomial::with_degree(poly("2x + y").terms, Rational::new(1, 2));
    assert_eq!(sum.simplify().to_string(), "(2x+y)^(1/2)");
}

#[test]
fn imaginary_unit_square_is_not_rewritten() {
    let p = Polynomial::from_term(Term::new(
        Rational::from_integer(4),
        vec![Variable::new(IMAGINARY_UNIT, Rational::from_integer(2))],
    ));
    assert_eq!(p.simplify().to_string(), "4ⅈ^(2)");
}

#[test]
fn arithmetic_normalizes() {
    assert_eq!((poly("x + 1") + poly("x - 1")).to_string(), "2x");
    assert_eq!((poly("x + 1") - poly("x + 1")).to_string(), "0");
    assert_eq!((poly("x + 1") * poly("x - 1")).to_string(), "x^(2)-1");
    assert_eq!((poly("x + y") * poly("x + y")).to_string(), "x^(2)+y^(2)+2xy");
}

#[test]
fn evaluate_folds_bound_variables() {
    let bindings = vec![("a".to_string(), Rational::from_integer(8))];
    assert_eq!(poly("6ax - ay").evaluate(&bindings).to_string(), "48x-8y");

    // latest assignment wins
    let rebound = vec![
        ("a".to_string(), Rational::from_integer(1)),
        ("a".to_string(), Rational::from_integer(3)),
    ];
    assert_eq!(poly("ax").evaluate(&rebound).to_string(), "3x");
}

#[test]
fn evaluate_keeps_inexact_powers_symbolic() {
    let bindings = vec![("x".to_string(), Rational::from_integer(5))];
    assert_eq!(poly("x^(1/2)").evaluate(&bindings).to_string(), "x^(1/2)");

    let perfect = vec![("x".to_string(), Rational::from_integer(4))];
    assert_eq!(poly("x^(1/2)").evaluate(&perfect).to_string(), "2");
    assert_eq!(poly("3x^(-1)").evaluate(&perfect).to_string(), "(3/4)");
}

#[test]
fn division_with_remainder_splits() {
    let (quotient, remainder) = poly("x^(2) + 3x + 5").div_rem(&poly("x + 1")).expect("divide");
    assert_eq!(quotient.to_string(), "x+2");
    assert_eq!(remainder.to_string(), "3");
}

#[test]
fn division_requires_common_univariate_operands() {
    assert!(poly("3 - 6y").div_rem(&poly("6x + 12z")).is_none());
    assert!(poly("x").div_rem(&poly("x^(2)")).is_none());
    assert!(poly("y^(2)").div_rem(&poly("3")).is_none());
}

#[test]
fn find_sym_coeff_partitions() {
    let p = poly("y^(2) - 11x + 2 + x");
    let (coeff, rest) = p.find_sym_coeff("x", 1);
    assert_eq!(coeff.to_string(), "-10");
    assert_eq!(rest.to_string(), "y^(2)+2");

    let q = poly("3x^(2)y + 2x^(2) - x");
    let (coeff, rest) = q.find_sym_coeff("x", 2);
    assert_eq!(coeff.to_string(), "3y+2");
    assert_eq!(rest.to_string(), "-x");
}
