use polycalc::{solve, PolyRatio, Polynomial, Rational, SolveOutcome, Term, Variable};
use proptest::prelude::*;

fn rational() -> impl Strategy<Value = Rational> {
    (-9i64..=9, 1i64..=4).prop_map(|(numer, denom)| Rational::new(numer, denom))
}

fn integer() -> impl Strategy<Value = Rational> {
    (-9i64..=9).prop_map(Rational::from_integer)
}

fn variable() -> impl Strategy<Value = Variable> {
    (prop::sample::select(vec!["w", "x", "y", "z"]), 0i64..=3)
        .prop_map(|(name, degree)| Variable::new(name, Rational::from_integer(degree)))
}

fn term(coefficient: impl Strategy<Value = Rational>) -> impl Strategy<Value = Term> {
    (coefficient, prop::collection::vec(variable(), 0..3))
        .prop_map(|(c, variables)| Term::new(c, variables))
}

fn polynomial() -> impl Strategy<Value = Polynomial> {
    prop::collection::vec(term(rational()), 1..4).prop_map(Polynomial::new)
}

fn integer_polynomial() -> impl Strategy<Value = Polynomial> {
    prop::collection::vec(term(integer()), 1..4).prop_map(Polynomial::new)
}

fn monomial() -> impl Strategy<Value = Term> {
    term((1i64..=9).prop_map(Rational::from_integer))
}

fn shuffled_term_pair() -> impl Strategy<Value = (Vec<Term>, Vec<Term>)> {
    prop::collection::vec(term(rational()), 1..4)
        .prop_flat_map(|terms| (Just(terms.clone()), Just(terms).prop_shuffle()))
}

proptest! {
    #[test]
    fn simplify_is_idempotent(p in polynomial()) {
        let once = p.simplify();
        prop_assert_eq!(once.to_string(), once.simplify().to_string());
    }

    #[test]
    fn addition_commutes(p in polynomial(), q in polynomial()) {
        let left = p.clone() + q.clone();
        let right = q + p;
        prop_assert_eq!(left.to_string(), right.to_string());
    }

    #[test]
    fn addition_associates(p in polynomial(), q in polynomial(), r in polynomial()) {
        let left = (p.clone() + q.clone()) + r.clone();
        let right = p + (q + r);
        prop_assert_eq!(left.to_string(), right.to_string());
    }

    #[test]
    fn self_subtraction_is_zero(p in polynomial()) {
        prop_assert!((p.clone() - p).is_zero());
    }

    #[test]
    fn factor_times_quotient_restores_input(p in polynomial()) {
        let (factor, quotient) = p.factor();
        prop_assert_eq!(Polynomial::from_term(factor) * quotient, p.simplify());
    }

    #[test]
    fn canonical_form_ignores_term_order((a, b) in shuffled_term_pair()) {
        let left = Polynomial::new(a).simplify();
        let right = Polynomial::new(b).simplify();
        prop_assert_eq!(left.to_string(), right.to_string());
    }

    #[test]
    fn monomial_ratio_cancels(p in integer_polynomial(), m in monomial()) {
        let scaled = p.clone() * Polynomial::from_term(m.clone());
        let reduced = PolyRatio::new(scaled, Polynomial::from_term(m)).simplify();
        prop_assert_eq!(reduced.clone(), PolyRatio::from(p.clone()));
        prop_assert!(reduced.denominator.is_one());
        prop_assert_eq!(reduced.numerator, p.simplify());
    }

    #[test]
    fn linear_roots_satisfy_the_polynomial(
        a in (1i64..=9).prop_map(Rational::from_integer),
        b in integer(),
    ) {
        let p = Polynomial::new(vec![
            Term::new(a, vec![Variable::linear("x")]),
            Term::constant(b),
        ]);
        let SolveOutcome::Roots(roots) = solve(&p, "x").unwrap() else {
            panic!("expected a root");
        };
        let value = roots[0].summands[0].as_constant().expect("rational root");
        prop_assert!(p.evaluate(&[("x".to_string(), value)]).is_zero());
    }

    #[test]
    fn quadratics_built_from_rational_roots_recover_them(r1 in integer(), r2 in integer()) {
        // (x - r1)(x - r2)
        let factor = |r: Rational| {
            Polynomial::new(vec![
                Term::new(Rational::from_integer(1), vec![Variable::linear("x")]),
                Term::constant(-r),
            ])
        };
        let p = factor(r1) * factor(r2);
        let SolveOutcome::Roots(roots) = solve(&p, "x").unwrap() else {
            panic!("expected roots");
        };
        let mut found: Vec<Rational> = roots
            .iter()
            .map(|root| root.summands[0].as_constant().expect("rational root"))
            .collect();
        let mut wanted = vec![r1, r2];
        found.sort();
        wanted.sort();
        prop_assert_eq!(found, wanted);
    }
}
