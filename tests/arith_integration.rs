//! End-to-end arithmetic identities on algebraic numbers.
//!
//! These tests exercise the full pipeline behind each operation: dispatch,
//! resultant elimination, enclosure isolation, and minimal polynomial
//! reselection. Every assertion is an exact identity that approximate
//! arithmetic cannot satisfy reliably.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use qbar::{AlgebraicNumber, Enclosure, Error, IntPoly, Interval};

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn sqrt_of(n: i64) -> AlgebraicNumber {
    AlgebraicNumber::from(n).sqrt()
}

/// The golden ratio, the larger root of z^2 - z - 1.
fn golden_ratio() -> AlgebraicNumber {
    AlgebraicNumber::with_enclosure(
        IntPoly::from_i64(&[-1, -1, 1]),
        Enclosure::new(Interval::new(rat(1, 1), rat(2, 1)), Interval::zero()),
    )
    .unwrap()
}

/// x / x = 1 exactly, across every dispatch route: radicals, general
/// real irrationals, and complex values.
#[test]
fn division_of_a_number_by_itself_is_one() {
    let values = [
        sqrt_of(2),
        AlgebraicNumber::from(5i64).nth_root(3),
        golden_ratio(),
        &AlgebraicNumber::one() + &AlgebraicNumber::i(),
    ];
    for x in &values {
        let q = x / x;
        assert!(q.is_one(), "{x} / {x} evaluated to {q}");
        assert_eq!(q.degree(), 1);
    }
}

/// (x / y) * y = x exactly for sqrt(2) / sqrt(3), the motivating example
/// for carrying minimal polynomials instead of approximations.
#[test]
fn quotient_times_divisor_recovers_the_dividend() {
    let x = sqrt_of(2);
    let y = sqrt_of(3);
    let q = &x / &y;
    // sqrt(2)/sqrt(3) = sqrt(2/3), a root of 3z^2 - 2.
    assert_eq!(q.minimal_polynomial(), &IntPoly::from_i64(&[-2, 0, 3]));
    assert_eq!(&q * &y, x);

    // The same identity through the complex plane: (1+i)/sqrt(2) is a
    // primitive eighth root of unity, a root of z^4 + 1.
    let z = &AlgebraicNumber::one() + &AlgebraicNumber::i();
    let w = &z / &x;
    assert_eq!(w.minimal_polynomial(), &IntPoly::from_i64(&[1, 0, 0, 0, 1]));
    assert_eq!(&w * &x, z);
}

/// sqrt(4) collapses to the integer 2: perfect powers come back at
/// degree 1, not as degree-2 numbers that happen to equal an integer.
#[test]
fn perfect_power_roots_collapse_to_rationals() {
    let two = AlgebraicNumber::from(4i64).sqrt();
    assert_eq!(two.degree(), 1);
    assert!(two.is_integer());
    assert_eq!(two.to_integer(), Some(BigInt::from(2)));

    let half = AlgebraicNumber::from_rational(&rat(1, 8)).nth_root(3);
    assert_eq!(half.to_rational(), Some(rat(1, 2)));

    assert_eq!(
        AlgebraicNumber::from(27i64).nth_root(3).to_integer(),
        Some(BigInt::from(3))
    );
}

/// (p^(1/d))^d = p for rationals p, including non-integer ones.
#[test]
fn root_then_power_recovers_the_radicand() {
    let cases: [(i64, i64, u32); 4] = [(2, 1, 2), (5, 1, 3), (5, 7, 4), (10, 3, 5)];
    for (n, d, k) in cases {
        let p = rat(n, d);
        let x = AlgebraicNumber::from_rational(&p).nth_root(k);
        assert_eq!(x.degree() as u32, k, "degree of ({n}/{d})^(1/{k})");
        assert_eq!(x.pow(k as i32).to_rational(), Some(p));
    }
}

/// Products and quotients of radicals stay closed without resultants,
/// and perfect-power products collapse.
#[test]
fn radical_products_simplify() {
    assert_eq!(
        (&sqrt_of(2) * &sqrt_of(8)).to_integer(),
        Some(BigInt::from(4))
    );
    let quotient = &AlgebraicNumber::from(6i64).sqrt() / &sqrt_of(2);
    assert_eq!(quotient, sqrt_of(3));
    // Mixed indices: sqrt(2) / cbrt(3) is a root of 9z^6 - 8.
    let mixed = &sqrt_of(2) / &AlgebraicNumber::from(3i64).nth_root(3);
    assert_eq!(
        mixed.minimal_polynomial(),
        &IntPoly::from_i64(&[-8, 0, 0, 0, 0, 0, 9])
    );
}

/// sqrt(2) + sqrt(3) has the classic quartic z^4 - 10z^2 + 1, and
/// subtracting sqrt(3) back out restores sqrt(2) exactly.
#[test]
fn sum_of_radicals_round_trips_through_degree_four() {
    let x = sqrt_of(2);
    let y = sqrt_of(3);
    let s = &x + &y;
    assert_eq!(s.minimal_polynomial(), &IntPoly::from_i64(&[1, 0, -10, 0, 1]));
    assert_eq!(&s - &y, x);
}

/// Nested radicals flatten to a single minimal polynomial.
#[test]
fn nested_radical_towers_flatten() {
    let fourth = AlgebraicNumber::from(2i64).sqrt().sqrt();
    assert_eq!(fourth.minimal_polynomial(), &IntPoly::from_i64(&[-2, 0, 0, 0, 1]));
    assert_eq!(fourth.pow(4).to_integer(), Some(BigInt::from(2)));
}

/// The defining identities of the golden ratio hold exactly.
#[test]
fn golden_ratio_satisfies_its_defining_identities() {
    let phi = golden_ratio();
    let one = AlgebraicNumber::one();
    assert_eq!(phi.pow(2), &phi + &one);
    assert_eq!(phi.checked_recip().unwrap(), &phi - &one);
}

/// Conjugation, real and imaginary parts, and the absolute value fit
/// together on a genuinely complex input.
#[test]
fn conjugate_decomposition_of_a_complex_root() {
    // z = 1 + 2i, the upper root of z^2 - 2z + 5.
    let z = AlgebraicNumber::with_enclosure(
        IntPoly::from_i64(&[5, -2, 1]),
        Enclosure::new(
            Interval::new(rat(9, 10), rat(11, 10)),
            Interval::new(rat(19, 10), rat(21, 10)),
        ),
    )
    .unwrap();
    assert!(!z.is_real());

    assert_eq!((&z * &z.conj()).to_integer(), Some(BigInt::from(5)));
    assert_eq!((&z + &z.conj()).to_integer(), Some(BigInt::from(2)));
    assert_eq!(z.re().to_integer(), Some(BigInt::from(1)));
    assert_eq!(z.im().to_integer(), Some(BigInt::from(2)));
    assert_eq!(z.abs(), sqrt_of(5));

    let i = AlgebraicNumber::i();
    assert!((&i * &i).is_neg_one());
}

/// Canonicalization makes the representation independent of how the
/// defining polynomial was scaled or padded with repeated factors.
#[test]
fn canonical_form_ignores_input_presentation() {
    let bx = Enclosure::new(Interval::new(rat(1, 1), rat(2, 1)), Interval::zero());
    let plain = AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[-2, 0, 1]), bx.clone()).unwrap();
    // 6z^2 - 12: same root, scaled coefficients.
    let scaled = AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[-12, 0, 6]), bx.clone()).unwrap();
    // -3z^2 + 6: negated leading coefficient.
    let negated = AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[6, 0, -3]), bx.clone()).unwrap();
    // (z^2 - 2)^2: repeated factor.
    let squared =
        AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[4, 0, -4, 0, 1]), bx).unwrap();

    for x in [&scaled, &negated, &squared] {
        assert_eq!(x.minimal_polynomial(), plain.minimal_polynomial());
        assert_eq!(x, &plain);
    }
}

/// Malformed constructions surface as recoverable errors, not panics.
#[test]
fn construction_rejects_degenerate_inputs() {
    let unit_box = Enclosure::new(Interval::new(rat(0, 1), rat(1, 1)), Interval::zero());

    assert_eq!(
        AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[]), unit_box.clone()),
        Err(Error::ZeroPolynomial)
    );
    assert_eq!(
        AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[7]), unit_box),
        Err(Error::NoRootInEnclosure)
    );

    // No root of z^2 - 2 lives in [5, 6].
    let far_box = Enclosure::new(Interval::new(rat(5, 1), rat(6, 1)), Interval::zero());
    assert_eq!(
        AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[-2, 0, 1]), far_box),
        Err(Error::NoRootInEnclosure)
    );

    // [-2, 2] contains both roots of z^2 - 2.
    let wide_box = Enclosure::new(Interval::new(rat(-2, 1), rat(2, 1)), Interval::zero());
    assert_eq!(
        AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[-2, 0, 1]), wide_box),
        Err(Error::AmbiguousEnclosure)
    );
}

/// Division by zero is rejected before any polynomial work, whether the
/// zero arrives directly or as the result of a cancellation.
#[test]
fn zero_divisors_are_rejected() {
    let x = sqrt_of(2);
    assert_eq!(
        x.checked_div(&AlgebraicNumber::zero()),
        Err(Error::DivisionByZero)
    );

    let cancelled = &x - &x;
    assert!(cancelled.is_zero());
    assert_eq!(x.checked_div(&cancelled), Err(Error::DivisionByZero));
    assert_eq!(cancelled.checked_recip(), Err(Error::DivisionByZero));

    // 0/0 is rejected too: the divisor check outranks the zero-dividend
    // shortcut.
    assert_eq!(
        AlgebraicNumber::zero().checked_div(&cancelled),
        Err(Error::DivisionByZero)
    );
}

#[test]
#[should_panic(expected = "division by zero")]
fn operator_division_by_zero_panics() {
    let _ = AlgebraicNumber::one() / AlgebraicNumber::zero();
}

/// Sorting mixes rationals and irrationals correctly on the real line.
#[test]
fn ordering_agrees_with_the_real_line() {
    let mut values = vec![
        sqrt_of(2),
        -sqrt_of(3),
        AlgebraicNumber::from_rational(&rat(1, 2)),
        AlgebraicNumber::from(5i64).nth_root(3),
        AlgebraicNumber::from(-2i64),
        golden_ratio(),
    ];
    values.sort();

    // -2 < -sqrt(3) < 1/2 < sqrt(2) < phi < 5^(1/3)
    assert_eq!(values[0].to_integer(), Some(BigInt::from(-2)));
    assert_eq!(values[1], -sqrt_of(3));
    assert_eq!(values[2].to_rational(), Some(rat(1, 2)));
    assert_eq!(values[3], sqrt_of(2));
    assert_eq!(values[4], golden_ratio());
    assert_eq!(values[5], AlgebraicNumber::from(5i64).nth_root(3));
}

/// Values sharing a minimal polynomial are distinguished by their
/// enclosures alone.
#[test]
fn equality_distinguishes_conjugate_roots() {
    let x = sqrt_of(2);
    assert_ne!(x, -&x);

    let i = AlgebraicNumber::i();
    assert_ne!(i, i.conj());

    let s = &sqrt_of(2) + &sqrt_of(3);
    let d = &sqrt_of(2) - &sqrt_of(3);
    assert_eq!(s.minimal_polynomial(), d.minimal_polynomial());
    assert_ne!(s, d);
}

/// A rational within 1e-12 of sqrt(2) still compares as distinct and on
/// the correct side.
#[test]
fn near_misses_stay_distinct() {
    let x = sqrt_of(2);
    // Continued-fraction convergent: 665857^2 - 2 * 470832^2 = 1, so the
    // quotient lies just above sqrt(2).
    let convergent = AlgebraicNumber::from_rational(&rat(665_857, 470_832));
    assert_ne!(x, convergent);
    assert!(convergent > x);
    assert!(x < convergent);
}

/// Refinement tightens the stored enclosure without moving the value.
#[test]
fn refinement_tightens_without_changing_the_value() {
    let mut x = sqrt_of(2);
    x.refine(128);
    let bound = BigRational::new(BigInt::one(), BigInt::one() << 128);
    assert!(x.enclosure().diam_bound() <= bound);
    assert_eq!(x, sqrt_of(2));
    assert!(x.is_real());

    let (re, im) = x.approx_f64();
    assert!((re - std::f64::consts::SQRT_2).abs() < 1e-12);
    assert_eq!(im, 0.0);
}

/// Floor and ceiling work through enclosure refinement for irrationals.
#[test]
fn floor_and_ceil_of_mixed_values() {
    assert_eq!(sqrt_of(2).floor(), BigInt::from(1));
    assert_eq!(sqrt_of(2).ceil(), BigInt::from(2));
    assert_eq!((-sqrt_of(2)).floor(), BigInt::from(-2));
    assert_eq!(golden_ratio().floor(), BigInt::from(1));
    assert_eq!(AlgebraicNumber::from_rational(&rat(-7, 2)).floor(), BigInt::from(-4));
    assert_eq!(AlgebraicNumber::from(9i64).ceil(), BigInt::from(9));
}

#[test]
fn display_reports_approximation_and_degree() {
    assert_eq!(format!("{}", sqrt_of(2)), "1.41421 (deg 2)");
    assert_eq!(format!("{}", AlgebraicNumber::from_rational(&rat(3, 2))), "1.50000 (deg 1)");
    assert_eq!(format!("{}", AlgebraicNumber::i()), "0.00000 + 1.00000*I (deg 2)");
}
