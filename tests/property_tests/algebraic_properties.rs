//! Property-based tests for exact algebraic identities
//!
//! Each identity here exercises a specific dispatch route: rational
//! Möbius transforms, the closed radical path, and resultant
//! elimination. All of them must hold exactly, not approximately.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;
use qbar::{AlgebraicNumber, Enclosure, IntPoly, Interval};

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn sqrt_of(n: u32) -> AlgebraicNumber {
    AlgebraicNumber::from(i64::from(n)).sqrt()
}

/// Strategy for small nonzero-denominator rational constants.
fn small_rational() -> impl Strategy<Value = BigRational> {
    (-12i64..=12, 1i64..=6).prop_map(|(n, d)| rat(n, d))
}

#[cfg(test)]
mod transform_properties {
    use super::*;

    proptest! {
        /// Rational shifts invert exactly
        #[test]
        fn shift_round_trip(n in 2u32..=40, r in small_rational()) {
            let x = sqrt_of(n);
            let c = AlgebraicNumber::from_rational(&r);
            prop_assert_eq!(&(&x + &c) - &c, x);
        }

        /// Rational scalings invert exactly, through both * and /
        #[test]
        fn scale_round_trip(n in 2u32..=40, r in small_rational()) {
            prop_assume!(!r.is_zero());
            let x = sqrt_of(n);
            let c = AlgebraicNumber::from_rational(&r);
            prop_assert_eq!(&(&x * &c) / &c, x.clone());
            prop_assert_eq!(&(&x / &c) * &c, x);
        }

        /// Negation and conjugation are involutions, and conjugation
        /// fixes the reals
        #[test]
        fn involutions_fix_their_domain(n in 2u32..=60) {
            let x = sqrt_of(n);
            prop_assert_eq!(-(-&x), x.clone());
            prop_assert_eq!(x.conj(), x.clone());
            prop_assert_eq!(x.abs(), x);
        }
    }
}

#[cfg(test)]
mod radical_properties {
    use super::*;

    proptest! {
        /// x / x = 1 for every nonzero rational root value
        #[test]
        fn self_division_is_one(n in 1i64..=30, den in 1i64..=9, d in 1u32..=4) {
            let x = AlgebraicNumber::from_rational(&rat(n, den)).nth_root(d);
            prop_assert!((&x / &x).is_one());
        }

        /// (p^(1/k))^k = p for positive rational p
        #[test]
        fn root_power_round_trip(n in 1i64..=30, den in 1i64..=9, k in 1u32..=4) {
            let p = rat(n, den);
            let x = AlgebraicNumber::from_rational(&p).nth_root(k);
            prop_assert_eq!(x.pow(k as i32).to_rational(), Some(p));
        }

        /// sqrt(a) * sqrt(b) = sqrt(a * b) exactly, collapsing perfect
        /// squares to rationals along the way
        #[test]
        fn radical_products_merge(a in 2u32..=30, b in 2u32..=30) {
            let lhs = &sqrt_of(a) * &sqrt_of(b);
            let rhs = AlgebraicNumber::from(i64::from(a * b)).sqrt();
            prop_assert_eq!(lhs, rhs);
        }

        /// Square roots preserve the order of their radicands
        #[test]
        fn square_root_ordering(a in 2u32..=50, b in 2u32..=50) {
            prop_assert_eq!(sqrt_of(a).cmp(&sqrt_of(b)), a.cmp(&b));
        }
    }
}

#[cfg(test)]
mod eliminant_properties {
    use super::*;

    proptest! {
        /// Sums built by resultant elimination are inverted exactly by
        /// subtraction
        #[test]
        fn sum_round_trip(a in 2u32..=12, b in 2u32..=12) {
            let x = sqrt_of(a);
            let y = sqrt_of(b);
            prop_assert_eq!(&(&x + &y) - &y, x);
        }

        /// Quotients built by elimination are inverted exactly by
        /// multiplication
        #[test]
        fn quotient_round_trip(a in 2u32..=12, b in 2u32..=12) {
            // The shift moves the dividend off the pure-radical form, so
            // the quotient goes through the eliminant.
            let x = &sqrt_of(a) + &AlgebraicNumber::one();
            let y = sqrt_of(b);
            let q = x.checked_div(&y).unwrap();
            prop_assert_eq!(&q * &y, x);
        }

        /// The canonical representation is independent of coefficient
        /// scaling in the defining polynomial
        #[test]
        fn canonicalization_ignores_scaling(n in 2i64..=40, c in 1i64..=12) {
            let bx = Enclosure::new(
                Interval::new(rat(0, 1), rat(n, 1)),
                Interval::zero(),
            );
            let plain =
                AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[-n, 0, 1]), bx.clone())
                    .unwrap();
            let scaled =
                AlgebraicNumber::with_enclosure(IntPoly::from_i64(&[-c * n, 0, c]), bx)
                    .unwrap();
            prop_assert_eq!(scaled.minimal_polynomial(), plain.minimal_polynomial());
            prop_assert_eq!(scaled, plain);
        }
    }
}
