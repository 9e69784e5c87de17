//! Property-based tests for the rational (degree-1) subset
//!
//! Rational algebraic numbers must be indistinguishable from exact
//! `BigRational` arithmetic on every operation and predicate.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use proptest::prelude::*;
use qbar::{AlgebraicNumber, Error};

/// Strategy for small exact rationals, including zero and negatives.
fn rational_strategy() -> impl Strategy<Value = BigRational> {
    (-50i64..=50, 1i64..=20)
        .prop_map(|(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
}

#[cfg(test)]
mod rational_agreement {
    use super::*;

    proptest! {
        /// Ring operations agree with BigRational
        #[test]
        fn ring_ops_agree(a in rational_strategy(), b in rational_strategy()) {
            let x = AlgebraicNumber::from_rational(&a);
            let y = AlgebraicNumber::from_rational(&b);

            prop_assert_eq!((&x + &y).to_rational(), Some(&a + &b));
            prop_assert_eq!((&x - &y).to_rational(), Some(&a - &b));
            prop_assert_eq!((&x * &y).to_rational(), Some(&a * &b));
        }

        /// Division agrees with BigRational away from zero and is
        /// rejected as an error at zero
        #[test]
        fn division_agrees(a in rational_strategy(), b in rational_strategy()) {
            let x = AlgebraicNumber::from_rational(&a);
            let y = AlgebraicNumber::from_rational(&b);

            if b.is_zero() {
                prop_assert_eq!(x.checked_div(&y), Err(Error::DivisionByZero));
            } else {
                let q = x.checked_div(&y).unwrap();
                prop_assert_eq!(q.to_rational(), Some(&a / &b));
            }
        }

        /// The total order embeds the rational order
        #[test]
        fn ordering_embeds(a in rational_strategy(), b in rational_strategy()) {
            let x = AlgebraicNumber::from_rational(&a);
            let y = AlgebraicNumber::from_rational(&b);
            prop_assert_eq!(x.cmp(&y), a.cmp(&b));
        }

        /// Floor and ceiling agree with exact rational rounding
        #[test]
        fn floor_and_ceil_agree(a in rational_strategy()) {
            let x = AlgebraicNumber::from_rational(&a);
            prop_assert_eq!(x.floor(), a.floor().to_integer());
            prop_assert_eq!(x.ceil(), a.ceil().to_integer());
        }

        /// Integer powers agree with repeated exact multiplication
        #[test]
        fn powers_agree(a in rational_strategy(), k in 0i32..=4) {
            let x = AlgebraicNumber::from_rational(&a);

            let mut expected = BigRational::one();
            for _ in 0..k {
                expected *= &a;
            }
            prop_assert_eq!(x.pow(k).to_rational(), Some(expected.clone()));

            if !a.is_zero() && k > 0 {
                prop_assert_eq!(x.pow(-k).to_rational(), Some(expected.recip()));
            }
        }
    }
}
